//! secp256k1-ct is a Rust library for constant-time arithmetic on the
//! secp256k1 elliptic curve.
//!
//! This library implements computations in the base field of curve
//! secp256k1, in the ring of integers modulo the curve order, and in
//! the curve group itself. It aims at providing secure (constant-time)
//! implementations with portable code, and with a convenient API so that
//! field elements and curve points may be used in straightforward
//! expressions with normal arithmetic operators.
//!
//! Integers modulo a 256-bit modulus are implemented by the generic
//! type `Fp256` defined in `backend`; the two concrete moduli are named
//! in `field`. The base field additionally supports Montgomery
//! multiplication, which the curve code uses throughout.
//!
//! Curve operations are in the `secp256k1` module: Jacobian point
//! arithmetic, conversions to and from affine coordinates, scalar
//! multiplication of arbitrary points, and multiplication of the
//! conventional generator with a precomputed table.
//!
//! # Features
//!
//! The crate is `no_std` at its core. The default `std` feature adds the
//! process-wide context (`init()`, `deinit()`, `mulgen()`), runtime CPU
//! feature detection and the operating system random source. With only
//! `alloc`, the generator table can still be built and passed around
//! explicitly. Field operations and multiplication of arbitrary points
//! need neither.
//!
//! # Conventions
//!
//! Unless documented otherwise, functions run in constant time with
//! regard to their secret inputs. Secret Booleans are never `bool`
//! values, since compilers readily turn those into branches; they are
//! `u32` masks instead, 0xFFFFFFFF for true and 0x00000000 for false.
//! Any other mask value gives unspecified results. For the same reason,
//! field elements and points do not implement `Eq` or `PartialEq`; use
//! their `equals()` functions.
//!
//! A function named `set_xxx()` updates its receiver in place, while the
//! matching `xxx()` returns a new value: `P.set_double()` doubles `P`,
//! `P.double()` leaves `P` untouched.
//!
//! Decoding, point conversions and table management return
//! `Result<_, Error>`; plain arithmetic cannot fail.
//!
//! Carry propagation uses the `_addcarry_u64()` and `_subborrow_u64()`
//! intrinsics on x86-64, and portable code on other 64-bit targets.
//! There is no inline assembly.

#![no_std]

#[cfg(all(feature = "alloc", not(feature = "std")))]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

#[cfg(all(feature = "alloc", not(feature = "std")))]
pub(crate) use alloc::vec::Vec;

#[cfg(feature = "std")]
pub(crate) use std::vec::Vec;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

macro_rules! static_assert {
    ($condition:expr) => {
        let _ = &[()][1 - ($condition) as usize];
    }
}

mod error;
pub mod rand;
pub mod cpuid;
pub mod backend;
pub mod field;
pub mod secp256k1;

#[cfg(feature = "std")]
pub mod context;

pub use error::Error;

#[cfg(feature = "std")]
pub use context::{deinit, init, mulgen, Context};
