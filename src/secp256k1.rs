//! secp256k1 curve implementation.
//!
//! This module implements group operations on the secp256k1 elliptic
//! curve, a short Weierstraß curve with equation `y^2 = x^3 + 7` over
//! the field of integers modulo p = 2^256 - 2^32 - 977. This curve is
//! standardized in SEC 2. The curve has prime order n.
//!
//! Field elements (`GFp`) are handled in Montgomery representation for
//! all curve computations; `GFp::to_mont()` and `GFp::from_mont()`
//! convert in and out. Scalars (`Scalar`) are plain integers modulo n;
//! multiplication functions reduce them before use, so any 256-bit
//! value is accepted.
//!
//! A point on the curve is represented by the `Point` structure, in
//! Jacobian coordinates. The additive arithmetic operators can be
//! applied on `Point` instances (`+`, `-`, `+=`, `-=`); multiplication
//! by a scalar uses `*` and `*=`, or `Point::mul()`. Point doublings can
//! be performed with the `double()` function, and multiple successive
//! doublings with `xdouble()`. All these operations are implemented with
//! constant-time code and handle all cases, including additions of a
//! point with itself or with its opposite, and operations involving the
//! point-at-infinity.
//!
//! Multiplication of the conventional generator uses a precomputed
//! table of multiples (`GeneratorTable`, 37 rows of 64 affine points,
//! 7-bit Booth-recoded windows); the table is built explicitly, or
//! through the process-wide context (`crate::init()` and
//! `crate::mulgen()`). Multiplication of an arbitrary point builds a
//! 16-entry table on the stack for each call (5-bit windows).
//!
//! Constant-time table accesses always read (or write) all entries,
//! selecting the relevant one with masks.

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

mod inverse;
mod mul;
mod point;
mod recode;
mod table;

pub use point::{Point, PointAffine};
pub use table::{PointTable, TableRow, GEN_COLS, GEN_ROWS};

#[cfg(feature = "alloc")]
pub use table::GeneratorTable;

use crate::field::{GFsecp256k1, ScalarSecp256k1};
use crate::{CryptoRng, Error, RngCore};

/// The base field (integers modulo p).
pub type GFp = GFsecp256k1;

/// Integers modulo the curve order n.
pub type Scalar = ScalarSecp256k1;

/// Returns the field modulus p, as four 64-bit limbs (low-to-high order).
pub fn get_p() -> [u64; 4] {
    GFp::MODULUS
}

/// Returns the curve order n, as four 64-bit limbs (low-to-high order).
pub fn get_order() -> [u64; 4] {
    Scalar::MODULUS
}

/// Returns the conventional generator G.
pub fn generator() -> Point {
    Point::BASE
}

/// Returns a uniformly random field element (plain representation, in
/// 0..p-1).
///
/// 256 random bits are reduced modulo p; since p is very close to
/// 2^256, the bias is negligible.
pub fn random_field_element<R: CryptoRng + RngCore + ?Sized>(rng: &mut R)
    -> Result<GFp, Error>
{
    Ok(GFp::random(rng)?.reduce())
}

/// Returns a uniformly random scalar (in 0..n-1).
pub fn random_scalar<R: CryptoRng + RngCore + ?Sized>(rng: &mut R)
    -> Result<Scalar, Error>
{
    Ok(Scalar::random(rng)?.reduce())
}
