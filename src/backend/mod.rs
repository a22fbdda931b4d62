//! Architecture-specific implementations of finite fields.
//!
//! This module provides type aliases for the structures that implement
//! the two 256-bit rings used by secp256k1: the base field (integers
//! modulo p = 2^256 - 2^32 - 977) and the scalar ring (integers modulo
//! the curve order n). Only a 64-bit backend is provided; it relies on
//! 64x64->128 multiplications, which are constant-time on all supported
//! targets.
//!
//! The following properties apply to both types:
//!
//!  - An instance encapsulates four 64-bit limbs (low-to-high order).
//!    The constant values `Self::ZERO` and `Self::ONE` contain the
//!    plain values 0 and 1. `Self::MODULUS` is the modulus limbs.
//!
//!  - Operators `+` and `-` (and `+=`, `-=`, unary `-`) perform modular
//!    addition, subtraction and negation, on raw types and references.
//!    They work identically on plain values and Montgomery
//!    representations.
//!
//!  - Functions `set_double()`, `set_triple()`, `set_half()`,
//!    `set_add_word()`, `set_sub_word()` and `set_mul_word()` modify
//!    the value in place; `double()`, `triple()`, `half()`,
//!    `add_word()`, `sub_word()` and `mul_word()` return a new instance.
//!
//!  - Function `equals(self, rhs: Self) -> u32` returns 0xFFFFFFFF
//!    if `self` and `rhs` have the same limbs, or 0x00000000 otherwise.
//!    Function `iszero(self) -> u32` compares `self` with zero.
//!    `set_cond()`, `select()` and `cswap()` perform constant-time
//!    conditional assignment, selection and exchange.
//!
//!  - Function `cmp(&self, rhs: &Self) -> i32` compares raw limbs and
//!    returns -1, 0 or +1.
//!
//!  - Functions `from_bytes()`/`to_bytes()` and `from_hex()`/`get_hex()`
//!    convert from and to big-endian bytes and hexadecimal strings.
//!
//! The base field type additionally implements Montgomery
//! multiplication (`mul_mont()`), squaring (`sqr_mont()`, `xsqr_mont()`)
//! and conversions (`to_mont()`, `from_mont()`), with R = 2^256.

#[cfg(not(target_pointer_width = "64"))]
compile_error!("only 64-bit targets are supported");

pub mod w64;

/// Ring of integers modulo a 256-bit odd modulus greater than
/// 2^256 - 2^192.
///
/// The modulus is provided as four 64-bit type parameters, that encode
/// the modulus in base 2^64 (`M0` is the least significant limb,
/// `M3` is the most significant limb).
pub type Fp256<const M0: u64, const M1: u64, const M2: u64, const M3: u64> =
    w64::fp256::Fp256<M0, M1, M2, M3>;

/// Finite field: integers modulo p = 2^256 - 2^32 - 977 (base field of
/// curve secp256k1).
pub type GFsecp256k1 = Fp256<
    0xFFFFFFFEFFFFFC2F, 0xFFFFFFFFFFFFFFFF,
    0xFFFFFFFFFFFFFFFF, 0xFFFFFFFFFFFFFFFF>;

/// Integers modulo the order n of the secp256k1 group.
pub type ScalarSecp256k1 = Fp256<
    0xBFD25E8CD0364141, 0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE, 0xFFFFFFFFFFFFFFFF>;
