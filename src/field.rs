//! Finite fields.
//!
//! This module exposes the rings used by curve secp256k1. These are
//! merely specializations of the backend-provided `Fp256` type.

pub use crate::backend::Fp256;
pub use crate::backend::GFsecp256k1;
pub use crate::backend::ScalarSecp256k1;
