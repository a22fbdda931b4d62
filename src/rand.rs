//! Random sources.
//!
//! All randomized functions take a caller-provided generator that
//! implements `CryptoRng + RngCore`. With the `std` feature, `system()`
//! returns the operating system source.

use crate::{CryptoRng, Error, RngCore};

/// Fills `buf` with bytes from `rng`, reporting generator failures as
/// `Error::RandomSource`.
pub fn fill<R: CryptoRng + RngCore + ?Sized>(rng: &mut R, buf: &mut [u8])
    -> Result<(), Error>
{
    rng.try_fill_bytes(buf).map_err(|e| {
        tracing::warn!(error = %e, "random source failure");
        Error::RandomSource
    })
}

/// Returns the operating system random source.
#[cfg(feature = "std")]
pub fn system() -> rand_core::OsRng {
    rand_core::OsRng
}
