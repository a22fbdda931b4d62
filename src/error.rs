//! Error type.

use thiserror::Error;

/// Errors reported by decoding functions, point conversions and the
/// precomputation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A textual or binary input contains invalid data (e.g. a
    /// non-hexadecimal character).
    #[error("invalid argument")]
    InvalidArgument,

    /// An input or output buffer has an unsupported length.
    #[error("invalid length: {len} (maximum: {max})")]
    InvalidLength { len: usize, max: usize },

    /// The point at infinity has no affine coordinates.
    #[error("point at infinity has no affine representation")]
    PointAtInfinity,

    /// The provided coordinates are not those of a curve point.
    #[error("point is not on the curve")]
    InvalidPoint,

    /// Memory for the precomputed table could not be obtained.
    #[error("allocation failure")]
    AllocationFailure,

    /// An internal lock was poisoned by a panicking thread.
    #[error("lock failure")]
    LockFailure,

    /// The precomputation context has not been initialized.
    #[error("context not initialized")]
    NotInitialized,

    /// The random source failed.
    #[error("random source failure")]
    RandomSource,
}
