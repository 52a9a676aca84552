//! Crate-wide error type.
//!
//! Failures are reported with a deliberately coarse set of kinds. A caller
//! learns that an operation produced no result and roughly why, but never
//! which secret-dependent step refused it.

use thiserror::Error;

/// Errors returned by big-number, Montgomery and key operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An operand or key was never initialized, or was invalidated.
    #[error("value is not initialized")]
    InvalidState,

    /// A result would not fit in the fixed big-number capacity.
    #[error("big-number capacity exceeded")]
    CapacityExceeded,

    /// An index, count or modulus is outside the accepted domain.
    #[error("invalid argument")]
    InvalidArgument,

    /// The destination or source buffer is too short.
    #[error("buffer too short")]
    BufferTooShort,

    /// Key metadata does not match the caller's expectations.
    #[error("key metadata mismatch")]
    Mismatch,

    /// A point was rejected by the curve layer or the subgroup check.
    #[error("invalid point")]
    InvalidPoint,

    /// A documented algorithmic precondition does not hold.
    #[error("precondition violated")]
    Precondition,

    /// The random source failed to produce a value.
    #[error("random source failure")]
    RandomSource,
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
