use thiserror::Error;

/// Errors reported by construction and serialization.
///
/// Query preconditions (in-bounds positions, occurrence indexes that exist)
/// are debug-asserted rather than surfaced here; violating them is a caller
/// bug, not a recoverable condition.
#[derive(Debug, Error)]
pub enum Error {
    /// The input buffer holds fewer elements than the requested prefix.
    #[error("input has {available} elements but a prefix of {requested} was requested")]
    PrefixTooLong { available: usize, requested: usize },

    /// Serialization failed.
    #[error("encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    /// Deserialization failed.
    #[error("decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Result alias for fallible wavematrix operations.
pub type Result<T> = std::result::Result<T, Error>;
