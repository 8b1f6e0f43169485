//! Error types for LZSS encoding and decoding.

use thiserror::Error;

/// Result type alias for LZSS operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the byte source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A window or index table could not be allocated.
    #[error("allocation failed: could not allocate {requested_bytes} bytes")]
    Allocation { requested_bytes: usize },

    /// The original length does not fit the 32-bit count field.
    #[error("input of {len} bytes exceeds the 32-bit length field")]
    InputTooLarge { len: u64 },

    /// The compressed stream is shorter than the 32-bit length header.
    #[error("stream too short for the 32-bit length header")]
    MissingHeader,

    /// The compressed stream ended before the declared length was reached.
    #[error("stream truncated after {decoded} of {expected} bytes")]
    Truncated { decoded: u64, expected: u64 },

    /// A match points before the first decoded byte.
    #[error("invalid distance {distance}: only {available} bytes decoded")]
    InvalidDistance { distance: u32, available: u64 },

    /// A match runs past the declared original length.
    #[error("match of length {length} overruns the {remaining} bytes remaining")]
    MatchOverrun { length: u32, remaining: u64 },
}

impl Error {
    /// Map an end-of-input I/O error from the bit reader to [`Error::Truncated`].
    pub(crate) fn from_read(err: std::io::Error, decoded: u64, expected: u64) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::Truncated { decoded, expected }
        } else {
            Error::Io(err)
        }
    }

    pub(crate) fn from_header_read(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::MissingHeader
        } else {
            Error::Io(err)
        }
    }
}
