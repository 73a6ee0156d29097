//! Error types for sdlog.

use thiserror::Error;

/// Main error type for all sdlog operations.
#[derive(Debug, Error)]
pub enum SdlogError {
    /// Generic failure that does not fit any other category.
    #[error("unspecified failure")]
    Failure,

    /// An allocation could not be satisfied.
    #[error("not enough memory")]
    NoMemory,

    /// Invalid argument (unknown type code, over-long message name, etc.).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// A structural limit was exceeded (column count, record size).
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// The underlying input stream signaled a transport error.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// The underlying output stream signaled a transport error.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),

    /// Generic I/O error not attributable to a single read or write.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Operation on a type code that is reserved but not implemented.
    #[error("unimplemented: {0}")]
    Unimplemented(&'static str),

    /// Input stream exhausted, or output stream closed.
    #[error("end of stream")]
    Eof,
}

impl SdlogError {
    /// Stable numeric code of this error.
    ///
    /// Code 0 is reserved for success and is never produced by an error
    /// value. The ordering matches [`error_to_string`].
    pub fn code(&self) -> u8 {
        match self {
            SdlogError::Failure => 1,
            SdlogError::NoMemory => 2,
            SdlogError::InvalidValue(_) => 3,
            SdlogError::LimitExceeded(_) => 4,
            SdlogError::Read(_) => 5,
            SdlogError::Write(_) => 6,
            SdlogError::Io(_) => 7,
            SdlogError::Unimplemented(_) => 8,
            SdlogError::Eof => 9,
        }
    }

    pub(crate) fn invalid_value(msg: impl Into<String>) -> Self {
        SdlogError::InvalidValue(msg.into())
    }

    pub(crate) fn limit_exceeded(msg: impl Into<String>) -> Self {
        SdlogError::LimitExceeded(msg.into())
    }
}

impl From<std::collections::TryReserveError> for SdlogError {
    fn from(_: std::collections::TryReserveError) -> Self {
        SdlogError::NoMemory
    }
}

/// Stable, code-indexed error message table.
const ERROR_MESSAGES: [&str; 10] = [
    "No error",
    "Unspecified failure",
    "Not enough memory",
    "Invalid value",
    "Limit exceeded",
    "Read error",
    "Write error",
    "Generic I/O error",
    "Unimplemented function call",
    "End of file",
];

/// Converts a stable numeric error code to a human-readable string.
///
/// Code 0 maps to success. Out-of-range codes yield the generic failure
/// message.
pub fn error_to_string(code: u8) -> &'static str {
    ERROR_MESSAGES
        .get(usize::from(code))
        .copied()
        .unwrap_or(ERROR_MESSAGES[1])
}

/// Result type alias using SdlogError.
pub type Result<T> = std::result::Result<T, SdlogError>;
