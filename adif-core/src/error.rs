//! Error types for ADIF stream reading.
//!
//! Parsing itself never fails: malformed specifiers end a scan pass and
//! overlong declared lengths are clamped. What the parser tolerated is kept
//! as [`Diagnostic`] values for callers that want to see it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading records from a stream.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from the underlying reader.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// Path that was being opened.
        path: PathBuf,
        /// Underlying open error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for stream reading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Something the parser tolerated instead of failing on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A field declared more characters than were available before the next
    /// `<`; the value was clamped to what was there.
    LengthClamped {
        /// Upper-cased field tag.
        tag: String,
        /// Length written in the specifier.
        declared: usize,
        /// Characters actually taken.
        actual: usize,
    },

    /// A stream error ended iteration early.
    StreamError {
        /// Rendered error message.
        message: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthClamped { tag, declared, actual } => write!(
                f,
                "field {} declared length {} but only {} characters available",
                tag, declared, actual
            ),
            Self::StreamError { message } => write!(f, "stream error: {}", message),
        }
    }
}
