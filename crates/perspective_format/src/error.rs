//! Error types for puzzle and world decoding

use thiserror::Error;

/// Location parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// No components at all
    #[error("could not parse location: empty input")]
    Empty,
    /// More than the four supported components
    #[error("could not parse location '{0}': more than 4 components")]
    TooManyComponents(String),
    /// A component is not a base-10 integer
    #[error("could not parse location '{input}': invalid component '{component}'")]
    InvalidComponent {
        /// The whole location string
        input: String,
        /// The offending component
        component: String,
    },
}

/// Format errors
#[derive(Debug, Error)]
pub enum FormatError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Length prefix could not be decoded or does not fit the buffer
    #[error("Framing error: {0}")]
    Framing(String),
    /// Payload could not be deserialized
    #[error("Payload decode error: {0}")]
    PayloadDecode(String),
    /// Payload could not be serialized
    #[error("Payload encode error: {0}")]
    PayloadEncode(String),
    /// Malformed location column
    #[error("line {line}: {source}")]
    Location {
        /// 1-based line number
        line: usize,
        #[source]
        source: LocationError,
    },
    /// Malformed integer column
    #[error("line {line}: invalid integer '{value}' for {field}")]
    Integer {
        /// 1-based line number
        line: usize,
        /// Record tag the column belongs to
        field: &'static str,
        /// Raw column text
        value: String,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FormatError>;
