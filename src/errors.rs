/*!
 * Error types for the cinesub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when reading or writing CineCanvas XML
#[derive(Error, Debug)]
pub enum CineCanvasError {
    /// Error from the underlying XML reader/writer
    #[error("Failed to process CineCanvas XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error while decoding an XML attribute
    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// Error from the underlying I/O stream
    #[error("I/O error while processing CineCanvas XML: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a CineCanvas subtitle document
    #[error("Invalid CineCanvas file: missing DCSubtitle root element")]
    InvalidRoot,

    /// The document ended before the root element was closed
    #[error("Invalid CineCanvas file: truncated XML document")]
    Truncated,
}

/// Errors that can occur while parsing an ASS subtitle document
#[derive(Error, Debug)]
pub enum DocumentError {
    /// A dialogue line did not match the expected field layout
    #[error("Line {line}: malformed dialogue entry")]
    MalformedDialogue {
        /// 1-based line number in the source file
        line: usize,
    },

    /// A timestamp field could not be parsed
    #[error("Line {line}: invalid timestamp '{value}'")]
    InvalidTimestamp {
        /// 1-based line number in the source file
        line: usize,
        /// The offending timestamp text
        value: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from CineCanvas XML processing
    #[error("CineCanvas error: {0}")]
    CineCanvas(#[from] CineCanvasError),

    /// Error from ASS document processing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
