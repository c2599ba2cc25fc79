/*!
 * Error types for the nutq application.
 *
 * The matching core is total and has no error type. Everything around it
 * (content loading, speech capabilities, drills) reports failures through
 * the enums below, defined with the thiserror crate.
 */

use thiserror::Error;

/// Errors that can occur while loading vocabulary content
#[derive(Error, Debug)]
pub enum ContentError {
    /// The content file could not be read
    #[error("Failed to read content file: {0}")]
    Io(String),

    /// The content file is not valid JSON of the expected shape
    #[error("Failed to parse content: {0}")]
    Parse(String),

    /// An item has no Arabic form
    #[error("Item {index} in category '{category}' has no Arabic text")]
    MissingArabic {
        /// Category the item belongs to
        category: String,
        /// Position of the item inside its category
        index: usize,
    },

    /// The requested category does not exist
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

/// Errors raised by speech synthesis or recognition capabilities
#[derive(Error, Debug)]
pub enum SpeechError {
    /// The capability is not available on this system
    #[error("Speech capability unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the underlying stream failed
    #[error("Speech I/O error: {0}")]
    Io(String),

    /// The session was cancelled before a result arrived
    #[error("Speech session aborted")]
    Aborted,
}

impl From<std::io::Error> for SpeechError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

/// Errors that can occur while running a drill
#[derive(Error, Debug)]
pub enum DrillError {
    /// Error from a speech capability
    #[error("Speech error: {0}")]
    Speech(#[from] SpeechError),

    /// The drill was started without any items
    #[error("No items to drill")]
    NoItems,

    /// Statistics could not be read or written
    #[error("Statistics error: {0}")]
    Stats(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from content loading
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Error from a drill
    #[error("Drill error: {0}")]
    Drill(#[from] DrillError),

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
