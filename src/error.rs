//! Error types for uncrush

use std::io;

/// Result type for uncrush operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting a PNG stream
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error (file reads and writes; the in-memory codec never produces this)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The source bytes are not a PNG this tool can convert
    #[error("Corrupt input: {0}")]
    CorruptInput(String),
}
