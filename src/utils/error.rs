//! Error types for the image stamper.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use thiserror::Error;

/// Main error type for the stamping service.
///
/// All errors in the library are converted to this type before being
/// returned to the caller.
#[derive(Error, Debug)]
pub enum StamperError {
    /// The engine module could not be loaded or instantiated
    #[error("Engine load error: {0}")]
    EngineLoad(String),

    /// An operation was invoked before the engine was ready
    #[error("Engine not initialized: {0}")]
    NotInitialized(&'static str),

    /// One file failed during batch processing; the batch is aborted
    #[error("Failed to process image {file}: {message}")]
    Processing { file: String, message: String },

    /// Archive encoding or export failed
    #[error("Archive error: {0}")]
    Archive(String),

    /// Invalid stamping options
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Image decode/encode error inside the engine
    #[error("Image error: {0}")]
    Image(String),

    /// File IO error
    #[error("IO error: {0}")]
    Io(String),
}

/// Convenience result type for stamper operations.
pub type StamperResult<T> = Result<T, StamperError>;

// Helper methods for error creation
impl StamperError {
    pub fn engine_load<T: Into<String>>(msg: T) -> Self {
        Self::EngineLoad(msg.into())
    }

    pub fn processing<F: Into<String>, M: Into<String>>(file: F, message: M) -> Self {
        Self::Processing {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn archive<T: Into<String>>(msg: T) -> Self {
        Self::Archive(msg.into())
    }

    pub fn invalid_options<T: Into<String>>(msg: T) -> Self {
        Self::InvalidOptions(msg.into())
    }

    pub fn image<T: Into<String>>(msg: T) -> Self {
        Self::Image(msg.into())
    }
}

// Convert std::io::Error to StamperError
impl From<io::Error> for StamperError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

// Convert image decode/encode errors to StamperError
impl From<image::ImageError> for StamperError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err.to_string())
    }
}

// Convert zip errors to StamperError
impl From<zip::result::ZipError> for StamperError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err.to_string())
    }
}
