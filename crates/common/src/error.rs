//! Error types shared across ClipForge crates.

use std::path::PathBuf;

/// Top-level error type for ClipForge operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipforgeError {
    #[error("Recognizer error: {message}")]
    Recognizer { message: String },

    #[error("Observer error: {message}")]
    Observer { message: String },

    #[error("Curation error: {message}")]
    Curation { message: String },

    #[error("Text recognition error: {message}")]
    Ocr { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipforgeError.
pub type ClipforgeResult<T> = Result<T, ClipforgeError>;

impl ClipforgeError {
    pub fn recognizer(msg: impl Into<String>) -> Self {
        Self::Recognizer {
            message: msg.into(),
        }
    }

    pub fn observer(msg: impl Into<String>) -> Self {
        Self::Observer {
            message: msg.into(),
        }
    }

    pub fn curation(msg: impl Into<String>) -> Self {
        Self::Curation {
            message: msg.into(),
        }
    }

    pub fn ocr(msg: impl Into<String>) -> Self {
        Self::Ocr {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
