//! Error types for the screen reader bridge
//!
//! Backends report failures with these; the façade logs and discards them
//! so accessibility output never interferes with the game.

use std::io;
use thiserror::Error;

/// Main error type for screen reader operations
#[derive(Error, Debug)]
pub enum ScreenReaderError {
    #[error("Speech backend error: {0}")]
    Backend(String),

    #[error("Speech backend unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("JNI error: {0}")]
    Jni(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for screen reader operations
pub type Result<T> = std::result::Result<T, ScreenReaderError>;

#[cfg(target_os = "android")]
impl From<jni::errors::Error> for ScreenReaderError {
    fn from(e: jni::errors::Error) -> Self {
        ScreenReaderError::Jni(e.to_string())
    }
}
