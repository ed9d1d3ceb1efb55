//! Error types for bytescan

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bytescan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bytescan
#[derive(Error, Debug)]
pub enum Error {
    /// Zero or inconsistent size parameters passed to a generator
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// I/O errors (open, read, write, map, lock)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Naive and vectorized kernels disagreed on the same input
    #[error("Kernel divergence on {path}: naive={naive}, simd={simd}")]
    Divergence {
        path: PathBuf,
        naive: bool,
        simd: bool,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io(
            "opening data.txt",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error: opening data.txt");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_divergence_message() {
        let err = Error::Divergence {
            path: PathBuf::from("data/x.txt"),
            naive: true,
            simd: false,
        };
        assert_eq!(
            err.to_string(),
            "Kernel divergence on data/x.txt: naive=true, simd=false"
        );
    }
}
