//! Error types for the mediaseed library

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for mediaseed operations
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Error kinds for manifest parsing, enumeration and annotation
#[derive(Error, Debug)]
pub enum FixtureError {
    /// Config file path does not exist
    #[error("config file not found: {path:?}")]
    ConfigNotFound { path: PathBuf },

    /// Config file exists but a header or row is malformed
    #[error("malformed config {path:?}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// EXIF annotation requested on a container that cannot carry it
    #[error("file format of {path:?} does not support EXIF comments")]
    UnsupportedFormat { path: PathBuf },

    /// EXIF data could not be encoded or decoded
    #[error("EXIF processing failed for {path:?}")]
    Exif {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },

    /// Filesystem operation failed
    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FixtureError {
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::ConfigParse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn exif(path: impl AsRef<Path>, source: exif::Error) -> Self {
        Self::Exif {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
