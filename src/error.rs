//! Error types for whitebox-raster

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::types::Dimensions;

/// Result type for whitebox-raster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in whitebox-raster operations
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(io::Error),

    /// Unrecognised file extension, data type, or malformed/truncated payload
    InvalidFormat(String),

    /// Grid-to-grid operation on rasters of different shape
    DimensionMismatch {
        expected: Dimensions,
        found: Dimensions,
    },

    /// Derivation source could not be resolved to a raster
    InvalidSource {
        path: PathBuf,
        reason: Box<Error>,
    },

    /// Zero rows or columns, or more cells than fit in memory, requested
    /// on create/derive
    InvalidDimensions(Dimensions),

    /// Tool setting outside its accepted range
    InvalidParameter(String),

    /// CSV error from the point sampling tool
    Csv(csv::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            Error::DimensionMismatch { expected, found } => write!(
                f,
                "Dimension mismatch: expected {}, found {}",
                expected, found
            ),
            Error::InvalidSource { path, reason } => write!(
                f,
                "Invalid source raster {}: {}",
                path.display(),
                reason
            ),
            Error::InvalidDimensions(dims) => write!(f, "Invalid dimensions: {}", dims),
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::Csv(e) => write!(f, "CSV error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::InvalidSource { reason, .. } => Some(reason.as_ref()),
            Error::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Error::Csv(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidFormat("test".to_string());
        assert_eq!(err.to_string(), "Invalid format: test");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = Error::DimensionMismatch {
            expected: Dimensions::new(3, 4),
            found: Dimensions::new(2, 2),
        };
        let msg = err.to_string();
        assert!(msg.contains("3 rows x 4 columns"));
        assert!(msg.contains("2 rows x 2 columns"));
    }

    #[test]
    fn test_invalid_source_keeps_reason() {
        let err = Error::InvalidSource {
            path: PathBuf::from("missing.dep"),
            reason: Box::new(Error::InvalidFormat("bad".to_string())),
        };
        assert!(err.to_string().contains("missing.dep"));
        assert!(err.source().is_some());
    }
}
