//! Header/data companion path resolution

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Extension of the text header file
pub const HEADER_EXTENSION: &str = "dep";

/// Extension of the binary data file
pub const DATA_EXTENSION: &str = "tas";

/// The two files backing a raster
///
/// Whichever file the caller names is kept verbatim; its companion is the
/// same path with the other extension, always spelled in lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    header: PathBuf,
    data: PathBuf,
}

impl FilePair {
    /// Resolves the pair from either the header or the data path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase());

        match extension.as_deref() {
            Some(HEADER_EXTENSION) => Ok(Self {
                header: path.to_path_buf(),
                data: path.with_extension(DATA_EXTENSION),
            }),
            Some(DATA_EXTENSION) => Ok(Self {
                header: path.with_extension(HEADER_EXTENSION),
                data: path.to_path_buf(),
            }),
            _ => Err(Error::InvalidFormat(format!(
                "Unknown file extension for {} (expected .{} or .{})",
                path.display(),
                HEADER_EXTENSION,
                DATA_EXTENSION
            ))),
        }
    }

    /// Path of the text header file
    pub fn header(&self) -> &Path {
        &self.header
    }

    /// Path of the binary data file
    pub fn data(&self) -> &Path {
        &self.data
    }
}
