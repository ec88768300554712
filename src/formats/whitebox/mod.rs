//! Whitebox raster format support
//!
//! A raster is stored as a text header (`.dep`) next to a raw binary data
//! file (`.tas`) with the same stem.

pub mod data;
pub mod header;
pub mod paths;

pub use header::{RasterHeader, DEFAULT_NODATA};
pub use paths::{FilePair, DATA_EXTENSION, HEADER_EXTENSION};
