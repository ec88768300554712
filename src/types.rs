//! Core data types for whitebox-raster

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Cell encoding used in the binary data file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    /// 32-bit floating point ("float")
    F32,
    /// 64-bit floating point ("double")
    F64,
    /// Signed 16-bit integer ("integer")
    I16,
    /// Signed 8-bit integer ("byte")
    I8,
    /// Signed 32-bit integer ("i32")
    I32,
}

impl DataType {
    /// Returns the size in bytes for this data type
    pub fn size(&self) -> usize {
        match self {
            DataType::I8 => 1,
            DataType::I16 => 2,
            DataType::I32 | DataType::F32 => 4,
            DataType::F64 => 8,
        }
    }

    /// Returns the token used for this data type in header files
    pub fn name(&self) -> &'static str {
        match self {
            DataType::F32 => "float",
            DataType::F64 => "double",
            DataType::I16 => "integer",
            DataType::I8 => "byte",
            DataType::I32 => "i32",
        }
    }

    /// Parses a header `Data Type` token, case-insensitively
    pub fn from_header_token(token: &str) -> Result<Self> {
        match token.trim().to_lowercase().as_str() {
            "float" => Ok(DataType::F32),
            "double" => Ok(DataType::F64),
            "integer" => Ok(DataType::I16),
            "byte" => Ok(DataType::I8),
            "i32" => Ok(DataType::I32),
            other => Err(Error::InvalidFormat(format!("Unknown data type '{}'", other))),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raster dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub rows: usize,
    pub columns: usize,
}

impl Dimensions {
    /// Creates new dimensions
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    /// Returns the total number of cells
    ///
    /// Panics on overflow; use [`Dimensions::checked_cell_count`] for
    /// dimensions that did not come from an allocated buffer.
    pub fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Returns the total number of cells, or `None` if it overflows `usize`
    pub fn checked_cell_count(&self) -> Option<usize> {
        self.rows.checked_mul(self.columns)
    }

    /// True when either side is zero
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows x {} columns", self.rows, self.columns)
    }
}

/// Geographic bounds of a raster
///
/// `north > south` and `east > west` are assumed but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Extent {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Extent {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_size() {
        assert_eq!(DataType::I8.size(), 1);
        assert_eq!(DataType::I16.size(), 2);
        assert_eq!(DataType::I32.size(), 4);
        assert_eq!(DataType::F32.size(), 4);
        assert_eq!(DataType::F64.size(), 8);
    }

    #[test]
    fn test_data_type_tokens() {
        assert_eq!(DataType::from_header_token("FLOAT").unwrap(), DataType::F32);
        assert_eq!(DataType::from_header_token(" double ").unwrap(), DataType::F64);
        assert_eq!(DataType::from_header_token("integer").unwrap(), DataType::I16);
        assert_eq!(DataType::from_header_token("Byte").unwrap(), DataType::I8);
        assert_eq!(DataType::from_header_token("i32").unwrap(), DataType::I32);
        assert_eq!(DataType::I16.name(), "integer");
    }

    #[test]
    fn test_unknown_data_type() {
        let err = DataType::from_header_token("complex").unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_dimensions() {
        let dims = Dimensions::new(100, 200);
        assert_eq!(dims.rows, 100);
        assert_eq!(dims.columns, 200);
        assert_eq!(dims.cell_count(), 20000);
        assert_eq!(dims.checked_cell_count(), Some(20000));
        assert_eq!(Dimensions::new(usize::MAX, 2).checked_cell_count(), None);
        assert!(!dims.is_empty());
        assert!(Dimensions::new(0, 5).is_empty());
    }

    #[test]
    fn test_extent_size() {
        let extent = Extent::new(100.0, 40.0, 30.0, 10.0);
        assert_eq!(extent.width(), 20.0);
        assert_eq!(extent.height(), 60.0);
    }
}
