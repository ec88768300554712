//! Fixed-size scratch grid
//!
//! [`Array2D`] shares the raster indexing contract (out-of-range reads give
//! nodata, out-of-range writes are ignored) without any file backing or
//! arithmetic. It is meant for transient accumulation buffers.

use crate::error::{Error, Result};
use crate::formats::whitebox::DEFAULT_NODATA;
use crate::types::Dimensions;

#[derive(Debug, Clone, PartialEq)]
pub struct Array2D {
    rows: usize,
    columns: usize,
    nodata: f64,
    values: Vec<f64>,
}

impl Array2D {
    /// Creates an array filled with `initial_value`, or `nodata` when `None`
    ///
    /// Fails with [`Error::InvalidDimensions`] when `rows * columns`
    /// overflows.
    pub fn new(
        rows: usize,
        columns: usize,
        nodata: f64,
        initial_value: Option<f64>,
    ) -> Result<Self> {
        let dims = Dimensions::new(rows, columns);
        let count = dims.checked_cell_count().ok_or(Error::InvalidDimensions(dims))?;
        Ok(Self {
            rows,
            columns,
            nodata,
            values: vec![initial_value.unwrap_or(nodata); count],
        })
    }

    /// Creates an array using the default nodata value of -32768
    pub fn with_default_nodata(rows: usize, columns: usize) -> Result<Self> {
        Self::new(rows, columns, DEFAULT_NODATA, None)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn nodata(&self) -> f64 {
        self.nodata
    }

    fn offset(&self, row: isize, column: isize) -> Option<usize> {
        if row < 0 || column < 0 || row as usize >= self.rows || column as usize >= self.columns {
            return None;
        }
        let index = row as usize * self.columns + column as usize;
        (index < self.values.len()).then_some(index)
    }

    pub fn get(&self, row: isize, column: isize) -> f64 {
        self.offset(row, column)
            .map_or(self.nodata, |index| self.values[index])
    }

    pub fn set(&mut self, row: isize, column: isize, value: f64) {
        if let Some(index) = self.offset(row, column) {
            self.values[index] = value;
        }
    }

    pub fn increment(&mut self, row: isize, column: isize, delta: f64) {
        if let Some(index) = self.offset(row, column) {
            self.values[index] += delta;
        }
    }

    pub fn decrement(&mut self, row: isize, column: isize, delta: f64) {
        self.increment(row, column, -delta);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_fill() {
        let a2d = Array2D::new(100, 200, -999.0, Some(0.0)).unwrap();
        assert_eq!(a2d.rows(), 100);
        assert_eq!(a2d.columns(), 200);
        assert_eq!(a2d.get(0, 0), 0.0);
        assert_eq!(a2d.get(99, 199), 0.0);
    }

    #[test]
    fn test_out_of_range_reads_nodata() {
        let a2d = Array2D::new(100, 200, -999.0, Some(0.0)).unwrap();
        assert_eq!(a2d.get(-10, -10), -999.0);
        assert_eq!(a2d.get(101, 201), -999.0);
        assert_eq!(a2d.get(100, 0), -999.0);
    }

    #[test]
    fn test_overflowing_size_rejected() {
        assert!(matches!(
            Array2D::new(usize::MAX, 2, -1.0, None),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_default_nodata_fill() {
        let a2d = Array2D::with_default_nodata(2, 2).unwrap();
        assert_eq!(a2d.nodata(), -32768.0);
        assert_eq!(a2d.get(1, 1), -32768.0);
    }

    #[test]
    fn test_set_and_compound_updates() {
        let mut a2d = Array2D::new(100, 200, -999.0, Some(0.0)).unwrap();
        a2d.set(50, 50, 1.0);
        a2d.set(1, 1, 100.0);
        assert_eq!(a2d.get(50, 50), 1.0);
        assert_eq!(a2d.get(1, 1), 100.0);

        a2d.increment(50, 50, 1.0);
        assert_eq!(a2d.get(50, 50), 2.0);
        a2d.decrement(50, 50, 1.0);
        assert_eq!(a2d.get(50, 50), 1.0);
    }

    #[test]
    fn test_out_of_range_writes_dropped() {
        let mut a2d = Array2D::new(2, 2, -1.0, Some(0.0)).unwrap();
        a2d.set(-1, 0, 9.0);
        a2d.set(2, 2, 9.0);
        a2d.increment(0, 5, 9.0);
        assert_eq!(a2d, Array2D::new(2, 2, -1.0, Some(0.0)).unwrap());
    }
}
