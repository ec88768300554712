//! Elementwise raster arithmetic
//!
//! Two families operate in place over every cell:
//!
//! - `*_assign` applies the operation unconditionally, nodata cells
//!   included.
//! - `*_nodata` skips cells that are nodata. With a raster operand a cell
//!   is updated when either side holds data, and the raw nodata value of
//!   the other side takes part in the arithmetic as an ordinary number.
//!
//! Raster operands must have the same dimensions; a mismatch leaves both
//! rasters untouched.

use std::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

use super::Raster;
use crate::error::{Error, Result};

/// Right-hand side of an elementwise operation
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Raster(&'a Raster),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Raster> for Operand<'a> {
    fn from(raster: &'a Raster) -> Self {
        Operand::Raster(raster)
    }
}

impl Raster {
    fn check_dimensions(&self, other: &Raster) -> Result<()> {
        if self.dimensions() != other.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                found: other.dimensions(),
            });
        }
        Ok(())
    }

    fn apply_scalar(&mut self, value: f64, op: impl Fn(f64, f64) -> f64) {
        for cell in &mut self.values {
            *cell = op(*cell, value);
        }
    }

    fn apply_all(&mut self, rhs: Operand<'_>, op: impl Fn(f64, f64) -> f64) -> Result<&mut Self> {
        match rhs {
            Operand::Scalar(value) => self.apply_scalar(value, op),
            Operand::Raster(other) => {
                self.check_dimensions(other)?;
                for (cell, &value) in self.values.iter_mut().zip(&other.values) {
                    *cell = op(*cell, value);
                }
            }
        }
        Ok(self)
    }

    fn apply_valid(
        &mut self,
        rhs: Operand<'_>,
        op: impl Fn(f64, f64) -> f64,
    ) -> Result<&mut Self> {
        let nodata = self.header.nodata;
        match rhs {
            Operand::Scalar(value) => {
                for cell in self.values.iter_mut().filter(|cell| **cell != nodata) {
                    *cell = op(*cell, value);
                }
            }
            Operand::Raster(other) => {
                self.check_dimensions(other)?;
                let other_nodata = other.header.nodata;
                for (cell, &value) in self.values.iter_mut().zip(&other.values) {
                    if *cell != nodata || value != other_nodata {
                        *cell = op(*cell, value);
                    }
                }
            }
        }
        Ok(self)
    }

    /// Adds to every cell, nodata included
    pub fn add_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_all(rhs.into(), |a, b| a + b)
    }

    /// Subtracts from every cell, nodata included
    pub fn sub_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_all(rhs.into(), |a, b| a - b)
    }

    /// Multiplies every cell, nodata included
    pub fn mul_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_all(rhs.into(), |a, b| a * b)
    }

    /// Divides every cell, nodata included
    pub fn div_assign<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_all(rhs.into(), |a, b| a / b)
    }

    /// Adds to cells holding data
    pub fn add_nodata<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_valid(rhs.into(), |a, b| a + b)
    }

    /// Subtracts from cells holding data
    pub fn sub_nodata<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_valid(rhs.into(), |a, b| a - b)
    }

    /// Multiplies cells holding data
    pub fn mul_nodata<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_valid(rhs.into(), |a, b| a * b)
    }

    /// Divides cells holding data
    pub fn div_nodata<'a>(&mut self, rhs: impl Into<Operand<'a>>) -> Result<&mut Self> {
        self.apply_valid(rhs.into(), |a, b| a / b)
    }
}

impl AddAssign<f64> for Raster {
    fn add_assign(&mut self, rhs: f64) {
        self.apply_scalar(rhs, |a, b| a + b);
    }
}

impl SubAssign<f64> for Raster {
    fn sub_assign(&mut self, rhs: f64) {
        self.apply_scalar(rhs, |a, b| a - b);
    }
}

impl MulAssign<f64> for Raster {
    fn mul_assign(&mut self, rhs: f64) {
        self.apply_scalar(rhs, |a, b| a * b);
    }
}

impl DivAssign<f64> for Raster {
    fn div_assign(&mut self, rhs: f64) {
        self.apply_scalar(rhs, |a, b| a / b);
    }
}

impl PartialEq for Raster {
    /// Same shape and every cell equal; metadata is not compared
    fn eq(&self, other: &Self) -> bool {
        self.dimensions() == other.dimensions() && self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3, nodata -1, centre cell 5
    fn centre_five() -> Raster {
        let mut raster = Raster::create("ops.dep", 3, 3, -1.0).unwrap();
        raster.set(1, 1, 5.0);
        raster
    }

    fn filled(rows: usize, columns: usize, nodata: f64, value: f64) -> Raster {
        let mut raster = Raster::create("ops.dep", rows, columns, nodata).unwrap();
        for cell in &mut raster.values {
            *cell = value;
        }
        raster
    }

    #[test]
    fn test_add_nodata_scalar_skips_nodata() {
        let mut raster = centre_five();
        raster.add_nodata(10.0).unwrap();
        assert_eq!(raster.get(1, 1), 15.0);
        for (i, &v) in raster.values().iter().enumerate() {
            if i != 4 {
                assert_eq!(v, -1.0);
            }
        }
    }

    #[test]
    fn test_add_assign_scalar_touches_every_cell() {
        let mut raster = centre_five();
        raster.add_assign(10.0).unwrap();
        assert_eq!(raster.get(1, 1), 15.0);
        assert_eq!(raster.get(0, 0), 9.0);
        assert_eq!(raster.values().iter().filter(|&&v| v == 9.0).count(), 8);
    }

    #[test]
    fn test_std_compound_operators() {
        let mut raster = centre_five();
        raster *= 2.0;
        assert_eq!(raster.get(1, 1), 10.0);
        assert_eq!(raster.get(0, 0), -2.0);
        raster += 1.0;
        raster -= 3.0;
        raster /= 2.0;
        assert_eq!(raster.get(1, 1), 4.0);
        assert_eq!(raster.get(2, 2), -2.0);
    }

    #[test]
    fn test_std_operators_match_named_methods() {
        let mut via_std = centre_five();
        let mut via_named = centre_five();
        via_std += 0.5;
        via_std /= 4.0;
        via_named.add_assign(0.5).unwrap().div_assign(4.0).unwrap();
        assert_eq!(via_std.values(), via_named.values());
    }

    #[test]
    fn test_unconditional_raster_operands() {
        let mut a = filled(2, 2, -1.0, 6.0);
        let b = filled(2, 2, -1.0, 3.0);
        a.add_assign(&b).unwrap();
        assert!(a.values().iter().all(|&v| v == 9.0));
        a.sub_assign(&b).unwrap();
        a.mul_assign(&b).unwrap();
        a.div_assign(&b).unwrap();
        assert!(a.values().iter().all(|&v| v == 6.0));
    }

    #[test]
    fn test_nodata_aware_raster_combines_raw_sentinel() {
        let mut a = Raster::create("a.dep", 1, 3, -1.0).unwrap();
        let mut b = Raster::create("b.dep", 1, 3, -100.0).unwrap();
        a.set(0, 0, 4.0);
        b.set(0, 0, 2.0);
        a.set(0, 1, 4.0);
        b.set(0, 2, 2.0);

        a.add_nodata(&b).unwrap();
        // both hold data
        assert_eq!(a.get(0, 0), 6.0);
        // only a holds data: b's sentinel is added as a number
        assert_eq!(a.get(0, 1), -96.0);
        // only b holds data: a's sentinel is added as a number
        assert_eq!(a.get(0, 2), 1.0);
    }

    #[test]
    fn test_nodata_aware_raster_both_missing_untouched() {
        let mut a = filled(2, 2, -1.0, -1.0);
        let b = filled(2, 2, 0.0, 0.0);
        a.mul_nodata(&b).unwrap();
        assert!(a.values().iter().all(|&v| v == -1.0));
    }

    #[test]
    fn test_mul_nodata_scalar() {
        let mut raster = centre_five();
        raster.mul_nodata(3.0).unwrap().add_nodata(1.0).unwrap();
        assert_eq!(raster.get(1, 1), 16.0);
        assert_eq!(raster.get(0, 1), -1.0);
    }

    #[test]
    fn test_sub_and_div_nodata_scalar() {
        let mut raster = centre_five();
        raster.sub_nodata(1.0).unwrap();
        raster.div_nodata(2.0).unwrap();
        assert_eq!(raster.get(1, 1), 2.0);
        assert_eq!(raster.get(2, 0), -1.0);
    }

    #[test]
    fn test_dimension_mismatch_leaves_operands() {
        let mut a = filled(2, 3, -1.0, 1.0);
        let b = filled(3, 2, -1.0, 2.0);
        let before = a.values().to_vec();

        assert!(matches!(a.add_assign(&b), Err(Error::DimensionMismatch { .. })));
        assert!(matches!(a.mul_nodata(&b), Err(Error::DimensionMismatch { .. })));
        assert!(matches!(a.add_nodata(&b), Err(Error::DimensionMismatch { .. })));
        assert!(matches!(a.div_assign(&b), Err(Error::DimensionMismatch { .. })));
        assert_eq!(a.values(), before.as_slice());
        assert!(b.values().iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_equality() {
        let a = centre_five();
        let mut b = centre_five();
        assert_eq!(a, b);
        b.set(0, 0, 1.0);
        assert_ne!(a, b);
        assert_ne!(a, filled(9, 1, -1.0, -1.0));
    }
}
