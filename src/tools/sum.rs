//! Sum reduction over valid cells

use crate::array2d::Array2D;
use crate::raster::Raster;

/// Sums every cell that is not nodata
pub fn sum_valid(raster: &Raster) -> f64 {
    let nodata = raster.nodata();
    raster.values().iter().filter(|&&z| z != nodata).sum()
}

/// Sums every cell of a scratch array that is not nodata
pub fn sum_array(array: &Array2D) -> f64 {
    let mut total = 0.0;
    for row in 0..array.rows() as isize {
        for column in 0..array.columns() as isize {
            let z = array.get(row, column);
            if z != array.nodata() {
                total += z;
            }
        }
    }
    total
}
