//! Range clipping
//!
//! Clamps the valid cells of a raster into a window placed between its
//! minimum and maximum.

use std::path::Path;

use tracing::debug;

use super::Progress;
use crate::error::Result;
use crate::raster::{DeriveOptions, Raster};

/// Clip window as fractions of the value range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StretchConfig {
    /// Lower bound at `min + lower_fraction * (max - min)`
    pub lower_fraction: f64,
    /// Upper bound at `min + upper_fraction * (max - min)`
    pub upper_fraction: f64,
}

impl Default for StretchConfig {
    fn default() -> Self {
        Self {
            lower_fraction: 0.0,
            upper_fraction: 0.9,
        }
    }
}

/// Minimum and maximum of the valid cells, `None` when every cell is nodata
pub fn valid_range(raster: &Raster) -> Option<(f64, f64)> {
    let nodata = raster.nodata();
    raster
        .values()
        .iter()
        .copied()
        .filter(|&z| z != nodata)
        .fold(None, |range, z| match range {
            None => Some((z, z)),
            Some((lo, hi)) => Some((lo.min(z), hi.max(z))),
        })
}

/// Derives a raster at `output` holding `input` clamped to the clip window
///
/// Nodata cells stay nodata. The output is not saved.
pub fn clip_to_range<P: AsRef<Path>>(
    input: &Raster,
    output: P,
    config: StretchConfig,
) -> Result<Raster> {
    let mut clipped = Raster::derive(output, input, DeriveOptions::default())?;
    let Some((minimum, maximum)) = valid_range(input) else {
        return Ok(clipped);
    };

    let span = maximum - minimum;
    let lower = minimum + config.lower_fraction * span;
    let upper = minimum + config.upper_fraction * span;
    debug!(lower, upper, "Clip window");

    let mut progress = Progress::new(input.rows());
    for row in 0..input.rows() {
        for column in 0..input.columns() {
            let (r, c) = (row as isize, column as isize);
            let z = input.get(r, c);
            let value = if z == input.nodata() {
                clipped.nodata()
            } else if z < lower {
                lower
            } else if z > upper {
                upper
            } else {
                z
            };
            clipped.set(r, c, value);
        }
        if let Some(percent) = progress.update(row) {
            debug!(percent, "Clipping");
        }
    }

    Ok(clipped)
}
