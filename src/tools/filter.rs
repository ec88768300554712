//! Edge-preserving smoothing filter
//!
//! Each valid cell becomes a weighted mean of its square neighbourhood.
//! A neighbour's weight falls linearly with its value difference from the
//! centre cell and reaches zero at `threshold`, so steep breaks are kept.
//! Neighbours outside the grid read as nodata and are skipped.

use std::path::Path;

use tracing::debug;

use super::Progress;
use crate::error::{Error, Result};
use crate::raster::{DeriveOptions, Raster};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    /// Window side length in cells
    pub size: usize,
    /// Value difference at which a neighbour stops contributing
    pub threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            size: 7,
            threshold: 10.0,
        }
    }
}

impl FilterConfig {
    /// The window must have a centre cell
    fn validate(&self) -> Result<()> {
        if self.size % 2 == 0 {
            return Err(Error::InvalidParameter(format!(
                "Filter size must be odd and positive, got {}",
                self.size
            )));
        }
        Ok(())
    }

    /// Row/column offsets of every cell in the window, centre included
    fn offsets(&self) -> Vec<(isize, isize)> {
        let mid = (self.size / 2) as isize;
        let size = self.size as isize;
        (0..size)
            .flat_map(|r| (0..size).map(move |c| (r - mid, c - mid)))
            .collect()
    }
}

fn smooth_cell(
    input: &Raster,
    row: isize,
    column: isize,
    z: f64,
    offsets: &[(isize, isize)],
    threshold: f64,
) -> f64 {
    let nodata = input.nodata();
    let mut weighted = 0.0;
    let mut sum_w = 0.0;

    for &(dy, dx) in offsets {
        let zn = input.get(row + dy, column + dx);
        if zn == nodata {
            continue;
        }
        let diff = (zn - z).abs();
        if diff < threshold {
            let w = 1.0 - diff / threshold;
            weighted += zn * w;
            sum_w += w;
        }
    }

    if sum_w > 0.0 {
        weighted / sum_w
    } else {
        z
    }
}

/// Derives a smoothed copy of `input` at `output`; the output is not saved
pub fn smooth<P: AsRef<Path>>(input: &Raster, output: P, config: FilterConfig) -> Result<Raster> {
    config.validate()?;
    let mut smoothed = Raster::derive(output, input, DeriveOptions::default())?;
    let offsets = config.offsets();
    let mut progress = Progress::new(input.rows());

    for row in 0..input.rows() {
        let r = row as isize;
        for column in 0..input.columns() as isize {
            let z = input.get(r, column);
            if z != input.nodata() {
                let value = smooth_cell(input, r, column, z, &offsets, config.threshold);
                smoothed.set(r, column, value);
            }
        }
        if let Some(percent) = progress.update(row) {
            debug!(percent, "Smoothing");
        }
    }

    Ok(smoothed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: &[&[f64]]) -> Raster {
        let mut raster = Raster::create("in.dep", values.len(), values[0].len(), -1.0).unwrap();
        for (r, row) in values.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                raster.set(r as isize, c as isize, v);
            }
        }
        raster
    }

    #[test]
    fn test_offsets_cover_window() {
        let offsets = FilterConfig { size: 3, threshold: 1.0 }.offsets();
        assert_eq!(offsets.len(), 9);
        assert_eq!(offsets[0], (-1, -1));
        assert_eq!(offsets[4], (0, 0));
        assert_eq!(offsets[8], (1, 1));
    }

    #[test]
    fn test_even_or_zero_size_rejected() {
        let input = grid(&[&[1.0, 2.0], &[3.0, 4.0]]);
        for size in [0, 4] {
            let config = FilterConfig { size, threshold: 10.0 };
            assert!(matches!(
                smooth(&input, "out.dep", config),
                Err(Error::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_flat_surface_unchanged() {
        let input = grid(&[&[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0]]);
        let output = smooth(&input, "out.dep", FilterConfig::default()).unwrap();
        assert_eq!(output, input);
    }

    #[test]
    fn test_weights_by_difference() {
        let input = grid(&[&[0.0, 2.0]]);
        let config = FilterConfig { size: 3, threshold: 4.0 };
        let output = smooth(&input, "out.dep", config).unwrap();
        // centre 0: self weight 1, neighbour 2 weight 0.5 -> (0 + 1) / 1.5
        assert!((output.get(0, 0) - 2.0 / 3.0).abs() < 1e-12);
        // centre 2: self weight 1, neighbour 0 weight 0.5 -> (2 + 0) / 1.5
        assert!((output.get(0, 1) - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_breaks_beyond_threshold_preserved() {
        let input = grid(&[&[0.0, 100.0]]);
        let output = smooth(&input, "out.dep", FilterConfig { size: 3, threshold: 10.0 }).unwrap();
        assert_eq!(output.get(0, 0), 0.0);
        assert_eq!(output.get(0, 1), 100.0);
    }

    #[test]
    fn test_nodata_cells_stay_nodata() {
        let input = grid(&[&[-1.0, 3.0], &[3.0, 3.0]]);
        let output = smooth(&input, "out.dep", FilterConfig::default()).unwrap();
        assert_eq!(output.get(0, 0), -1.0);
        assert_eq!(output.get(1, 1), 3.0);
    }
}
