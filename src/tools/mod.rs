//! Raster tools built on the public [`Raster`](crate::Raster) API
//!
//! Each tool reads an input raster through [`Raster::get`](crate::Raster::get)
//! and writes a derived output, so edge cells need no special handling.

pub mod filter;
pub mod sample;
pub mod stretch;
pub mod sum;

pub use filter::{smooth, FilterConfig};
pub use sample::sample_points;
pub use stretch::{clip_to_range, StretchConfig};
pub use sum::{sum_array, sum_valid};

/// Tracks whole-percent progress over the rows of a raster
pub(crate) struct Progress {
    rows: usize,
    last: Option<usize>,
}

impl Progress {
    pub(crate) fn new(rows: usize) -> Self {
        Self { rows, last: None }
    }

    /// Returns the new percentage when it changed after finishing `row`
    pub(crate) fn update(&mut self, row: usize) -> Option<usize> {
        let percent = 100 * (row + 1) / self.rows.max(1);
        if self.last == Some(percent) {
            return None;
        }
        self.last = Some(percent);
        Some(percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reports_changes_only() {
        let mut progress = Progress::new(200);
        assert_eq!(progress.update(0), Some(0));
        assert_eq!(progress.update(1), Some(1));
        assert_eq!(progress.update(2), None);
        assert_eq!(progress.update(199), Some(100));
    }
}
