//! Point sampling from CSV
//!
//! Reads `x,y[,name]` records, looks up the cell containing each point and
//! writes one `x,y,name,row,column,value` record per input. Points outside
//! the grid or on nodata cells get an empty value.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::raster::Raster;

#[derive(Debug, Deserialize)]
pub struct PointRecord {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SampleRecord {
    pub x: f64,
    pub y: f64,
    pub name: Option<String>,
    pub row: isize,
    pub column: isize,
    pub value: Option<f64>,
}

/// Samples the cell under a single point
pub fn sample(raster: &Raster, point: PointRecord) -> SampleRecord {
    let row = raster.row_from_y(point.y);
    let column = raster.column_from_x(point.x);
    let z = raster.get(row, column);

    SampleRecord {
        x: point.x,
        y: point.y,
        name: point.name,
        row,
        column,
        value: (z != raster.nodata()).then_some(z),
    }
}

/// Samples every point in `points` and writes the results as CSV
///
/// Returns the number of points that hit a valid cell.
pub fn sample_points<R: Read, W: Write>(raster: &Raster, points: R, output: W) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(points);
    let mut writer = csv::Writer::from_writer(output);

    let mut total = 0;
    let mut hits = 0;
    for record in reader.deserialize::<PointRecord>() {
        let result = sample(raster, record?);
        total += 1;
        if result.value.is_some() {
            hits += 1;
        }
        writer.serialize(result)?;
    }
    writer.flush()?;

    debug!(total, hits, "Sampled points");
    Ok(hits)
}
