//! In-memory raster backed by a Whitebox file pair
//!
//! A [`Raster`] owns its header metadata and a dense row-major buffer of
//! `rows * columns` cells. Cells are read and written through
//! [`Raster::get`] and [`Raster::set`], which never fail: reads outside the
//! grid return the nodata value and writes outside the grid are dropped.
//! Neighbourhood operations can therefore index past the edges freely.

mod ops;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::formats::whitebox::{data, FilePair, RasterHeader};
use crate::io::ByteOrder;
use crate::types::{DataType, Dimensions, Extent};

pub use ops::Operand;

/// Where a derived raster takes its framing from
#[derive(Debug)]
pub enum RasterSource<'a> {
    /// An already loaded raster
    Raster(&'a Raster),
    /// A header or data path, loaded before deriving
    Path(PathBuf),
}

impl<'a> From<&'a Raster> for RasterSource<'a> {
    fn from(raster: &'a Raster) -> Self {
        RasterSource::Raster(raster)
    }
}

impl From<&Path> for RasterSource<'_> {
    fn from(path: &Path) -> Self {
        RasterSource::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for RasterSource<'_> {
    fn from(path: PathBuf) -> Self {
        RasterSource::Path(path)
    }
}

impl From<&str> for RasterSource<'_> {
    fn from(path: &str) -> Self {
        RasterSource::Path(PathBuf::from(path))
    }
}

/// Overrides applied when deriving a raster from another one
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DeriveOptions {
    pub data_type: Option<DataType>,
    pub nodata: Option<f64>,
    /// Fill value for every cell; the nodata value when `None`
    pub initial_value: Option<f64>,
}

impl DeriveOptions {
    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn with_nodata(mut self, nodata: f64) -> Self {
        self.nodata = Some(nodata);
        self
    }

    pub fn with_initial_value(mut self, value: f64) -> Self {
        self.initial_value = Some(value);
        self
    }
}

/// A single-band raster layer
#[derive(Debug, Clone)]
pub struct Raster {
    files: FilePair,
    header: RasterHeader,
    values: Vec<f64>,
}

impl Raster {
    /// Loads a raster from either file of a `.dep`/`.tas` pair
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let files = FilePair::from_path(path)?;
        let header = RasterHeader::read_file(files.header())?;
        let dims = header.dimensions();
        let count = dims.checked_cell_count().ok_or_else(|| {
            Error::InvalidFormat(format!("Header dimensions {} overflow the cell count", dims))
        })?;
        let values = data::read_file(files.data(), header.data_type, header.byte_order, count)?;

        info!(
            path = %files.header().display(),
            rows = header.rows,
            columns = header.columns,
            "Loaded raster"
        );

        Ok(Self { files, header, values })
    }

    /// Creates a blank raster with every cell set to `nodata`
    ///
    /// Extent and descriptive metadata keep their defaults until set.
    pub fn create<P: AsRef<Path>>(
        path: P,
        rows: usize,
        columns: usize,
        nodata: f64,
    ) -> Result<Self> {
        let files = FilePair::from_path(path)?;
        let dims = Dimensions::new(rows, columns);
        let count = dims
            .checked_cell_count()
            .filter(|_| !dims.is_empty())
            .ok_or(Error::InvalidDimensions(dims))?;

        let header = RasterHeader {
            nodata,
            ..RasterHeader::with_dimensions(rows, columns)
        };

        Ok(Self {
            files,
            header,
            values: vec![nodata; count],
        })
    }

    /// Creates a raster with the framing of `source` and a fresh buffer
    ///
    /// Extent, dimensions, resolution, byte order, palette, projection,
    /// units and data scale are copied. Stacks and palette nonlinearity are
    /// reset to 1, extrema and display range are unset and annotations are
    /// empty.
    pub fn derive<'a, P, S>(path: P, source: S, options: DeriveOptions) -> Result<Self>
    where
        P: AsRef<Path>,
        S: Into<RasterSource<'a>>,
    {
        let files = FilePair::from_path(path)?;

        let loaded;
        let source = match source.into() {
            RasterSource::Raster(raster) => raster,
            RasterSource::Path(path) => {
                loaded = Raster::open(&path).map_err(|e| Error::InvalidSource {
                    path,
                    reason: Box::new(e),
                })?;
                &loaded
            }
        };

        let dims = source.dimensions();
        if dims.is_empty() {
            return Err(Error::InvalidDimensions(dims));
        }

        let src = &source.header;
        let header = RasterHeader {
            rows: src.rows,
            columns: src.columns,
            stacks: 1,
            extent: src.extent,
            resolution_x: src.resolution_x,
            resolution_y: src.resolution_y,
            nodata: options.nodata.unwrap_or(src.nodata),
            data_type: options.data_type.unwrap_or(src.data_type),
            byte_order: src.byte_order,
            data_scale: src.data_scale.clone(),
            z_units: src.z_units.clone(),
            xy_units: src.xy_units.clone(),
            projection: src.projection.clone(),
            palette: src.palette.clone(),
            palette_nonlinearity: 1.0,
            ..RasterHeader::default()
        };

        let fill = options.initial_value.unwrap_or(header.nodata);

        Ok(Self {
            files,
            values: vec![fill; dims.cell_count()],
            header,
        })
    }

    /// Writes header and data to the current file pair
    ///
    /// Extrema are rescanned first; an unset display range takes them over.
    pub fn save(&mut self) -> Result<()> {
        self.recompute_extrema();
        if self.header.display_maximum == f64::NEG_INFINITY {
            self.header.display_maximum = self.header.maximum;
        }
        if self.header.display_minimum == f64::INFINITY {
            self.header.display_minimum = self.header.minimum;
        }

        self.header.write_file(self.files.header())?;
        data::write_file(
            self.files.data(),
            self.header.data_type,
            self.header.byte_order,
            &self.values,
        )?;

        info!(
            path = %self.files.header().display(),
            minimum = self.header.minimum,
            maximum = self.header.maximum,
            "Saved raster"
        );
        Ok(())
    }

    /// Rebinds the raster to a new file pair and saves it there
    pub fn save_as<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.files = FilePair::from_path(path)?;
        self.save()
    }

    pub fn files(&self) -> &FilePair {
        &self.files
    }

    pub fn header(&self) -> &RasterHeader {
        &self.header
    }

    pub fn rows(&self) -> usize {
        self.header.rows
    }

    pub fn columns(&self) -> usize {
        self.header.columns
    }

    pub fn dimensions(&self) -> Dimensions {
        self.header.dimensions()
    }

    pub fn nodata(&self) -> f64 {
        self.header.nodata
    }

    pub fn minimum(&self) -> f64 {
        self.header.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.header.maximum
    }

    /// Cell values in row-major order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    fn offset(&self, row: isize, column: isize) -> Option<usize> {
        if row < 0 || column < 0 {
            return None;
        }
        let (row, column) = (row as usize, column as usize);
        if row >= self.header.rows || column >= self.header.columns {
            return None;
        }
        let index = row * self.header.columns + column;
        (index < self.values.len()).then_some(index)
    }

    /// Returns the cell value, or nodata outside the grid
    pub fn get(&self, row: isize, column: isize) -> f64 {
        match self.offset(row, column) {
            Some(index) => self.values[index],
            None => self.header.nodata,
        }
    }

    /// Sets the cell value; ignored outside the grid
    pub fn set(&mut self, row: isize, column: isize, value: f64) {
        if let Some(index) = self.offset(row, column) {
            self.values[index] = value;
        }
    }

    /// Adds `delta` to a single cell, regardless of nodata
    pub fn increment(&mut self, row: isize, column: isize, delta: f64) {
        if let Some(index) = self.offset(row, column) {
            self.values[index] += delta;
        }
    }

    /// Subtracts `delta` from a single cell, regardless of nodata
    pub fn decrement(&mut self, row: isize, column: isize, delta: f64) {
        self.increment(row, column, -delta);
    }

    /// Widens `minimum`/`maximum` to cover every non-nodata cell
    ///
    /// Existing extrema are not cleared; call [`Raster::reset_extrema`]
    /// first for a from-scratch scan.
    pub fn recompute_extrema(&mut self) {
        let nodata = self.header.nodata;
        for &z in self.values.iter().filter(|&&z| z != nodata) {
            if z < self.header.minimum {
                self.header.minimum = z;
            }
            if z > self.header.maximum {
                self.header.maximum = z;
            }
        }
    }

    pub fn reset_extrema(&mut self) {
        self.header.minimum = f64::INFINITY;
        self.header.maximum = f64::NEG_INFINITY;
    }

    /// X coordinate of a column's cell centre
    pub fn x_from_column(&self, column: isize) -> f64 {
        let res = self.header.resolution_x;
        self.header.extent.west + res / 2.0 + column as f64 * res
    }

    /// Y coordinate of a row's cell centre
    pub fn y_from_row(&self, row: isize) -> f64 {
        let res = self.header.resolution_y;
        self.header.extent.north - res / 2.0 - row as f64 * res
    }

    /// Column containing `x`; not clamped to the grid
    pub fn column_from_x(&self, x: f64) -> isize {
        ((x - self.header.extent.west) / self.header.resolution_x).floor() as isize
    }

    /// Row containing `y`; not clamped to the grid
    pub fn row_from_y(&self, y: f64) -> isize {
        ((self.header.extent.north - y) / self.header.resolution_y).floor() as isize
    }

    /// Replaces the extent and recomputes the resolution
    pub fn set_extent(&mut self, extent: Extent) {
        self.header.extent = extent;
        self.header.update_resolution();
    }

    pub fn set_display_range(&mut self, minimum: f64, maximum: f64) {
        self.header.display_minimum = minimum;
        self.header.display_maximum = maximum;
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        self.header.data_type = data_type;
    }

    pub fn set_byte_order(&mut self, byte_order: ByteOrder) {
        self.header.byte_order = byte_order;
    }

    pub fn set_z_units(&mut self, units: impl Into<String>) {
        self.header.z_units = units.into();
    }

    pub fn set_xy_units(&mut self, units: impl Into<String>) {
        self.header.xy_units = units.into();
    }

    pub fn set_projection(&mut self, projection: impl Into<String>) {
        self.header.projection = projection.into();
    }

    pub fn set_data_scale(&mut self, scale: impl Into<String>) {
        self.header.data_scale = scale.into();
    }

    pub fn set_palette(&mut self, palette: impl Into<String>) {
        self.header.palette = palette.into();
    }

    pub fn set_palette_nonlinearity(&mut self, nonlinearity: f64) {
        self.header.palette_nonlinearity = nonlinearity;
    }

    /// Appends a free-text annotation
    pub fn add_metadata(&mut self, entry: impl Into<String>) {
        self.header.metadata.push(entry.into());
    }
}
