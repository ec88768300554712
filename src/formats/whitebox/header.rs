//! Header (`.dep`) text format
//!
//! A header is a sequence of `Key:\tvalue` lines. Reading accepts keys in
//! any order and any letter case, and skips lines it does not understand
//! so that header dialects with extra fields still load. Writing always
//! emits the same fixed key order.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::ByteOrder;
use crate::types::{DataType, Dimensions, Extent};

/// Nodata value used when a header does not specify one
pub const DEFAULT_NODATA: f64 = -32768.0;

/// Geospatial, encoding and display metadata of a raster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterHeader {
    pub rows: usize,
    pub columns: usize,
    pub stacks: u32,
    pub extent: Extent,
    /// Cell width, `(east - west) / columns`
    pub resolution_x: f64,
    /// Cell height, `(north - south) / rows`
    pub resolution_y: f64,
    pub nodata: f64,
    pub data_type: DataType,
    pub byte_order: ByteOrder,
    pub data_scale: String,
    pub z_units: String,
    pub xy_units: String,
    pub projection: String,
    pub palette: String,
    pub palette_nonlinearity: f64,
    pub minimum: f64,
    pub maximum: f64,
    /// `+inf` while unset
    pub display_minimum: f64,
    /// `-inf` while unset
    pub display_maximum: f64,
    pub metadata: Vec<String>,
}

impl Default for RasterHeader {
    fn default() -> Self {
        Self {
            rows: 0,
            columns: 0,
            stacks: 1,
            extent: Extent::default(),
            resolution_x: 0.0,
            resolution_y: 0.0,
            nodata: DEFAULT_NODATA,
            data_type: DataType::F32,
            byte_order: ByteOrder::LittleEndian,
            data_scale: "continuous".to_string(),
            z_units: "not specified".to_string(),
            xy_units: "not specified".to_string(),
            projection: "not specified".to_string(),
            palette: "spectrum.plt".to_string(),
            palette_nonlinearity: 1.0,
            minimum: f64::INFINITY,
            maximum: f64::NEG_INFINITY,
            display_minimum: f64::INFINITY,
            display_maximum: f64::NEG_INFINITY,
            metadata: Vec::new(),
        }
    }
}

/// Recognised header keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderKey {
    DisplayMin,
    DisplayMax,
    Min,
    Max,
    North,
    South,
    East,
    West,
    Rows,
    Cols,
    Stacks,
    DataType,
    XyUnits,
    ZUnits,
    Projection,
    DataScale,
    PreferredPalette,
    PaletteNonlinearity,
    NoData,
    ByteOrder,
    Metadata,
}

/// Keys are matched on the end of the key part, first hit wins. Longer keys
/// that end in a shorter one ("display min" / "min") must come first.
const KEY_TABLE: &[(&str, HeaderKey)] = &[
    ("display min", HeaderKey::DisplayMin),
    ("display max", HeaderKey::DisplayMax),
    ("min", HeaderKey::Min),
    ("max", HeaderKey::Max),
    ("north", HeaderKey::North),
    ("south", HeaderKey::South),
    ("east", HeaderKey::East),
    ("west", HeaderKey::West),
    ("rows", HeaderKey::Rows),
    ("cols", HeaderKey::Cols),
    ("stacks", HeaderKey::Stacks),
    ("data type", HeaderKey::DataType),
    ("xy units", HeaderKey::XyUnits),
    ("z units", HeaderKey::ZUnits),
    ("projection", HeaderKey::Projection),
    ("data scale", HeaderKey::DataScale),
    ("preferred palette", HeaderKey::PreferredPalette),
    ("palette nonlinearity", HeaderKey::PaletteNonlinearity),
    ("nodata", HeaderKey::NoData),
    ("byte order", HeaderKey::ByteOrder),
];

impl HeaderKey {
    /// Any key mentioning "metadata" is an annotation line
    fn lookup(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        KEY_TABLE
            .iter()
            .find(|(name, _)| key.ends_with(name))
            .map(|&(_, field)| field)
            .or_else(|| key.contains("metadata").then_some(HeaderKey::Metadata))
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str, line: usize) -> Result<T> {
    value.parse().map_err(|_| {
        Error::InvalidFormat(format!(
            "Invalid value '{}' for '{}' on header line {}",
            value, key, line
        ))
    })
}

impl RasterHeader {
    /// Creates a header with default metadata for the given dimensions
    pub fn with_dimensions(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.columns)
    }

    /// Recomputes `resolution_x`/`resolution_y` from the extent and dimensions
    pub fn update_resolution(&mut self) {
        self.resolution_x = self.extent.width() / self.columns as f64;
        self.resolution_y = self.extent.height() / self.rows as f64;
    }

    /// Parses a header from text
    pub fn decode<R: BufRead>(reader: R) -> Result<Self> {
        let mut header = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let field = line.split_once(':').and_then(|(key, value)| {
                HeaderKey::lookup(key).map(|field| (field, key.trim(), value.trim()))
            });

            match field {
                Some((field, key, value)) => header.apply(field, key, value, index + 1)?,
                None => {
                    debug!(line = index + 1, content = line, "Ignoring unrecognised header line")
                }
            }
        }

        header.update_resolution();
        Ok(header)
    }

    fn apply(&mut self, field: HeaderKey, key: &str, value: &str, line: usize) -> Result<()> {
        match field {
            HeaderKey::DisplayMin => self.display_minimum = parse_number(value, key, line)?,
            HeaderKey::DisplayMax => self.display_maximum = parse_number(value, key, line)?,
            HeaderKey::Min => self.minimum = parse_number(value, key, line)?,
            HeaderKey::Max => self.maximum = parse_number(value, key, line)?,
            HeaderKey::North => self.extent.north = parse_number(value, key, line)?,
            HeaderKey::South => self.extent.south = parse_number(value, key, line)?,
            HeaderKey::East => self.extent.east = parse_number(value, key, line)?,
            HeaderKey::West => self.extent.west = parse_number(value, key, line)?,
            HeaderKey::Rows => self.rows = parse_number(value, key, line)?,
            HeaderKey::Cols => self.columns = parse_number(value, key, line)?,
            HeaderKey::Stacks => self.stacks = parse_number(value, key, line)?,
            HeaderKey::DataType => self.data_type = DataType::from_header_token(value)?,
            HeaderKey::XyUnits => self.xy_units = value.to_string(),
            HeaderKey::ZUnits => self.z_units = value.to_string(),
            HeaderKey::Projection => self.projection = value.to_string(),
            HeaderKey::DataScale => self.data_scale = value.to_lowercase(),
            HeaderKey::PreferredPalette => self.palette = value.to_string(),
            HeaderKey::PaletteNonlinearity => {
                self.palette_nonlinearity = parse_number(value, key, line)?
            }
            HeaderKey::NoData => self.nodata = parse_number(value, key, line)?,
            HeaderKey::ByteOrder => self.byte_order = ByteOrder::from_header_token(value),
            HeaderKey::Metadata => self.metadata.push(value.to_string()),
        }
        Ok(())
    }

    /// Writes the header in the canonical key order
    pub fn encode<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "Min:\t{}", self.minimum)?;
        writeln!(writer, "Max:\t{}", self.maximum)?;
        writeln!(writer, "North:\t{}", self.extent.north)?;
        writeln!(writer, "South:\t{}", self.extent.south)?;
        writeln!(writer, "East:\t{}", self.extent.east)?;
        writeln!(writer, "West:\t{}", self.extent.west)?;
        writeln!(writer, "Cols:\t{}", self.columns)?;
        writeln!(writer, "Rows:\t{}", self.rows)?;
        writeln!(writer, "Stacks:\t{}", self.stacks)?;
        writeln!(writer, "Data Type:\t{}", self.data_type.name())?;
        writeln!(writer, "Z Units:\t{}", self.z_units)?;
        writeln!(writer, "XY Units:\t{}", self.xy_units)?;
        writeln!(writer, "Projection:\t{}", self.projection)?;
        writeln!(writer, "Data Scale:\t{}", self.data_scale)?;
        writeln!(writer, "Display Min:\t{}", self.display_minimum)?;
        writeln!(writer, "Display Max:\t{}", self.display_maximum)?;
        writeln!(writer, "Preferred Palette:\t{}", self.palette.replace(".pal", ".plt"))?;
        writeln!(writer, "NoData:\t{}", self.nodata)?;
        writeln!(writer, "Byte Order:\t{}", self.byte_order.header_token())?;
        writeln!(writer, "Palette Nonlinearity:\t{}", self.palette_nonlinearity)?;
        for entry in &self.metadata {
            writeln!(writer, "Metadata Entry:\t{}", entry.replace(':', ";"))?;
        }
        Ok(())
    }

    /// Reads and parses a header file
    pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let header = Self::decode(BufReader::new(file))?;
        debug!(
            path = %path.as_ref().display(),
            rows = header.rows,
            columns = header.columns,
            data_type = header.data_type.name(),
            "Read raster header"
        );
        Ok(header)
    }

    /// Writes the header to a file, replacing any existing content
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        self.encode(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
