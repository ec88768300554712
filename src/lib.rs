//! whitebox-raster - Whitebox `.dep`/`.tas` rasters for Rust
//!
//! whitebox-raster reads and writes single-band rasters stored as a text
//! header (`.dep`) plus a raw binary data file (`.tas`), and provides
//! nodata-aware cell access and arithmetic over them.
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use whitebox_raster::Raster;
//!
//! let raster = Raster::open("dem.dep")?;
//! println!("Size: {}", raster.dimensions());
//! let (row, column) = (raster.rows() as isize / 2, raster.columns() as isize / 2);
//! println!("Centre value: {}", raster.get(row, column));
//! # Ok::<(), whitebox_raster::Error>(())
//! ```
//!
//! ## Deriving and Saving
//!
//! ```no_run
//! use whitebox_raster::{DataType, DeriveOptions, Raster};
//!
//! let dem = Raster::open("dem.dep")?;
//! let options = DeriveOptions::default().with_data_type(DataType::F64);
//! let mut slope = Raster::derive("slope.dep", &dem, options)?;
//!
//! for row in 0..dem.rows() as isize {
//!     for col in 0..dem.columns() as isize {
//!         // out-of-range neighbours read as nodata
//!         let dz = dem.get(row, col + 1) - dem.get(row, col - 1);
//!         slope.set(row, col, dz);
//!     }
//! }
//! slope.add_nodata(1.0)?;
//! slope.save()?;
//! # Ok::<(), whitebox_raster::Error>(())
//! ```

pub mod array2d;
pub mod error;
pub mod formats;
pub mod io;
pub mod raster;
pub mod tools;
pub mod types;

pub use array2d::Array2D;
pub use error::{Error, Result};
pub use formats::whitebox::{FilePair, RasterHeader};
pub use io::ByteOrder;
pub use raster::{DeriveOptions, Operand, Raster, RasterSource};
pub use types::{DataType, Dimensions, Extent};
