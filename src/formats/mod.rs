//! Raster file formats

pub mod whitebox;
