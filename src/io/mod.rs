//! I/O utilities for whitebox-raster
//!
//! Provides the byte-order primitives used by the binary data codec.

pub mod byte_order;

pub use byte_order::{ByteOrder, ByteOrderHandler};
