//! Byte order (endianness) handling
//!
//! Provides utilities for reading and writing multi-byte values in either
//! byte order. Whitebox data files carry their byte order in the header,
//! so the handler is chosen per raster rather than detected from the stream.

use std::io::{Read, Result, Write};

use serde::Serialize;

/// Represents the byte order (endianness) of binary data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ByteOrder {
    /// Little-endian byte order (least significant byte first)
    LittleEndian,
    /// Big-endian byte order (most significant byte first)
    BigEndian,
}

const LITTLE_ENDIAN_HINTS: [&str; 4] = ["little_endian", "least", "lsb", "little"];

impl ByteOrder {
    /// Interprets a header `Byte Order` token
    ///
    /// Any token mentioning little-endianness selects little-endian;
    /// everything else is treated as big-endian.
    pub fn from_header_token(token: &str) -> Self {
        let token = token.to_lowercase();
        if LITTLE_ENDIAN_HINTS.iter().any(|hint| token.contains(hint)) {
            ByteOrder::LittleEndian
        } else {
            ByteOrder::BigEndian
        }
    }

    /// Canonical token written to header files
    pub fn header_token(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "LITTLE_ENDIAN",
            ByteOrder::BigEndian => "BIG_ENDIAN",
        }
    }

    /// Creates a handler for this byte order
    pub fn handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndian),
            ByteOrder::BigEndian => Box::new(BigEndian),
        }
    }
}

/// Trait for reading and writing typed values with a specific byte order
pub trait ByteOrderHandler: Send + Sync {
    /// Reads a signed 8-bit integer
    fn read_i8(&self, reader: &mut dyn Read) -> Result<i8> {
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf)?;
        Ok(i8::from_ne_bytes(buf))
    }

    /// Reads a signed 16-bit integer
    fn read_i16(&self, reader: &mut dyn Read) -> Result<i16>;

    /// Reads a signed 32-bit integer
    fn read_i32(&self, reader: &mut dyn Read) -> Result<i32>;

    /// Reads a 32-bit floating point number
    fn read_f32(&self, reader: &mut dyn Read) -> Result<f32>;

    /// Reads a 64-bit floating point number
    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64>;

    /// Writes a signed 8-bit integer
    fn write_i8(&self, writer: &mut dyn Write, value: i8) -> Result<()> {
        writer.write_all(&value.to_ne_bytes())
    }

    /// Writes a signed 16-bit integer
    fn write_i16(&self, writer: &mut dyn Write, value: i16) -> Result<()>;

    /// Writes a signed 32-bit integer
    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()>;

    /// Writes a 32-bit floating point number
    fn write_f32(&self, writer: &mut dyn Write, value: f32) -> Result<()>;

    /// Writes a 64-bit floating point number
    fn write_f64(&self, writer: &mut dyn Write, value: f64) -> Result<()>;
}

struct LittleEndian;

impl ByteOrderHandler for LittleEndian {
    fn read_i16(&self, reader: &mut dyn Read) -> Result<i16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(i16::from_le_bytes(buf))
    }

    fn read_i32(&self, reader: &mut dyn Read) -> Result<i32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(i32::from_le_bytes(buf))
    }

    fn read_f32(&self, reader: &mut dyn Read) -> Result<f32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(f32::from_le_bytes(buf))
    }

    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(f64::from_le_bytes(buf))
    }

    fn write_i16(&self, writer: &mut dyn Write, value: i16) -> Result<()> {
        writer.write_all(&value.to_le_bytes())
    }

    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()> {
        writer.write_all(&value.to_le_bytes())
    }

    fn write_f32(&self, writer: &mut dyn Write, value: f32) -> Result<()> {
        writer.write_all(&value.to_le_bytes())
    }

    fn write_f64(&self, writer: &mut dyn Write, value: f64) -> Result<()> {
        writer.write_all(&value.to_le_bytes())
    }
}

struct BigEndian;

impl ByteOrderHandler for BigEndian {
    fn read_i16(&self, reader: &mut dyn Read) -> Result<i16> {
        let mut buf = [0u8; 2];
        reader.read_exact(&mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }

    fn read_i32(&self, reader: &mut dyn Read) -> Result<i32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(i32::from_be_bytes(buf))
    }

    fn read_f32(&self, reader: &mut dyn Read) -> Result<f32> {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(f32::from_be_bytes(buf))
    }

    fn read_f64(&self, reader: &mut dyn Read) -> Result<f64> {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(f64::from_be_bytes(buf))
    }

    fn write_i16(&self, writer: &mut dyn Write, value: i16) -> Result<()> {
        writer.write_all(&value.to_be_bytes())
    }

    fn write_i32(&self, writer: &mut dyn Write, value: i32) -> Result<()> {
        writer.write_all(&value.to_be_bytes())
    }

    fn write_f32(&self, writer: &mut dyn Write, value: f32) -> Result<()> {
        writer.write_all(&value.to_be_bytes())
    }

    fn write_f64(&self, writer: &mut dyn Write, value: f64) -> Result<()> {
        writer.write_all(&value.to_be_bytes())
    }
}
