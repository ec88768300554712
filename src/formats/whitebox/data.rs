//! Data (`.tas`) binary format
//!
//! The data file is a bare stream of `rows * columns` fixed-width cells in
//! row-major order. Width and interpretation come from the header's data
//! type, multi-byte cells follow the header's byte order.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::io::{ByteOrder, ByteOrderHandler};
use crate::types::DataType;

/// Upper bound on cells reserved ahead of decoding
const MAX_PREALLOCATED_CELLS: usize = 1 << 20;

/// Reads one cell and widens it to `f64`
fn read_cell(
    handler: &dyn ByteOrderHandler,
    data_type: DataType,
    reader: &mut dyn Read,
) -> io::Result<f64> {
    Ok(match data_type {
        DataType::F32 => handler.read_f32(reader)? as f64,
        DataType::F64 => handler.read_f64(reader)?,
        DataType::I16 => handler.read_i16(reader)? as f64,
        DataType::I8 => handler.read_i8(reader)? as f64,
        DataType::I32 => handler.read_i32(reader)? as f64,
    })
}

/// Narrows one cell to the stored width and writes it
fn write_cell(
    handler: &dyn ByteOrderHandler,
    data_type: DataType,
    writer: &mut dyn Write,
    value: f64,
) -> io::Result<()> {
    match data_type {
        DataType::F32 => handler.write_f32(writer, value as f32),
        DataType::F64 => handler.write_f64(writer, value),
        DataType::I16 => handler.write_i16(writer, value as i16),
        DataType::I8 => handler.write_i8(writer, value as i8),
        DataType::I32 => handler.write_i32(writer, value as i32),
    }
}

/// Decodes exactly `count` cells from the start of `reader`
///
/// Bytes past the last cell are ignored. A stream that ends early is a
/// format error naming the first cell that could not be read.
pub fn decode<R: Read>(
    reader: &mut R,
    data_type: DataType,
    byte_order: ByteOrder,
    count: usize,
) -> Result<Vec<f64>> {
    let handler = byte_order.handler();
    let mut values = Vec::with_capacity(count.min(MAX_PREALLOCATED_CELLS));

    for index in 0..count {
        match read_cell(handler.as_ref(), data_type, &mut *reader) {
            Ok(value) => values.push(value),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Err(Error::InvalidFormat(format!(
                    "Data truncated at cell {} of {} ({} bytes per cell)",
                    index,
                    count,
                    data_type.size()
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(values)
}

/// Encodes `values` in order with no header or padding
pub fn encode<W: Write>(
    writer: &mut W,
    data_type: DataType,
    byte_order: ByteOrder,
    values: &[f64],
) -> Result<()> {
    let handler = byte_order.handler();
    for &value in values {
        write_cell(handler.as_ref(), data_type, &mut *writer, value)?;
    }
    Ok(())
}

/// Reads `count` cells from a data file
///
/// A file shorter than `count` cells is rejected before anything is read.
pub fn read_file<P: AsRef<Path>>(
    path: P,
    data_type: DataType,
    byte_order: ByteOrder,
    count: usize,
) -> Result<Vec<f64>> {
    let file = File::open(path.as_ref())?;
    let expected = count
        .checked_mul(data_type.size())
        .and_then(|bytes| u64::try_from(bytes).ok())
        .ok_or_else(|| {
            Error::InvalidFormat(format!(
                "{} cells of {} bytes exceed the addressable size",
                count,
                data_type.size()
            ))
        })?;
    let actual = file.metadata()?.len();
    if actual < expected {
        return Err(Error::InvalidFormat(format!(
            "Data file holds {} bytes, {} cells need {}",
            actual, count, expected
        )));
    }

    let mut reader = BufReader::new(file);
    let values = decode(&mut reader, data_type, byte_order, count)?;
    debug!(
        path = %path.as_ref().display(),
        cells = count,
        data_type = data_type.name(),
        byte_order = byte_order.header_token(),
        "Read raster data"
    );
    Ok(values)
}

/// Writes all cells to a data file, replacing any existing content
pub fn write_file<P: AsRef<Path>>(
    path: P,
    data_type: DataType,
    byte_order: ByteOrder,
    values: &[f64],
) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    encode(&mut writer, data_type, byte_order, values)?;
    writer.flush()?;
    debug!(
        path = %path.as_ref().display(),
        cells = values.len(),
        bytes = values.len() * data_type.size(),
        "Wrote raster data"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_little_endian_f32() {
        let mut bytes = Vec::new();
        for v in [1.0f32, 2.0, 3.0, 4.0] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        assert_eq!(bytes.len(), 16);

        let values =
            decode(&mut Cursor::new(bytes), DataType::F32, ByteOrder::LittleEndian, 4).unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_decode_big_endian_i16() {
        let bytes = vec![0xFF, 0xFE, 0x01, 0x00];
        let values =
            decode(&mut Cursor::new(bytes), DataType::I16, ByteOrder::BigEndian, 2).unwrap();
        assert_eq!(values, vec![-2.0, 256.0]);
    }

    #[test]
    fn test_decode_signed_bytes() {
        let bytes = vec![0x7F, 0x80, 0xFF];
        let values =
            decode(&mut Cursor::new(bytes), DataType::I8, ByteOrder::BigEndian, 3).unwrap();
        assert_eq!(values, vec![127.0, -128.0, -1.0]);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut bytes = 7i32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let values =
            decode(&mut Cursor::new(bytes), DataType::I32, ByteOrder::LittleEndian, 1).unwrap();
        assert_eq!(values, vec![7.0]);
    }

    #[test]
    fn test_decode_truncated() {
        let bytes = vec![0u8; 12];
        let err = decode(&mut Cursor::new(bytes), DataType::F64, ByteOrder::LittleEndian, 2)
            .unwrap_err();
        match err {
            Error::InvalidFormat(msg) => assert!(msg.contains("cell 1 of 2")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_huge_count_reports_truncation() {
        let mut reader = Cursor::new(vec![0u8; 16]);
        let err =
            decode(&mut reader, DataType::F32, ByteOrder::LittleEndian, usize::MAX).unwrap_err();
        match err {
            Error::InvalidFormat(msg) => assert!(msg.contains("cell 4 of")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_read_file_rejects_short_file_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.tas");
        std::fs::write(&path, [0u8; 16]).unwrap();

        let err = read_file(&path, DataType::F32, ByteOrder::LittleEndian, 5).unwrap_err();
        match err {
            Error::InvalidFormat(msg) => assert!(msg.contains("holds 16 bytes")),
            other => panic!("unexpected error: {:?}", other),
        }

        let err = read_file(&path, DataType::F64, ByteOrder::LittleEndian, usize::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidFormat(_)));
    }

    #[test]
    fn test_encode_layout() {
        let mut out = Vec::new();
        encode(&mut out, DataType::I16, ByteOrder::LittleEndian, &[1.0, -1.0]).unwrap();
        assert_eq!(out, vec![0x01, 0x00, 0xFF, 0xFF]);

        let mut out = Vec::new();
        encode(&mut out, DataType::F64, ByteOrder::BigEndian, &[0.5]).unwrap();
        assert_eq!(out, 0.5f64.to_be_bytes().to_vec());
    }

    #[test]
    fn test_encode_narrows_integers() {
        let mut out = Vec::new();
        encode(&mut out, DataType::I8, ByteOrder::LittleEndian, &[3.9, 500.0, -500.0]).unwrap();
        assert_eq!(out, vec![3, 0x7F, 0x80]);
    }

    #[test]
    fn test_file_round_trip_is_bit_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cells.tas");
        let values = vec![0.1, -7.25, 1.0e30, f64::MIN_POSITIVE];

        write_file(&path, DataType::F64, ByteOrder::BigEndian, &values).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 32);

        let reread = read_file(&path, DataType::F64, ByteOrder::BigEndian, values.len()).unwrap();
        assert_eq!(reread, values);
    }
}
