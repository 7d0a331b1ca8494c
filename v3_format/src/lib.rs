//! The VGA Planets v3 on-disk formats: fixed-width little-endian records,
//! space-padded strings, additive checksums, the single-byte text encoding
//! with the legacy message cipher, and the framing of the message and
//! utility files.
//!
//! This crate knows nothing about the Nu side; it only describes bytes.

use std::error::Error;
use std::fmt::{Debug, Display};

use binrw::io::Cursor;
use binrw::{BinRead, BinWrite, BinReaderExt, BinWriterExt};

/// Shared re-export so downstream crates can name the codec traits.
pub use binrw;

pub mod checksum;
mod data_def;
pub mod fixed_str;
pub mod messages;
pub mod records;
pub mod specs;
pub mod text;
pub mod util;

pub use fixed_str::FixedStr;

#[derive(Debug, Clone)]
pub enum V3Error {
    /// A record was cut short while unpacking.
    ShortRecord { expected: usize, actual: usize },
    /// A file on disk does not have the size its record layout demands.
    SizeMismatch {
        file: String,
        expected: usize,
        actual: usize,
    },
}

impl Error for V3Error {}
impl Display for V3Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

/// Serializes one record to its exact byte image.
pub fn to_bytes<T>(value: &T) -> anyhow::Result<Vec<u8>>
where
    for<'a> T: BinWrite<Args<'a> = ()>,
{
    let mut cursor = Cursor::new(Vec::new());
    cursor.write_le(value)?;
    Ok(cursor.into_inner())
}

/// Deserializes one record from the front of `bytes`.
pub fn from_bytes<T>(bytes: &[u8]) -> anyhow::Result<T>
where
    for<'a> T: BinRead<Args<'a> = ()>,
{
    let mut cursor = Cursor::new(bytes);
    Ok(cursor.read_le::<T>()?)
}

/// Deserializes `count` back-to-back records from the front of `bytes`.
pub fn from_bytes_n<T>(bytes: &[u8], count: usize) -> anyhow::Result<Vec<T>>
where
    for<'a> T: BinRead<Args<'a> = ()>,
{
    let mut cursor = Cursor::new(bytes);
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        records.push(cursor.read_le::<T>()?);
    }
    Ok(records)
}
