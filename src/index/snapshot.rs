//! Checksummed on-disk snapshot format.
//!
//! ```text
//! +-------+---------+--------+-------------+-----------------+
//! | CURI  | version | crc32  | payload len | bincode payload |
//! | 4 B   | u32 LE  | u32 LE | u64 LE      | len bytes       |
//! +-------+---------+--------+-------------+-----------------+
//! ```
//!
//! The checksum covers the payload only.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CurioError, Result};

/// File magic.
pub const MAGIC: [u8; 4] = *b"CURI";

/// Current format version.
pub const FORMAT_VERSION: u32 = 1;

/// Encode `value` and write it with the snapshot header.
pub fn write_snapshot<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    let payload = bincode::serialize(value)?;

    writer.write_all(&MAGIC)?;
    writer.write_u32::<LittleEndian>(FORMAT_VERSION)?;
    writer.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    writer.write_u64::<LittleEndian>(payload.len() as u64)?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

/// Read a snapshot, verifying magic, version, length and checksum.
pub fn read_snapshot<R: Read, T: DeserializeOwned>(mut reader: R) -> Result<T> {
    let mut magic = [0u8; 4];
    reader
        .read_exact(&mut magic)
        .map_err(|e| CurioError::storage(format!("truncated header: {e}")))?;
    if magic != MAGIC {
        return Err(CurioError::storage("not a curio snapshot (bad magic)"));
    }

    let version = read_header_u32(&mut reader)?;
    if version != FORMAT_VERSION {
        return Err(CurioError::storage(format!(
            "unsupported snapshot version {version} (expected {FORMAT_VERSION})"
        )));
    }

    let checksum = read_header_u32(&mut reader)?;
    let length = reader
        .read_u64::<LittleEndian>()
        .map_err(|e| CurioError::storage(format!("truncated header: {e}")))?;

    let mut payload = Vec::new();
    reader.take(length).read_to_end(&mut payload)?;
    if payload.len() as u64 != length {
        return Err(CurioError::storage(format!(
            "truncated payload: expected {length} bytes, found {}",
            payload.len()
        )));
    }

    let actual = crc32fast::hash(&payload);
    if actual != checksum {
        return Err(CurioError::storage(format!(
            "checksum mismatch: stored {checksum:#010x}, computed {actual:#010x}"
        )));
    }

    bincode::deserialize(&payload)
        .map_err(|e| CurioError::storage(format!("undecodable payload: {e}")))
}

fn read_header_u32<R: Read>(reader: &mut R) -> Result<u32> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|e| CurioError::storage(format!("truncated header: {e}")))
}
