use std::path::Path;

use memmap2::Mmap;

use super::Record;
use crate::error::{DbError, Result};

/// Sequential little-endian reads over a byte slice, with every read
/// bounds-checked against the end of the buffer.
struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        ByteCursor { buf, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                DbError::Corrupt(format!("unexpected end of file at byte {}", self.pos))
            })?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        let mut buf8 = [0u8; 8];
        buf8.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf8))
    }

    fn read_string(&mut self, len: usize) -> Result<String> {
        let start = self.pos;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec())
            .map_err(|_| DbError::Corrupt(format!("invalid UTF-8 in string at byte {start}")))
    }
}

/// Parses a whole registry file into records.
///
/// The file is memory-mapped and decoded from the mapped slice. Any
/// truncated or malformed field fails the entire read with
/// `DbError::Corrupt`; a missing file surfaces as `DbError::Io`.
pub(crate) fn read_file(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    parse_records(&mmap)
}

fn parse_records(buf: &[u8]) -> Result<Vec<Record>> {
    let mut cursor = ByteCursor::new(buf);
    let count = cursor.read_u64()?;
    let mut records = Vec::new();
    for _ in 0..count {
        records.push(parse_record(&mut cursor)?);
    }
    Ok(records)
}

fn parse_record(cursor: &mut ByteCursor<'_>) -> Result<Record> {
    let name_len = cursor.read_u64()? as usize;
    let name = cursor.read_string(name_len)?;

    let desc_len = cursor.read_u64()? as usize;
    let description = cursor.read_string(desc_len)?;

    let rank = cursor.read_u64()? as usize;
    // Claimed lengths are untrusted; take() proves the bytes exist
    // before anything is allocated for them.
    let dim_bytes = cursor.take(checked_byte_len(rank, 8, cursor.pos)?)?;
    let dims: Vec<usize> = dim_bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf8 = [0u8; 8];
            buf8.copy_from_slice(chunk);
            u64::from_le_bytes(buf8) as usize
        })
        .collect();
    // The dim values are untrusted too: an element count that
    // overflows usize can never describe a stored buffer.
    if dims
        .iter()
        .try_fold(1usize, |n, &d| n.checked_mul(d))
        .is_none()
    {
        return Err(DbError::Corrupt(format!(
            "dimension product overflows at byte {}",
            cursor.pos
        )));
    }

    let data_len = cursor.read_u64()? as usize;
    let data_bytes = cursor.take(checked_byte_len(data_len, 4, cursor.pos)?)?;
    let data = data_bytes
        .chunks_exact(4)
        .map(|chunk| {
            let mut buf4 = [0u8; 4];
            buf4.copy_from_slice(chunk);
            f32::from_le_bytes(buf4)
        })
        .collect();

    Ok(Record {
        name,
        description,
        dims,
        data,
    })
}

fn checked_byte_len(count: usize, width: usize, pos: usize) -> Result<usize> {
    count
        .checked_mul(width)
        .ok_or_else(|| DbError::Corrupt(format!("length overflow at byte {pos}")))
}
