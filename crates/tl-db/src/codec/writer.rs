use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;

/// Borrowed view of one registry entry, ready to serialize.
pub(crate) struct RecordRef<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub dims: &'a [usize],
    pub data: &'a [f32],
}

/// Writes all records to `path`, replacing any existing file.
pub(crate) fn write_file(path: &Path, records: &[RecordRef<'_>]) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    w.write_all(&(records.len() as u64).to_le_bytes())?;
    for record in records {
        write_string(&mut w, record.name)?;
        write_string(&mut w, record.description)?;

        w.write_all(&(record.dims.len() as u64).to_le_bytes())?;
        for &dim in record.dims {
            w.write_all(&(dim as u64).to_le_bytes())?;
        }

        w.write_all(&(record.data.len() as u64).to_le_bytes())?;
        for &value in record.data {
            w.write_all(&value.to_le_bytes())?;
        }
    }
    w.flush()?;
    Ok(())
}

fn write_string(w: &mut impl Write, s: &str) -> Result<()> {
    w.write_all(&(s.len() as u64).to_le_bytes())?;
    w.write_all(s.as_bytes())?;
    Ok(())
}
