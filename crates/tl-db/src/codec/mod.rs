mod reader;
mod writer;

pub(crate) use reader::read_file;
pub(crate) use writer::{write_file, RecordRef};

/// One stored tensor as decoded from a registry file.
///
/// The file layout is a count followed by that many records, all
/// integers little-endian, with no magic number or version field:
///
/// ```text
/// count:    u64
/// per record:
///   nameLen: u64, name: nameLen bytes (UTF-8)
///   descLen: u64, description: descLen bytes (UTF-8)
///   rank:    u64, dims: rank x u64
///   dataLen: u64, data: dataLen x f32
/// ```
///
/// Tags and timestamps are not written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub name: String,
    pub description: String,
    pub dims: Vec<usize>,
    pub data: Vec<f32>,
}
