use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use tl_tensor::Shape;

/// Bookkeeping attached to every registry entry. Tags and timestamps
/// live only in memory; the file format does not carry them.
#[derive(Debug, Clone)]
pub struct TensorMetadata {
    pub name: String,
    pub description: String,
    pub shape: Shape,
    pub size: usize,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
    pub tags: BTreeMap<String, String>,
}

impl TensorMetadata {
    pub(crate) fn new(name: &str, description: &str, shape: Shape, size: usize) -> Self {
        let now = Utc::now();
        TensorMetadata {
            name: name.to_string(),
            description: description.to_string(),
            shape,
            size,
            created: now,
            modified: now,
            tags: BTreeMap::new(),
        }
    }

    /// The shape rendered as "(d0, d1, ..)".
    pub fn shape_string(&self) -> String {
        self.shape.to_string()
    }

    /// Creation time as "YYYY-MM-DD HH:MM:SS".
    pub fn created_string(&self) -> String {
        self.created.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Last-modified time as "YYYY-MM-DD HH:MM:SS".
    pub fn modified_string(&self) -> String {
        self.modified.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshots_fields() {
        let m = TensorMetadata::new("weights", "layer 1", Shape::new(vec![2, 3]), 6);
        assert_eq!(m.name, "weights");
        assert_eq!(m.description, "layer 1");
        assert_eq!(m.size, 6);
        assert_eq!(m.created, m.modified);
        assert!(m.tags.is_empty());
    }

    #[test]
    fn test_shape_string() {
        let m = TensorMetadata::new("t", "", Shape::new(vec![4, 5]), 20);
        assert_eq!(m.shape_string(), "(4, 5)");
    }

    #[test]
    fn test_timestamp_format() {
        let m = TensorMetadata::new("t", "", Shape::new(vec![1]), 1);
        let s = m.created_string();
        // "2024-01-31 12:00:00" shape: date, space, time.
        assert_eq!(s.len(), 19);
        assert_eq!(&s[4..5], "-");
        assert_eq!(&s[10..11], " ");
        assert_eq!(&s[13..14], ":");
        assert_eq!(m.modified_string(), s);
    }
}
