use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;

use tl_tensor::{Shape, Tensor};

use crate::codec::{self, Record, RecordRef};
use crate::error::{DbError, Result};
use crate::metadata::TensorMetadata;
use crate::ops::BinaryOp;

#[derive(Debug, Clone)]
struct TensorEntry {
    tensor: Tensor,
    metadata: TensorMetadata,
}

/// In-memory store of named tensors with per-entry metadata.
///
/// Entries are kept in sorted-name order, so `list_names`, `iter`, and
/// the query methods are deterministic. Lookups report failure as
/// `None`/`false`; only borrowing accessors and persistence return
/// errors.
#[derive(Debug, Default)]
pub struct TensorRegistry {
    entries: BTreeMap<String, TensorEntry>,
}

/// Aggregate counts over a registry, as reported by
/// [`TensorRegistry::stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub tensor_count: usize,
    pub total_elements: usize,
    pub total_memory_bytes: usize,
    /// Number of stored tensors per rank, keyed by rank.
    pub rank_distribution: BTreeMap<usize, usize>,
}

impl TensorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `tensor` under `name`, replacing any existing entry.
    ///
    /// Metadata starts fresh: overwriting a name resets its creation
    /// time and drops its tags.
    pub fn store(&mut self, name: &str, tensor: Tensor, description: &str) {
        let metadata =
            TensorMetadata::new(name, description, tensor.shape().clone(), tensor.size());
        self.entries
            .insert(name.to_string(), TensorEntry { tensor, metadata });
    }

    /// Returns a copy of the tensor stored under `name`.
    pub fn get(&self, name: &str) -> Option<Tensor> {
        self.entries.get(name).map(|e| e.tensor.clone())
    }

    /// Borrows the tensor stored under `name`.
    pub fn get_ref(&self, name: &str) -> Result<&Tensor> {
        self.entries
            .get(name)
            .map(|e| &e.tensor)
            .ok_or_else(|| DbError::NotFound(name.to_string()))
    }

    /// Mutably borrows the tensor stored under `name`. The modified
    /// timestamp is not touched; use [`TensorRegistry::apply`] for
    /// tracked mutation.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Tensor> {
        self.entries
            .get_mut(name)
            .map(|e| &mut e.tensor)
            .ok_or_else(|| DbError::NotFound(name.to_string()))
    }

    /// Replaces the tensor under an existing name, keeping its creation
    /// time and tags while refreshing shape, size, and the modified
    /// timestamp. Returns false if the name is absent.
    pub fn update(&mut self, name: &str, tensor: Tensor) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.metadata.shape = tensor.shape().clone();
                entry.metadata.size = tensor.size();
                entry.metadata.modified = Utc::now();
                entry.tensor = tensor;
                true
            }
            None => false,
        }
    }

    /// Removes the entry under `name`. Returns false if absent.
    pub fn remove(&mut self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All stored names in sorted order.
    pub fn list_names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get_metadata(&self, name: &str) -> Option<&TensorMetadata> {
        self.entries.get(name).map(|e| &e.metadata)
    }

    /// Sets (or overwrites) one tag on an entry. Returns false if the
    /// name is absent.
    pub fn set_tag(&mut self, name: &str, key: &str, value: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry
                    .metadata
                    .tags
                    .insert(key.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }

    pub fn get_tag(&self, name: &str, key: &str) -> Option<&str> {
        self.entries
            .get(name)
            .and_then(|e| e.metadata.tags.get(key))
            .map(|v| v.as_str())
    }

    /// Names of all tensors with exactly this shape, sorted.
    pub fn find_by_shape(&self, shape: &Shape) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.tensor.shape() == shape)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Names of all tensors of the given rank, sorted.
    pub fn find_by_rank(&self, rank: usize) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.tensor.rank() == rank)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Names of all tensors carrying tag `key` with value `value`,
    /// sorted.
    pub fn find_by_tag(&self, key: &str, value: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.metadata.tags.get(key).map(String::as_str) == Some(value))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Runs `operation` on the tensors stored under `a` and `b` and
    /// stores the result under `result_name`.
    ///
    /// Returns false, leaving the registry untouched, when either
    /// operand is missing, the operation string is unknown, or the
    /// tensor operation itself fails. Tensor errors never escape this
    /// call.
    pub fn compute(&mut self, result_name: &str, a: &str, b: &str, operation: &str) -> bool {
        let op = match BinaryOp::parse(operation) {
            Some(op) => op,
            None => return false,
        };
        let (lhs, rhs) = match (self.entries.get(a), self.entries.get(b)) {
            (Some(lhs), Some(rhs)) => (&lhs.tensor, &rhs.tensor),
            _ => return false,
        };
        match op.apply(lhs, rhs) {
            Ok(result) => {
                let description = format!("Computed: {a} {operation} {b}");
                self.store(result_name, result, &description);
                true
            }
            Err(_) => false,
        }
    }

    /// Mutates the tensor under `name` in place and refreshes its
    /// modified timestamp. Returns false if the name is absent.
    pub fn apply(&mut self, name: &str, f: impl FnOnce(&mut Tensor)) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                f(&mut entry.tensor);
                entry.metadata.modified = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Iterates entries as (name, tensor, metadata) in sorted-name
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tensor, &TensorMetadata)> {
        self.entries
            .iter()
            .map(|(name, e)| (name.as_str(), &e.tensor, &e.metadata))
    }

    /// Writes every entry to `path` in the registry file format. Tags
    /// and timestamps are not persisted.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let records: Vec<RecordRef<'_>> = self
            .entries
            .iter()
            .map(|(name, e)| RecordRef {
                name: name.as_str(),
                description: &e.metadata.description,
                dims: e.tensor.shape().dims(),
                data: e.tensor.data(),
            })
            .collect();
        codec::write_file(path.as_ref(), &records)
    }

    /// Replaces the registry contents with the entries read from
    /// `path`.
    ///
    /// The file is parsed into a staging map first; on any error the
    /// registry keeps its previous contents. Creation and modified
    /// timestamps are set to load time.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let records = codec::read_file(path.as_ref())?;
        let mut entries = BTreeMap::new();
        for record in records {
            let entry = entry_from_record(record)?;
            entries.insert(entry.metadata.name.clone(), entry);
        }
        self.entries = entries;
        Ok(())
    }

    /// Aggregate counts over all entries.
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            tensor_count: self.entries.len(),
            ..RegistryStats::default()
        };
        for entry in self.entries.values() {
            stats.total_elements += entry.tensor.size();
            stats.total_memory_bytes += entry.tensor.size() * std::mem::size_of::<f32>();
            *stats
                .rank_distribution
                .entry(entry.tensor.rank())
                .or_insert(0) += 1;
        }
        stats
    }
}

fn entry_from_record(record: Record) -> Result<TensorEntry> {
    // A rank-0 record with no data is the empty tensor; from_data
    // cannot express it because the empty shape implies one element.
    let tensor = if record.dims.is_empty() && record.data.is_empty() {
        Tensor::new()
    } else {
        Tensor::from_data(Shape::new(record.dims), record.data)?
    };
    let metadata = TensorMetadata::new(
        &record.name,
        &record.description,
        tensor.shape().clone(),
        tensor.size(),
    );
    Ok(TensorEntry { tensor, metadata })
}
