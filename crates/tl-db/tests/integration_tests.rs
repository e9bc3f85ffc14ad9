//! Integration tests for tl-db.
//!
//! These tests drive the registry the way the sandbox and lesson
//! engines do: build tensors, store and query them, derive new ones,
//! and round-trip everything through a registry file.

use tl_db::{DbError, TensorRegistry};
use tl_tensor::{Shape, Tensor};

#[test]
fn test_store_compute_fetch() {
    let mut db = TensorRegistry::new();
    db.store("a", Tensor::ones(Shape::new(vec![2, 2])).unwrap(), "");
    db.store(
        "b",
        Tensor::ones(Shape::new(vec![2, 2])).unwrap().mul_scalar(2.0),
        "",
    );

    assert!(db.compute("c", "a", "b", "add"));
    let expected = Tensor::fill(Shape::new(vec![2, 2]), 3.0).unwrap();
    assert_eq!(db.get("c"), Some(expected));
}

#[test]
fn test_compute_with_missing_operand_stores_nothing() {
    let mut db = TensorRegistry::new();
    db.store("b", Tensor::scalar(1.0), "");
    assert!(!db.compute("x", "missing", "b", "add"));
    assert!(!db.exists("x"));
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.tldb");

    let mut db = TensorRegistry::new();
    db.store("scalar", Tensor::scalar(3.5), "a lone value");
    db.store("vector", Tensor::range(0.0, 5.0).unwrap(), "0 through 4");
    db.store(
        "matrix",
        Tensor::from_matrix(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap(),
        "",
    );
    db.store(
        "cube",
        Tensor::random_seeded(Shape::new(vec![2, 2, 2]), -1.0, 1.0, 11).unwrap(),
        "seeded noise",
    );
    db.set_tag("vector", "kind", "range");
    db.save_to_file(&path).unwrap();

    let mut restored = TensorRegistry::new();
    restored.load_from_file(&path).unwrap();

    assert_eq!(restored.count(), 4);
    assert_eq!(restored.list_names(), db.list_names());
    for name in db.list_names() {
        assert_eq!(restored.get(&name), db.get(&name), "tensor {name}");
        let old_meta = db.get_metadata(&name).unwrap();
        let new_meta = restored.get_metadata(&name).unwrap();
        assert_eq!(new_meta.description, old_meta.description);
        assert_eq!(new_meta.shape, old_meta.shape);
        assert_eq!(new_meta.size, old_meta.size);
    }
    // Tags do not survive the file format.
    assert_eq!(restored.get_tag("vector", "kind"), None);
}

#[test]
fn test_empty_tensor_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.tldb");

    let mut db = TensorRegistry::new();
    db.store("void", Tensor::new(), "no elements");
    db.store("scalar", Tensor::scalar(1.0), "one element");
    db.save_to_file(&path).unwrap();

    let mut restored = TensorRegistry::new();
    restored.load_from_file(&path).unwrap();
    let void = restored.get("void").unwrap();
    assert_eq!(void.rank(), 0);
    assert!(void.is_empty());
    let scalar = restored.get("scalar").unwrap();
    assert_eq!(scalar.rank(), 0);
    assert_eq!(scalar.size(), 1);
}

#[test]
fn test_load_replaces_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.tldb");

    let mut db = TensorRegistry::new();
    db.store("kept", Tensor::scalar(1.0), "");
    db.save_to_file(&path).unwrap();

    let mut other = TensorRegistry::new();
    other.store("stale", Tensor::scalar(2.0), "");
    other.load_from_file(&path).unwrap();
    assert!(other.exists("kept"));
    assert!(!other.exists("stale"));
    assert_eq!(other.count(), 1);
}

#[test]
fn test_failed_load_leaves_registry_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tldb");

    let mut db = TensorRegistry::new();
    db.store("survivor", Tensor::from_vec(vec![1.0, 2.0]).unwrap(), "");

    // Missing file.
    let err = db.load_from_file(dir.path().join("nope.tldb")).unwrap_err();
    assert!(matches!(err, DbError::Io(_)));
    assert!(db.exists("survivor"));

    // Truncated file.
    let mut full = TensorRegistry::new();
    full.store("x", Tensor::range(0.0, 100.0).unwrap(), "");
    full.save_to_file(&path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let err = db.load_from_file(&path).unwrap_err();
    assert!(matches!(err, DbError::Corrupt(_)));
    assert!(db.exists("survivor"));
    assert_eq!(db.count(), 1);
}

#[test]
fn test_inconsistent_record_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lying.tldb");

    // A record whose dims say 2x2 but which carries 3 values.
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(&1u64.to_le_bytes()); // count
    bytes.extend_from_slice(&1u64.to_le_bytes()); // nameLen
    bytes.extend_from_slice(b"t");
    bytes.extend_from_slice(&0u64.to_le_bytes()); // descLen
    bytes.extend_from_slice(&2u64.to_le_bytes()); // rank
    bytes.extend_from_slice(&2u64.to_le_bytes());
    bytes.extend_from_slice(&2u64.to_le_bytes());
    bytes.extend_from_slice(&3u64.to_le_bytes()); // dataLen
    for v in [1.0f32, 2.0, 3.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    std::fs::write(&path, &bytes).unwrap();

    let mut db = TensorRegistry::new();
    db.store("keep", Tensor::scalar(7.0), "");
    let err = db.load_from_file(&path).unwrap_err();
    assert!(matches!(err, DbError::Tensor(_)));
    assert!(db.exists("keep"));
}

#[test]
fn test_overflowing_dims_fail_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.tldb");

    // A record claiming shape 2^32 x 2^32 x 1 with no data. The
    // element count does not fit in usize, so no data buffer could
    // ever satisfy it.
    let mut bytes: Vec<u8> = Vec::new();
    bytes.extend_from_slice(&1u64.to_le_bytes()); // count
    bytes.extend_from_slice(&1u64.to_le_bytes()); // nameLen
    bytes.extend_from_slice(b"t");
    bytes.extend_from_slice(&0u64.to_le_bytes()); // descLen
    bytes.extend_from_slice(&3u64.to_le_bytes()); // rank
    bytes.extend_from_slice(&(1u64 << 32).to_le_bytes());
    bytes.extend_from_slice(&(1u64 << 32).to_le_bytes());
    bytes.extend_from_slice(&1u64.to_le_bytes());
    bytes.extend_from_slice(&0u64.to_le_bytes()); // dataLen
    std::fs::write(&path, &bytes).unwrap();

    let mut db = TensorRegistry::new();
    db.store("keep", Tensor::scalar(7.0), "");
    let err = db.load_from_file(&path).unwrap_err();
    assert!(matches!(err, DbError::Corrupt(_)));
    assert!(db.exists("keep"));
    assert_eq!(db.count(), 1);
}

#[test]
fn test_registry_workflow() {
    let mut db = TensorRegistry::new();

    db.store("inputs", Tensor::range(1.0, 7.0).unwrap(), "six samples");
    db.store(
        "weights",
        Tensor::random_seeded(Shape::new(vec![6]), -0.5, 0.5, 4).unwrap(),
        "",
    );
    db.set_tag("inputs", "stage", "raw");
    db.set_tag("weights", "stage", "model");

    assert!(db.compute("weighted", "inputs", "weights", "mul"));
    let weighted = db.get("weighted").unwrap();
    assert_eq!(
        weighted,
        db.get("inputs")
            .unwrap()
            .mul(&db.get("weights").unwrap())
            .unwrap()
    );

    // Derived entries carry no tags until one is set.
    assert_eq!(db.get_tag("weighted", "stage"), None);
    assert_eq!(db.find_by_tag("stage", "raw"), vec!["inputs"]);
    assert_eq!(db.find_by_rank(1).len(), 3);

    let stats = db.stats();
    assert_eq!(stats.tensor_count, 3);
    assert_eq!(stats.total_elements, 18);
    assert_eq!(stats.rank_distribution.get(&1), Some(&3));

    assert!(db.apply("weighted", |t| *t = t.abs()));
    assert!(db.get("weighted").unwrap().data().iter().all(|&x| x >= 0.0));
}
