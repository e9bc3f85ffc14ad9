//! `tl-db` - named tensor registry for tensorlab.
//!
//! This crate provides:
//! - A `TensorRegistry` mapping unique names to (tensor, metadata)
//!   pairs, iterated in sorted-name order
//! - Tag, shape, and rank queries over the stored entries
//! - Derived computation between stored tensors (`compute`)
//! - Whole-file binary persistence of names, descriptions, shapes,
//!   and data

pub mod error;
pub mod metadata;
pub mod ops;
pub mod registry;

mod codec;

pub use error::{DbError, Result};
pub use metadata::TensorMetadata;
pub use ops::BinaryOp;
pub use registry::{RegistryStats, TensorRegistry};
