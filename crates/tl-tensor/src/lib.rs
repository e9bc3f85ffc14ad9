//! `tl-tensor` - dense N-dimensional f32 tensor engine for tensorlab.
//!
//! This crate provides:
//! - An owned, contiguous, row-major `Tensor` type with checked
//!   multi-dimensional indexing
//! - Factory constructors (zeros, ones, random, range, identity, ..)
//! - Shape transforms: reshape, permute, squeeze, slice, concatenate
//! - Elementwise arithmetic, axis reductions, matmul and dot
//! - Rendering and 3-D layout helpers for the visual front-ends

pub mod combine;
pub mod error;
pub mod shape;
pub mod tensor;
pub mod viz;

mod compare;
mod display;
mod elementwise;
mod linalg;
mod reduce;
mod shape_ops;

// Re-export primary types at the crate root for convenience.
pub use combine::{concatenate, stack};
pub use error::{Result, TensorError};
pub use shape::Shape;
pub use tensor::Tensor;
pub use viz::Point3;
