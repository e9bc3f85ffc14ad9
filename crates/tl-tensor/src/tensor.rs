use std::ops::{Index, IndexMut};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, TensorError};
use crate::shape::Shape;

/// An owned, contiguous, row-major tensor of f32 values.
///
/// Rank 0 covers two distinct states: the empty tensor (no elements,
/// from [`Tensor::new`]) and the scalar (one element, from
/// [`Tensor::scalar`]). Both have the empty shape; only the element
/// count tells them apart.
#[derive(Debug, Clone, Default)]
pub struct Tensor {
    pub(crate) shape: Shape,
    pub(crate) strides: Vec<usize>,
    pub(crate) data: Vec<f32>,
}

fn validate_shape(shape: &Shape) -> Result<()> {
    if shape.dims().iter().any(|&d| d == 0) {
        return Err(TensorError::InvalidShape(shape.dims().to_vec()));
    }
    Ok(())
}

impl Tensor {
    /// Creates the empty tensor: rank 0, no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rank-0 tensor holding a single value.
    pub fn scalar(value: f32) -> Self {
        Tensor {
            shape: Shape::default(),
            strides: vec![],
            data: vec![value],
        }
    }

    /// Creates a zero-filled tensor of the given shape.
    ///
    /// The empty shape yields a rank-0 scalar holding one zero.
    pub fn zeros(shape: Shape) -> Result<Self> {
        validate_shape(&shape)?;
        let strides = shape.strides();
        let data = vec![0.0; shape.numel()];
        Ok(Tensor {
            shape,
            strides,
            data,
        })
    }

    /// Creates a tensor from a shape and a flat row-major data vector.
    pub fn from_data(shape: Shape, data: Vec<f32>) -> Result<Self> {
        validate_shape(&shape)?;
        let expected = shape.numel();
        if data.len() != expected {
            return Err(TensorError::SizeMismatch {
                shape: shape.dims().to_vec(),
                expected,
                got: data.len(),
            });
        }
        let strides = shape.strides();
        Ok(Tensor {
            shape,
            strides,
            data,
        })
    }

    /// Creates a tensor by calling `f` with each flat index in order.
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize) -> f32) -> Result<Self> {
        validate_shape(&shape)?;
        let data = (0..shape.numel()).map(&mut f).collect();
        let strides = shape.strides();
        Ok(Tensor {
            shape,
            strides,
            data,
        })
    }

    /// Builds a tensor from pieces already known to be consistent.
    pub(crate) fn from_parts(shape: Shape, data: Vec<f32>) -> Self {
        let strides = shape.strides();
        Tensor {
            shape,
            strides,
            data,
        }
    }

    /// Creates a tensor filled with ones.
    pub fn ones(shape: Shape) -> Result<Self> {
        Self::fill(shape, 1.0)
    }

    /// Creates a tensor filled with `value`.
    pub fn fill(shape: Shape, value: f32) -> Result<Self> {
        Self::from_fn(shape, |_| value)
    }

    /// Creates a tensor of uniform random values in `[0, 1)`.
    pub fn random(shape: Shape) -> Result<Self> {
        Self::random_range(shape, 0.0, 1.0)
    }

    /// Creates a tensor of uniform random values in `[min, max)`.
    pub fn random_range(shape: Shape, min: f32, max: f32) -> Result<Self> {
        if !(min < max) {
            return Err(TensorError::InvalidArgument(format!(
                "random range [{min}, {max}) is empty"
            )));
        }
        let mut rng = rand::thread_rng();
        Self::from_fn(shape, |_| rng.gen_range(min..max))
    }

    /// Creates a tensor of uniform random values in `[min, max)` from a
    /// seeded generator, for reproducible output.
    pub fn random_seeded(shape: Shape, min: f32, max: f32, seed: u64) -> Result<Self> {
        if !(min < max) {
            return Err(TensorError::InvalidArgument(format!(
                "random range [{min}, {max}) is empty"
            )));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        Self::from_fn(shape, |_| rng.gen_range(min..max))
    }

    /// Creates a vector of values from `start` (inclusive) to `end`
    /// (exclusive) with step 1.
    pub fn range(start: f32, end: f32) -> Result<Self> {
        Self::range_step(start, end, 1.0)
    }

    /// Creates a vector of values from `start` (inclusive) to `end`
    /// (exclusive) with the given step.
    ///
    /// The result has `ceil((end - start) / step)` elements; a range
    /// that covers no values yields the empty tensor.
    pub fn range_step(start: f32, end: f32, step: f32) -> Result<Self> {
        if step == 0.0 {
            return Err(TensorError::InvalidArgument(
                "range step must be nonzero".to_string(),
            ));
        }
        let count = ((end - start) / step).ceil();
        if !(count > 0.0) {
            return Ok(Tensor::new());
        }
        Self::from_fn(Shape::new(vec![count as usize]), |i| start + i as f32 * step)
    }

    /// Creates the n-by-n identity matrix.
    pub fn identity(n: usize) -> Result<Self> {
        let mut t = Self::zeros(Shape::new(vec![n, n]))?;
        for i in 0..n {
            t.data[i * n + i] = 1.0;
        }
        Ok(t)
    }

    /// Creates a rank-1 tensor owning `vec`.
    pub fn from_vec(vec: Vec<f32>) -> Result<Self> {
        let n = vec.len();
        Self::from_data(Shape::new(vec![n]), vec)
    }

    /// Creates a rank-2 tensor from rows of equal length.
    pub fn from_matrix(rows: &[Vec<f32>]) -> Result<Self> {
        if rows.is_empty() {
            return Err(TensorError::InvalidShape(vec![0, 0]));
        }
        let cols = rows[0].len();
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TensorError::InvalidArgument(format!(
                    "matrix rows must have equal length: expected {cols}, got {}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Self::from_data(Shape::new(vec![rows.len(), cols]), data)
    }

    /// Returns the shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.rank()
    }

    /// Number of stored elements.
    ///
    /// For rank 0 this is 1 for a scalar and 0 for the empty tensor,
    /// which is the only case where it differs from `shape().numel()`.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// True only for the empty tensor.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major strides, one per dimension.
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Flat row-major view of the elements.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable flat row-major view of the elements.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Size of the given axis.
    pub fn dim(&self, axis: usize) -> Result<usize> {
        if axis >= self.rank() {
            return Err(TensorError::OutOfRange(format!(
                "axis {axis} out of range for rank {}",
                self.rank()
            )));
        }
        Ok(self.shape.dim(axis))
    }

    /// Reads the element at a full multi-dimensional index.
    ///
    /// The index must supply exactly one coordinate per dimension, each
    /// within its axis bound.
    pub fn at(&self, indices: &[usize]) -> Result<f32> {
        self.validate_indices(indices)?;
        let flat = self.flat_index(indices);
        self.data.get(flat).copied().ok_or_else(|| {
            TensorError::OutOfRange(format!("flat index {flat} on tensor of {} elements", self.data.len()))
        })
    }

    /// Reads an element of a rank-2 tensor.
    pub fn at2(&self, row: usize, col: usize) -> Result<f32> {
        self.at(&[row, col])
    }

    /// Reads an element of a rank-3 tensor.
    pub fn at3(&self, i: usize, j: usize, k: usize) -> Result<f32> {
        self.at(&[i, j, k])
    }

    /// Writes the element at a full multi-dimensional index.
    pub fn set(&mut self, indices: &[usize], value: f32) -> Result<()> {
        self.validate_indices(indices)?;
        let flat = self.flat_index(indices);
        let len = self.data.len();
        match self.data.get_mut(flat) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(TensorError::OutOfRange(format!(
                "flat index {flat} on tensor of {len} elements"
            ))),
        }
    }

    fn validate_indices(&self, indices: &[usize]) -> Result<()> {
        if indices.len() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                got: indices.len(),
            });
        }
        for (axis, (&idx, &dim)) in indices.iter().zip(self.shape.dims()).enumerate() {
            if idx >= dim {
                return Err(TensorError::OutOfRange(format!(
                    "index {idx} out of range for axis {axis} of size {dim}"
                )));
            }
        }
        Ok(())
    }

    /// Flat offset of a multi-dimensional index. Assumes the index has
    /// already been validated.
    pub(crate) fn flat_index(&self, indices: &[usize]) -> usize {
        indices
            .iter()
            .zip(&self.strides)
            .map(|(i, s)| i * s)
            .sum()
    }

    /// Multi-dimensional index of a flat offset.
    pub(crate) fn unflat_index(&self, mut flat: usize) -> Vec<usize> {
        let mut indices = vec![0; self.rank()];
        for (i, &stride) in self.strides.iter().enumerate() {
            indices[i] = flat / stride;
            flat %= stride;
        }
        indices
    }
}

impl Index<usize> for Tensor {
    type Output = f32;

    /// Direct flat access into the row-major data.
    fn index(&self, i: usize) -> &f32 {
        &self.data[i]
    }
}

impl IndexMut<usize> for Tensor {
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        &mut self.data[i]
    }
}
