use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::tensor::Tensor;

impl Tensor {
    /// Returns a copy with a new shape holding the same elements in
    /// row-major order.
    pub fn reshape(&self, new_shape: Shape) -> Result<Tensor> {
        let expected = new_shape.numel();
        if expected != self.size() {
            return Err(TensorError::SizeMismatch {
                shape: new_shape.dims().to_vec(),
                expected,
                got: self.size(),
            });
        }
        Tensor::from_data(new_shape, self.data.clone())
    }

    /// Collapses to rank 1, preserving element order.
    pub fn flatten(&self) -> Result<Tensor> {
        self.reshape(Shape::new(vec![self.size()]))
    }

    /// Transposes a rank-2 tensor.
    pub fn transpose(&self) -> Result<Tensor> {
        if self.rank() != 2 {
            return Err(TensorError::InvalidArgument(format!(
                "transpose requires a rank-2 tensor, got rank {}",
                self.rank()
            )));
        }
        let rows = self.shape.dim(0);
        let cols = self.shape.dim(1);
        let mut out = Tensor::zeros(Shape::new(vec![cols, rows]))?;
        for i in 0..rows {
            for j in 0..cols {
                out.data[j * rows + i] = self.data[i * cols + j];
            }
        }
        Ok(out)
    }

    /// Reorders the axes by a permutation: output axis `i` takes its
    /// size and coordinates from input axis `axes[i]`.
    pub fn permute(&self, axes: &[usize]) -> Result<Tensor> {
        if axes.len() != self.rank() {
            return Err(TensorError::RankMismatch {
                expected: self.rank(),
                got: axes.len(),
            });
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                return Err(TensorError::InvalidArgument(format!(
                    "permutation axis {axis} out of range for rank {}",
                    self.rank()
                )));
            }
            if seen[axis] {
                return Err(TensorError::InvalidArgument(format!(
                    "duplicate axis {axis} in permutation"
                )));
            }
            seen[axis] = true;
        }
        // The only rank-0 permutation is the identity.
        if self.rank() == 0 {
            return Ok(self.clone());
        }
        let new_dims: Vec<usize> = axes.iter().map(|&a| self.shape.dim(a)).collect();
        let mut out = Tensor::zeros(Shape::new(new_dims))?;
        for flat in 0..self.data.len() {
            let idx = self.unflat_index(flat);
            let new_idx: Vec<usize> = axes.iter().map(|&a| idx[a]).collect();
            let target = out.flat_index(&new_idx);
            out.data[target] = self.data[flat];
        }
        Ok(out)
    }

    /// Drops all size-1 axes. A tensor of only size-1 axes collapses to
    /// shape (1) rather than rank 0.
    pub fn squeeze(&self) -> Result<Tensor> {
        let mut dims: Vec<usize> = self
            .shape
            .dims()
            .iter()
            .copied()
            .filter(|&d| d != 1)
            .collect();
        if dims.is_empty() {
            dims.push(1);
        }
        self.reshape(Shape::new(dims))
    }

    /// Inserts a size-1 axis at `axis` (0 through rank inclusive).
    pub fn unsqueeze(&self, axis: usize) -> Result<Tensor> {
        if axis > self.rank() {
            return Err(TensorError::OutOfRange(format!(
                "axis {axis} out of range for unsqueeze on rank {}",
                self.rank()
            )));
        }
        let mut dims = self.shape.dims().to_vec();
        dims.insert(axis, 1);
        self.reshape(Shape::new(dims))
    }

    /// Copies the half-open window `[start, end)` along one axis; other
    /// axes are kept whole.
    pub fn slice(&self, axis: usize, start: usize, end: usize) -> Result<Tensor> {
        if axis >= self.rank() {
            return Err(TensorError::OutOfRange(format!(
                "axis {axis} out of range for rank {}",
                self.rank()
            )));
        }
        let dim = self.shape.dim(axis);
        if start >= end || end > dim {
            return Err(TensorError::OutOfRange(format!(
                "slice bounds [{start}, {end}) invalid for axis {axis} of size {dim}"
            )));
        }
        let mut dims = self.shape.dims().to_vec();
        dims[axis] = end - start;
        let mut out = Tensor::zeros(Shape::new(dims))?;
        for flat in 0..out.data.len() {
            let mut idx = out.unflat_index(flat);
            idx[axis] += start;
            out.data[flat] = self.data[self.flat_index(&idx)];
        }
        Ok(out)
    }

    /// Extracts row `i` of a rank-2 tensor as a vector.
    pub fn row(&self, i: usize) -> Result<Tensor> {
        if self.rank() != 2 {
            return Err(TensorError::InvalidArgument(format!(
                "row requires a rank-2 tensor, got rank {}",
                self.rank()
            )));
        }
        self.slice(0, i, i + 1)?.squeeze()
    }

    /// Extracts column `j` of a rank-2 tensor as a vector.
    pub fn col(&self, j: usize) -> Result<Tensor> {
        if self.rank() != 2 {
            return Err(TensorError::InvalidArgument(format!(
                "col requires a rank-2 tensor, got rank {}",
                self.rank()
            )));
        }
        self.slice(1, j, j + 1)?.squeeze()
    }
}
