use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::tensor::Tensor;

impl Tensor {
    /// Sum of all elements. The empty tensor sums to 0.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Arithmetic mean of all elements. NaN for the empty tensor.
    pub fn mean(&self) -> f32 {
        self.sum() / self.data.len() as f32
    }

    /// Smallest element, or +inf for the empty tensor.
    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest element, or -inf for the empty tensor.
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    /// Product of all elements. The empty tensor multiplies to 1.
    pub fn prod(&self) -> f32 {
        self.data.iter().product()
    }

    /// Shape left over after collapsing `axis`. Reducing the last axis
    /// of a vector gives shape (1), never rank 0.
    fn reduced_shape(&self, axis: usize) -> Result<Shape> {
        if axis >= self.rank() {
            return Err(TensorError::OutOfRange(format!(
                "axis {axis} out of range for rank {}",
                self.rank()
            )));
        }
        let mut dims: Vec<usize> = self
            .shape
            .dims()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != axis)
            .map(|(_, &d)| d)
            .collect();
        if dims.is_empty() {
            dims.push(1);
        }
        Ok(Shape::new(dims))
    }

    fn fold_axis(&self, axis: usize, init: f32, f: impl Fn(f32, f32) -> f32) -> Result<Tensor> {
        let shape = self.reduced_shape(axis)?;
        let mut out = Tensor::fill(shape, init)?;
        for flat in 0..self.data.len() {
            let idx = self.unflat_index(flat);
            let mut target: Vec<usize> = idx
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != axis)
                .map(|(_, &v)| v)
                .collect();
            if target.is_empty() {
                target.push(0);
            }
            let t = out.flat_index(&target);
            out.data[t] = f(out.data[t], self.data[flat]);
        }
        Ok(out)
    }

    /// Sums along one axis, collapsing it.
    pub fn sum_axis(&self, axis: usize) -> Result<Tensor> {
        self.fold_axis(axis, 0.0, |acc, x| acc + x)
    }

    /// Mean along one axis, collapsing it.
    pub fn mean_axis(&self, axis: usize) -> Result<Tensor> {
        let summed = self.sum_axis(axis)?;
        Ok(summed.div_scalar(self.shape.dim(axis) as f32))
    }

    /// Minimum along one axis, collapsing it.
    pub fn min_axis(&self, axis: usize) -> Result<Tensor> {
        self.fold_axis(axis, f32::INFINITY, f32::min)
    }

    /// Maximum along one axis, collapsing it.
    pub fn max_axis(&self, axis: usize) -> Result<Tensor> {
        self.fold_axis(axis, f32::NEG_INFINITY, f32::max)
    }
}
