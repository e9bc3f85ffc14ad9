use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::tensor::Tensor;

impl Tensor {
    /// Matrix product of two rank-2 tensors: (m, k) @ (k, n) -> (m, n).
    pub fn matmul(&self, other: &Tensor) -> Result<Tensor> {
        if self.rank() != 2 || other.rank() != 2 {
            return Err(TensorError::InvalidArgument(format!(
                "matmul requires rank-2 tensors, got ranks {} and {}",
                self.rank(),
                other.rank()
            )));
        }
        let m = self.shape.dim(0);
        let k = self.shape.dim(1);
        let k2 = other.shape.dim(0);
        let n = other.shape.dim(1);
        if k != k2 {
            return Err(TensorError::InvalidArgument(format!(
                "matmul inner dimensions do not match: [{m}x{k}] @ [{k2}x{n}]"
            )));
        }

        let mut out = Tensor::zeros(Shape::new(vec![m, n]))?;
        for i in 0..m {
            for j in 0..n {
                let mut sum = 0.0f32;
                for p in 0..k {
                    sum += self.data[i * k + p] * other.data[p * n + j];
                }
                out.data[i * n + j] = sum;
            }
        }
        Ok(out)
    }

    /// Inner product of two equal-length vectors, returned as a scalar
    /// tensor.
    pub fn dot(&self, other: &Tensor) -> Result<Tensor> {
        if self.rank() != 1 || other.rank() != 1 {
            return Err(TensorError::InvalidArgument(format!(
                "dot requires rank-1 tensors, got ranks {} and {}",
                self.rank(),
                other.rank()
            )));
        }
        if self.size() != other.size() {
            return Err(TensorError::InvalidArgument(format!(
                "dot requires equal lengths, got {} and {}",
                self.size(),
                other.size()
            )));
        }
        let value = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| a * b)
            .sum();
        Ok(Tensor::scalar(value))
    }

    /// Euclidean (L2) norm over all elements.
    pub fn norm(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Scales the tensor to unit L2 norm. A zero-norm tensor is
    /// returned unchanged.
    pub fn normalize(&self) -> Tensor {
        let n = self.norm();
        if n == 0.0 {
            return self.clone();
        }
        self.div_scalar(n)
    }
}
