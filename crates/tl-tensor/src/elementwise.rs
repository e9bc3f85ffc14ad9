use crate::error::{Result, TensorError};
use crate::tensor::Tensor;

impl Tensor {
    fn zip_with(&self, other: &Tensor, f: impl Fn(f32, f32) -> f32) -> Result<Tensor> {
        if self.shape != other.shape {
            return Err(TensorError::ShapeMismatch {
                left: self.shape.dims().to_vec(),
                right: other.shape.dims().to_vec(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(&other.data)
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Tensor::from_parts(self.shape.clone(), data))
    }

    /// Elementwise sum. Shapes must match exactly; there is no
    /// broadcasting.
    pub fn add(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Elementwise difference.
    pub fn sub(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Elementwise product.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Elementwise quotient. Division by zero follows IEEE 754.
    pub fn div(&self, other: &Tensor) -> Result<Tensor> {
        self.zip_with(other, |a, b| a / b)
    }

    /// Applies `f` to every element, preserving shape.
    pub fn apply(&self, f: impl Fn(f32) -> f32) -> Tensor {
        let data = self.data.iter().map(|&x| f(x)).collect();
        Tensor::from_parts(self.shape.clone(), data)
    }

    /// Adds `s` to every element.
    pub fn add_scalar(&self, s: f32) -> Tensor {
        self.apply(|x| x + s)
    }

    /// Subtracts `s` from every element.
    pub fn sub_scalar(&self, s: f32) -> Tensor {
        self.apply(|x| x - s)
    }

    /// Multiplies every element by `s`.
    pub fn mul_scalar(&self, s: f32) -> Tensor {
        self.apply(|x| x * s)
    }

    /// Divides every element by `s`.
    pub fn div_scalar(&self, s: f32) -> Tensor {
        self.apply(|x| x / s)
    }

    /// Elementwise negation.
    pub fn neg(&self) -> Tensor {
        self.apply(|x| -x)
    }

    /// Elementwise square root.
    pub fn sqrt(&self) -> Tensor {
        self.apply(f32::sqrt)
    }

    /// Raises every element to `exponent`.
    pub fn pow(&self, exponent: f32) -> Tensor {
        self.apply(|x| x.powf(exponent))
    }

    /// Elementwise e^x.
    pub fn exp(&self) -> Tensor {
        self.apply(f32::exp)
    }

    /// Elementwise natural logarithm.
    pub fn log(&self) -> Tensor {
        self.apply(f32::ln)
    }

    /// Elementwise absolute value.
    pub fn abs(&self) -> Tensor {
        self.apply(f32::abs)
    }

    /// Elementwise sine.
    pub fn sin(&self) -> Tensor {
        self.apply(f32::sin)
    }

    /// Elementwise cosine.
    pub fn cos(&self) -> Tensor {
        self.apply(f32::cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_sub() {
        let a = Tensor::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
        let b = Tensor::from_vec(vec![10.0, 20.0, 30.0]).unwrap();
        assert_eq!(a.add(&b).unwrap().data(), &[11.0, 22.0, 33.0]);
        assert_eq!(b.sub(&a).unwrap().data(), &[9.0, 18.0, 27.0]);
    }

    #[test]
    fn test_mul_div() {
        let a = Tensor::from_vec(vec![2.0, 4.0]).unwrap();
        let b = Tensor::from_vec(vec![3.0, 0.5]).unwrap();
        assert_eq!(a.mul(&b).unwrap().data(), &[6.0, 2.0]);
        assert_eq!(a.div(&b).unwrap().data(), &[2.0 / 3.0, 8.0]);
    }

    #[test]
    fn test_div_by_zero_is_ieee() {
        let a = Tensor::from_vec(vec![1.0, 0.0]).unwrap();
        let b = Tensor::from_vec(vec![0.0, 0.0]).unwrap();
        let q = a.div(&b).unwrap();
        assert!(q[0].is_infinite());
        assert!(q[1].is_nan());
    }

    #[test]
    fn test_shape_must_match_exactly() {
        let a = Tensor::zeros(Shape::new(vec![2, 3])).unwrap();
        let b = Tensor::zeros(Shape::new(vec![3, 2])).unwrap();
        assert!(matches!(
            a.add(&b).unwrap_err(),
            TensorError::ShapeMismatch { .. }
        ));
        // Same element count is not enough; no broadcasting either.
        let v = Tensor::zeros(Shape::new(vec![6])).unwrap();
        assert!(a.add(&v).is_err());
        let one = Tensor::zeros(Shape::new(vec![1])).unwrap();
        assert!(a.add(&one).is_err());
    }

    #[test]
    fn test_scalar_ops() {
        let t = Tensor::from_vec(vec![1.0, 2.0]).unwrap();
        assert_eq!(t.add_scalar(1.0).data(), &[2.0, 3.0]);
        assert_eq!(t.sub_scalar(1.0).data(), &[0.0, 1.0]);
        assert_eq!(t.mul_scalar(3.0).data(), &[3.0, 6.0]);
        assert_eq!(t.div_scalar(2.0).data(), &[0.5, 1.0]);
        assert_eq!(t.neg().data(), &[-1.0, -2.0]);
    }

    #[test]
    fn test_apply_preserves_shape() {
        let t = Tensor::zeros(Shape::new(vec![2, 2])).unwrap();
        let r = t.apply(|x| x + 1.0);
        assert_eq!(r.shape(), t.shape());
        assert_eq!(r.data(), &[1.0, 1.0, 1.0, 1.0]);

        let e = Tensor::new().apply(|x| x + 1.0);
        assert!(e.is_empty());
    }

    #[test]
    fn test_unary_math() {
        let t = Tensor::from_vec(vec![4.0, 9.0]).unwrap();
        assert_eq!(t.sqrt().data(), &[2.0, 3.0]);
        assert_eq!(t.pow(2.0).data(), &[16.0, 81.0]);

        let t = Tensor::from_vec(vec![-1.5, 2.5]).unwrap();
        assert_eq!(t.abs().data(), &[1.5, 2.5]);

        let t = Tensor::from_vec(vec![0.0, 1.0]).unwrap();
        assert_relative_eq!(t.exp()[1], std::f32::consts::E);
        assert_relative_eq!(t.exp().log()[1], 1.0, max_relative = 1e-6);
        assert_relative_eq!(t.sin()[0], 0.0);
        assert_relative_eq!(t.cos()[0], 1.0);
    }
}
