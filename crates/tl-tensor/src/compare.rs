use crate::tensor::Tensor;

/// Exact equality of shape and elements. NaN compares unequal to
/// itself, as usual for floats.
impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape && self.data == other.data
    }
}

impl Tensor {
    /// Approximate equality: shapes must match exactly, every element
    /// pair must satisfy `|a - b| <= atol + rtol * |b|`.
    pub fn all_close(&self, other: &Tensor, rtol: f32, atol: f32) -> bool {
        if self.shape != other.shape || self.data.len() != other.data.len() {
            return false;
        }
        self.data
            .iter()
            .zip(&other.data)
            .all(|(&a, &b)| (a - b).abs() <= atol + rtol * b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn test_eq() {
        let a = Tensor::from_vec(vec![1.0, 2.0]).unwrap();
        let b = Tensor::from_vec(vec![1.0, 2.0]).unwrap();
        assert_eq!(a, b);
        let c = Tensor::from_vec(vec![1.0, 2.5]).unwrap();
        assert_ne!(a, c);
        // Same data, different shape.
        let d = a.reshape(Shape::new(vec![2, 1])).unwrap();
        assert_ne!(a, d);
    }

    #[test]
    fn test_eq_rank_0() {
        assert_eq!(Tensor::new(), Tensor::new());
        assert_eq!(Tensor::scalar(1.0), Tensor::scalar(1.0));
        // Empty and scalar share a shape but not a size.
        assert_ne!(Tensor::new(), Tensor::scalar(1.0));
    }

    #[test]
    fn test_all_close() {
        let a = Tensor::from_vec(vec![1.0, 2.0]).unwrap();
        let b = Tensor::from_vec(vec![1.0 + 1e-7, 2.0 - 1e-7]).unwrap();
        assert!(a.all_close(&b, 1e-5, 1e-6));
        let c = Tensor::from_vec(vec![1.1, 2.0]).unwrap();
        assert!(!a.all_close(&c, 1e-5, 1e-6));
    }

    #[test]
    fn test_all_close_shape_mismatch() {
        let a = Tensor::from_vec(vec![1.0, 2.0]).unwrap();
        let b = a.reshape(Shape::new(vec![1, 2])).unwrap();
        assert!(!a.all_close(&b, 1e-3, 1e-3));
        assert!(!Tensor::new().all_close(&Tensor::scalar(0.0), 1e-3, 1e-3));
    }
}
