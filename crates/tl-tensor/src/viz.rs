use crate::tensor::Tensor;

/// A position in 3-D space for laying out tensor elements on a grid.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Tensor {
    /// Elements rescaled into `[0, 1]` by min-max normalization. A
    /// constant tensor maps to all zeros; the empty tensor to an empty
    /// vector.
    pub fn normalized_data(&self) -> Vec<f32> {
        if self.is_empty() {
            return vec![];
        }
        let min = self.min();
        let mut range = self.max() - min;
        if range == 0.0 {
            range = 1.0;
        }
        self.data.iter().map(|&x| (x - min) / range).collect()
    }

    /// Grid coordinates for every element, one point per flat index.
    /// The first three axes map to x, y, and z; missing axes stay 0.
    pub fn positions_3d(&self, spacing: f32) -> Vec<Point3> {
        let mut positions = Vec::with_capacity(self.data.len());
        for flat in 0..self.data.len() {
            let idx = self.unflat_index(flat);
            let mut p = Point3::default();
            if !idx.is_empty() {
                p.x = idx[0] as f32 * spacing;
            }
            if idx.len() >= 2 {
                p.y = idx[1] as f32 * spacing;
            }
            if idx.len() >= 3 {
                p.z = idx[2] as f32 * spacing;
            }
            positions.push(p);
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::Shape;

    #[test]
    fn test_normalized_data() {
        let t = Tensor::from_vec(vec![2.0, 4.0, 6.0]).unwrap();
        assert_eq!(t.normalized_data(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_normalized_data_constant() {
        let t = Tensor::fill(Shape::new(vec![3]), 7.0).unwrap();
        assert_eq!(t.normalized_data(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_normalized_data_empty() {
        assert!(Tensor::new().normalized_data().is_empty());
    }

    #[test]
    fn test_positions_1d() {
        let t = Tensor::from_vec(vec![1.0, 2.0, 3.0]).unwrap();
        let p = t.positions_3d(0.5);
        assert_eq!(p.len(), 3);
        assert_eq!(p[2], Point3 { x: 1.0, y: 0.0, z: 0.0 });
    }

    #[test]
    fn test_positions_3d_grid() {
        let t = Tensor::zeros(Shape::new(vec![2, 2, 2])).unwrap();
        let p = t.positions_3d(1.0);
        assert_eq!(p.len(), 8);
        // Flat index 5 unflattens to (1, 0, 1).
        assert_eq!(p[5], Point3 { x: 1.0, y: 0.0, z: 1.0 });
    }

    #[test]
    fn test_positions_scalar() {
        let p = Tensor::scalar(1.0).positions_3d(2.0);
        assert_eq!(p, vec![Point3::default()]);
    }
}
