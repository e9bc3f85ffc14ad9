use std::fmt;

use crate::tensor::Tensor;

/// Rank 0 and 1 render on one line, rank 2 as one row per line. Rank 3
/// and above render only a shape summary.
impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "Tensor([])");
        }
        match self.rank() {
            0 => write!(f, "Tensor({:.4})", self.data[0]),
            1 => {
                write!(f, "[")?;
                for (i, x) in self.data.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{x:.4}")?;
                }
                write!(f, "]")
            }
            2 => {
                let rows = self.shape.dim(0);
                let cols = self.shape.dim(1);
                write!(f, "[")?;
                for i in 0..rows {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "[")?;
                    for j in 0..cols {
                        if j > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{:.4}", self.data[i * cols + j])?;
                    }
                    write!(f, "]")?;
                    if i < rows - 1 {
                        writeln!(f, ",")?;
                    }
                }
                write!(f, "]")
            }
            _ => write!(f, "Tensor(shape={}, data=[...])", self.shape),
        }
    }
}

impl Tensor {
    /// The shape rendered as "(d0, d1, ..)".
    pub fn shape_string(&self) -> String {
        self.shape.to_string()
    }

    /// Multi-line report of shape, rank, size, value statistics, and
    /// the rendered data.
    pub fn to_detailed_string(&self) -> String {
        let mut out = String::from("Tensor {\n");
        out.push_str(&format!("  shape: {}\n", self.shape));
        out.push_str(&format!("  rank: {}\n", self.rank()));
        out.push_str(&format!("  size: {} elements\n", self.size()));
        if !self.is_empty() {
            out.push_str(&format!("  min: {}\n", self.min()));
            out.push_str(&format!("  max: {}\n", self.max()));
            out.push_str(&format!("  mean: {}\n", self.mean()));
        }
        out.push_str(&format!("  data: {self}\n"));
        out.push('}');
        out
    }
}
