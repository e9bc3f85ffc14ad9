use tl_tensor::{Tensor, TensorError};

/// Binary operations the registry can run between two stored tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Matmul,
}

impl BinaryOp {
    /// Parses an operation name or its symbol alias ("add"/"+",
    /// "matmul"/"@", ..). Unknown strings yield None.
    pub fn parse(op: &str) -> Option<BinaryOp> {
        match op {
            "add" | "+" => Some(BinaryOp::Add),
            "sub" | "-" => Some(BinaryOp::Sub),
            "mul" | "*" => Some(BinaryOp::Mul),
            "div" | "/" => Some(BinaryOp::Div),
            "matmul" | "@" => Some(BinaryOp::Matmul),
            _ => None,
        }
    }

    /// Runs the operation on two tensors.
    pub fn apply(&self, a: &Tensor, b: &Tensor) -> Result<Tensor, TensorError> {
        match self {
            BinaryOp::Add => a.add(b),
            BinaryOp::Sub => a.sub(b),
            BinaryOp::Mul => a.mul(b),
            BinaryOp::Div => a.div(b),
            BinaryOp::Matmul => a.matmul(b),
        }
    }
}
