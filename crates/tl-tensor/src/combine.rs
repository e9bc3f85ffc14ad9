use crate::error::{Result, TensorError};
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Joins tensors along an existing axis. All inputs must share rank and
/// agree on every dimension except `axis`.
pub fn concatenate(tensors: &[Tensor], axis: usize) -> Result<Tensor> {
    let first = match tensors.first() {
        Some(t) => t,
        None => {
            return Err(TensorError::InvalidArgument(
                "cannot concatenate an empty list of tensors".to_string(),
            ))
        }
    };
    let rank = first.rank();
    if axis >= rank {
        return Err(TensorError::OutOfRange(format!(
            "axis {axis} out of range for rank {rank}"
        )));
    }

    let mut dims = first.shape().dims().to_vec();
    for t in &tensors[1..] {
        if t.rank() != rank {
            return Err(TensorError::RankMismatch {
                expected: rank,
                got: t.rank(),
            });
        }
        for (j, (&d, &d0)) in t
            .shape()
            .dims()
            .iter()
            .zip(first.shape().dims())
            .enumerate()
        {
            if j != axis && d != d0 {
                return Err(TensorError::ShapeMismatch {
                    left: first.shape().dims().to_vec(),
                    right: t.shape().dims().to_vec(),
                });
            }
        }
        dims[axis] += t.shape().dim(axis);
    }

    let mut out = Tensor::zeros(Shape::new(dims))?;
    let mut offset = 0;
    for t in tensors {
        for flat in 0..t.size() {
            let mut idx = t.unflat_index(flat);
            idx[axis] += offset;
            let target = out.flat_index(&idx);
            out.data[target] = t.data[flat];
        }
        offset += t.shape().dim(axis);
    }
    Ok(out)
}

/// Joins tensors of identical shape along a new axis, raising rank by
/// one. Stacking k tensors of shape (d0, .., dn) at axis 0 gives
/// (k, d0, .., dn).
pub fn stack(tensors: &[Tensor], axis: usize) -> Result<Tensor> {
    let first = match tensors.first() {
        Some(t) => t,
        None => {
            return Err(TensorError::InvalidArgument(
                "cannot stack an empty list of tensors".to_string(),
            ))
        }
    };
    if axis > first.rank() {
        return Err(TensorError::OutOfRange(format!(
            "axis {axis} out of range for stacking rank {}",
            first.rank()
        )));
    }
    for t in &tensors[1..] {
        if t.shape() != first.shape() {
            return Err(TensorError::ShapeMismatch {
                left: first.shape().dims().to_vec(),
                right: t.shape().dims().to_vec(),
            });
        }
    }

    let expanded: Vec<Tensor> = tensors
        .iter()
        .map(|t| t.unsqueeze(axis))
        .collect::<Result<_>>()?;
    concatenate(&expanded, axis)
}
