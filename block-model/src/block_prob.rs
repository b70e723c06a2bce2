//! Block-level edge probabilities and their expansion to vertex pairs.
//!
//! ```text
//! B(a, b) = mean_{i in a, j in b} 1{A(i, j) != 0}
//! P(i, j) = B(z(i), z(j))
//! ```
//!
//! Any nonzero entry counts as one edge, so weighted graphs still give
//! probabilities in `[0, 1]`. The mean runs over the full submatrix,
//! diagonal included when `a == b`. Loop removal and symmetrisation are
//! up to the caller.

use crate::error::{GraphModelError, Result};
use crate::partition::BlockPartition;
use ndarray::prelude::*;

/// Estimate the `k x k` block probability matrix.
///
/// `(a, b)` and `(b, a)` are estimated from different submatrices, so
/// the result is asymmetric for a directed graph.
pub fn estimate_block_p<L>(graph: &Array2<f64>, partition: &BlockPartition<L>) -> Result<Array2<f64>> {
    let n = graph.nrows();
    if graph.ncols() != n {
        return Err(GraphModelError::Shape(format!(
            "matrix is not square: {} x {}",
            n,
            graph.ncols()
        )));
    }
    if partition.num_vertices() != n {
        return Err(GraphModelError::InvalidLabels(format!(
            "partition covers {} vertices, graph has {}",
            partition.num_vertices(),
            n
        )));
    }
    partition.check_nonempty()?;

    let k = partition.num_blocks();
    let mut block_p = Array2::<f64>::zeros((k, k));

    for a in 0..k {
        let from_rows = graph.select(Axis(0), partition.members(a));
        for b in 0..k {
            let block = from_rows.select(Axis(1), partition.members(b));
            let nedges = block.iter().filter(|&&x| x != 0.0).count();
            block_p[(a, b)] = nedges as f64 / block.len() as f64;
        }
    }

    Ok(block_p)
}

/// Expand block probabilities to the `n x n` vertex probability matrix
/// through each vertex's block index.
pub fn assemble_p_mat(block_p: &Array2<f64>, block_inv: &[usize]) -> Array2<f64> {
    let n = block_inv.len();
    Array2::from_shape_fn((n, n), |(i, j)| block_p[(block_inv[i], block_inv[j])])
}
