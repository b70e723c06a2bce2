//! The block-structure fit shared by every model family.
//!
//! 1. estimate block probabilities
//! 2. expand them to the vertex probability matrix
//! 3. optionally apply degree correction

use crate::block_prob::{assemble_p_mat, estimate_block_p};
use crate::degree::{apply_degree_correction, degree_corrections};
use crate::error::Result;
use crate::partition::BlockPartition;
use log::debug;
use ndarray::prelude::*;

/// Outcome of one block-structure fit.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockFit<L> {
    /// Vertex partition the fit was computed on
    pub partition: BlockPartition<L>,
    /// `k x k` block probability matrix
    pub block_p: Array2<f64>,
    /// `n x n` vertex probability matrix, degree-corrected if requested
    pub p_mat: Array2<f64>,
    /// Per-vertex degree corrections; `None` when not requested
    pub degree_corrections: Option<Array1<f64>>,
}

impl<L> BlockFit<L> {
    /// Number of vertices
    pub fn n_vertices(&self) -> usize {
        self.partition.num_vertices()
    }
}

/// Fit block probabilities (and degree corrections) of `graph` under
/// `partition`.
pub fn fit_blocks<L>(graph: &Array2<f64>, partition: BlockPartition<L>, fit_degrees: bool) -> Result<BlockFit<L>> {
    let block_p = estimate_block_p(graph, &partition)?;
    let mut p_mat = assemble_p_mat(&block_p, partition.block_inv());

    let degree_corrections = if fit_degrees {
        let theta = degree_corrections(graph, &partition);
        let nclamped = apply_degree_correction(&mut p_mat, &theta);
        debug!(
            "degree correction clamped {} of {} probabilities at 1",
            nclamped,
            p_mat.len()
        );
        Some(theta)
    } else {
        None
    };

    Ok(BlockFit {
        partition,
        block_p,
        p_mat,
        degree_corrections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn plain_fit_has_no_corrections() -> Result<()> {
        let graph = array![[0., 1., 0.], [1., 0., 1.], [0., 1., 0.]];
        let fit = fit_blocks(&graph, BlockPartition::from_labels(&[0, 0, 1]), false)?;
        assert!(fit.degree_corrections.is_none());
        assert_eq!(fit.p_mat.dim(), graph.dim());
        assert_abs_diff_eq!(fit.block_p, array![[0.5, 0.5], [0.5, 0.0]]);
        Ok(())
    }

    #[test]
    fn corrected_fit_stays_in_unit_interval() -> Result<()> {
        let graph = array![
            [0., 1., 1., 1.],
            [1., 0., 0., 0.],
            [1., 0., 0., 0.],
            [1., 0., 0., 0.]
        ];
        let fit = fit_blocks(&graph, BlockPartition::from_labels(&[(); 4]), true)?;
        let theta = fit.degree_corrections.as_ref().unwrap();

        assert_abs_diff_eq!(theta.mean().unwrap(), 1.0, epsilon = 1e-12);
        assert!(fit.p_mat.iter().all(|&p| (0.0..=1.0).contains(&p)));
        // hub-hub: 0.375 * 2^2 > 1
        assert_abs_diff_eq!(fit.p_mat[(0, 0)], 1.0);
        Ok(())
    }
}
