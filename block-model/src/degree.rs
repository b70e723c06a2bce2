//! Degree correction: per-vertex "promiscuity" factors.
//!
//! ```text
//! raw(i)   = #nonzero in row i + #nonzero in column i
//! theta(i) = raw(i) / mean_{j in block(i)} raw(j)
//! P(i, j) <- min(1, theta(i) * theta(j) * P(i, j))
//! ```
//!
//! Both directions are counted even for an undirected graph, so each
//! undirected edge contributes twice to each endpoint. The mean of
//! `theta` within each block is 1.

use crate::partition::BlockPartition;
use log::debug;
use matrix_util::traits::GraphOps;
use ndarray::prelude::*;

/// Per-vertex degree correction factors, normalised within blocks.
///
/// A block whose vertices have no incident edges at all gets factors of
/// 1; its block probabilities are zero anyway.
pub fn degree_corrections<L>(graph: &Array2<f64>, partition: &BlockPartition<L>) -> Array1<f64> {
    let out_degree = graph.out_degree_counts();
    let in_degree = graph.in_degree_counts();

    let mut theta: Array1<f64> = out_degree
        .iter()
        .zip(in_degree.iter())
        .map(|(&o, &i)| (o + i) as f64)
        .collect();

    for b in 0..partition.num_blocks() {
        let members = partition.members(b);
        if members.is_empty() {
            continue;
        }

        let mean = members.iter().map(|&v| theta[v]).sum::<f64>() / members.len() as f64;

        if mean > 0.0 {
            for &v in members {
                theta[v] /= mean;
            }
        } else {
            debug!("block {} has no incident edges; degree corrections set to 1", b);
            for &v in members {
                theta[v] = 1.0;
            }
        }
    }

    theta
}

/// Scale `p_mat` by `theta theta'` and clamp at 1. Returns the number
/// of clamped entries.
pub fn apply_degree_correction(p_mat: &mut Array2<f64>, theta: &Array1<f64>) -> usize {
    let mut nclamped = 0;
    for ((i, j), p) in p_mat.indexed_iter_mut() {
        *p *= theta[i] * theta[j];
        if *p > 1.0 {
            *p = 1.0;
            nclamped += 1;
        }
    }
    nclamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn undirected_edges_count_twice() {
        // star centred at 0
        let graph = array![[0., 1., 1.], [1., 0., 0.], [1., 0., 0.]];
        let part = BlockPartition::from_labels(&[0, 0, 0]);
        let theta = degree_corrections(&graph, &part);

        // raw = [4, 2, 2], mean 8/3
        assert_abs_diff_eq!(theta, array![1.5, 0.75, 0.75], epsilon = 1e-12);
    }

    #[test]
    fn mean_is_one_within_each_block() {
        let graph = array![
            [0., 1., 0., 1., 1.],
            [0., 0., 1., 0., 0.],
            [1., 1., 0., 0., 1.],
            [0., 0., 0., 0., 1.],
            [1., 0., 0., 1., 0.]
        ];
        let part = BlockPartition::from_labels(&[1, 1, 2, 2, 2]);
        let theta = degree_corrections(&graph, &part);

        for b in 0..part.num_blocks() {
            let members = part.members(b);
            let mean = members.iter().map(|&v| theta[v]).sum::<f64>() / members.len() as f64;
            assert_abs_diff_eq!(mean, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn isolated_block_gets_unit_factors() {
        let graph = array![[0., 1., 0.], [1., 0., 0.], [0., 0., 0.]];
        let part = BlockPartition::from_labels(&[0, 0, 1]);
        let theta = degree_corrections(&graph, &part);
        assert_abs_diff_eq!(theta[2], 1.0);
    }

    #[test]
    fn correction_is_clamped() {
        let mut p_mat = Array2::from_elem((2, 2), 0.8);
        let theta = array![1.5, 0.5];
        let nclamped = apply_degree_correction(&mut p_mat, &theta);

        assert_eq!(nclamped, 1);
        assert_abs_diff_eq!(p_mat, array![[1.0, 0.6], [0.6, 0.2]], epsilon = 1e-12);
        assert!(p_mat.iter().all(|&p| p <= 1.0));
    }
}
