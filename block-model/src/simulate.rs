//! Draw synthetic graphs from known block-model parameters.
//!
//! Vertices are laid out in contiguous blocks: the first
//! `block_sizes[0]` vertices form block 0, the next `block_sizes[1]`
//! block 1, and so on.

use crate::block_prob::assemble_p_mat;
use crate::degree::apply_degree_correction;
use crate::error::{GraphModelError, Result};
use crate::sampler::sample_edges;
use ndarray::prelude::*;
use rand::Rng;

/// Block index of every vertex for contiguous blocks of `block_sizes`
pub fn contiguous_labels(block_sizes: &[usize]) -> Vec<usize> {
    block_sizes
        .iter()
        .enumerate()
        .flat_map(|(b, &size)| std::iter::repeat(b).take(size))
        .collect()
}

fn check_probability(value: f64, row: usize, col: usize) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GraphModelError::InvalidProbability { row, col, value });
    }
    Ok(())
}

/// Vertex probability matrix of an SBM with contiguous blocks.
///
/// * `block_sizes` - `k` block sizes summing to `n`
/// * `block_p` - `k x k` matrix with entries in `[0, 1]`
/// * `degree_corrections` - optional length-`n` vector; each `P(i, j)` is
///   scaled by `theta(i) * theta(j)` and clamped at 1
pub fn sbm_p_matrix(
    block_sizes: &[usize],
    block_p: &Array2<f64>,
    degree_corrections: Option<&Array1<f64>>,
) -> Result<Array2<f64>> {
    let k = block_sizes.len();
    if block_p.dim() != (k, k) {
        return Err(GraphModelError::Shape(format!(
            "{} block sizes but a {:?} block probability matrix",
            k,
            block_p.dim()
        )));
    }

    for ((r, c), &p) in block_p.indexed_iter() {
        check_probability(p, r, c)?;
    }

    let block_inv = contiguous_labels(block_sizes);
    let mut p_mat = assemble_p_mat(block_p, &block_inv);

    if let Some(theta) = degree_corrections {
        if theta.len() != block_inv.len() {
            return Err(GraphModelError::InvalidArgument(format!(
                "{} degree corrections for {} vertices",
                theta.len(),
                block_inv.len()
            )));
        }
        if theta.iter().any(|&t| t < 0.0 || !t.is_finite()) {
            return Err(GraphModelError::InvalidArgument(
                "degree corrections must be finite and non-negative".into(),
            ));
        }
        apply_degree_correction(&mut p_mat, theta);
    }

    Ok(p_mat)
}

/// Draw one SBM graph; see [`sbm_p_matrix`] for the parameters.
pub fn sample_sbm<R>(
    block_sizes: &[usize],
    block_p: &Array2<f64>,
    directed: bool,
    loops: bool,
    degree_corrections: Option<&Array1<f64>>,
    rng: &mut R,
) -> Result<Array2<f64>>
where
    R: Rng + ?Sized,
{
    let p_mat = sbm_p_matrix(block_sizes, block_p, degree_corrections)?;
    sample_edges(&p_mat, directed, loops, rng)
}

/// Draw one Erdos-Renyi graph on `n` vertices with edge probability `p`.
pub fn sample_er<R>(n: usize, p: f64, directed: bool, loops: bool, rng: &mut R) -> Result<Array2<f64>>
where
    R: Rng + ?Sized,
{
    check_probability(p, 0, 0)?;
    sample_edges(&Array2::from_elem((n, n), p), directed, loops, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use matrix_util::traits::GraphOps;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn contiguous_blocks() -> Result<()> {
        assert_eq!(contiguous_labels(&[2, 0, 3]), vec![0, 0, 2, 2, 2]);

        let p_mat = sbm_p_matrix(&[1, 2], &array![[0.1, 0.2], [0.3, 0.4]], None)?;
        assert_abs_diff_eq!(
            p_mat,
            array![[0.1, 0.2, 0.2], [0.3, 0.4, 0.4], [0.3, 0.4, 0.4]]
        );
        Ok(())
    }

    #[test]
    fn corrected_matrix_is_clamped() -> Result<()> {
        let theta = array![2.0, 1.0, 0.0];
        let p_mat = sbm_p_matrix(&[3], &array![[0.5]], Some(&theta))?;
        assert_abs_diff_eq!(p_mat[(0, 0)], 1.0);
        assert_abs_diff_eq!(p_mat[(0, 1)], 1.0);
        assert_abs_diff_eq!(p_mat[(1, 1)], 0.5);
        assert_abs_diff_eq!(p_mat.row(2).sum(), 0.0);
        Ok(())
    }

    #[test]
    fn bad_parameters() {
        let bad_shape = sbm_p_matrix(&[1, 1], &array![[0.5]], None);
        assert!(matches!(bad_shape, Err(GraphModelError::Shape(_))));

        let bad_p = sbm_p_matrix(&[1, 1], &array![[0.5, 1.5], [0.5, 0.5]], None);
        assert!(matches!(
            bad_p,
            Err(GraphModelError::InvalidProbability { row: 0, col: 1, .. })
        ));

        let bad_theta = sbm_p_matrix(&[2], &array![[0.5]], Some(&array![1.0]));
        assert!(matches!(bad_theta, Err(GraphModelError::InvalidArgument(_))));

        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_er(3, -0.1, true, false, &mut rng).is_err());
    }

    #[test]
    fn sampled_graphs_follow_the_flags() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);

        let a = sample_sbm(&[5, 5], &array![[0.9, 0.1], [0.1, 0.9]], false, false, None, &mut rng)?;
        assert!(a.is_symmetric());
        assert!(!a.has_loops());

        let b = sample_er(10, 1.0, true, true, &mut rng)?;
        assert_abs_diff_eq!(b.sum(), 100.0);

        let c = sample_er(10, 0.0, true, true, &mut rng)?;
        assert_abs_diff_eq!(c.sum(), 0.0);
        Ok(())
    }
}
