//! Bernoulli sampling of adjacency matrices from a probability matrix.

use crate::error::{GraphModelError, Result};
use ndarray::prelude::*;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution};

/// Draw `A(i, j) ~ Bernoulli(P(i, j))` independently for every cell.
///
/// * `p_mat` - square matrix with entries in `[0, 1]`
/// * `directed` - if `false`, only the upper triangle (diagonal
///   included) is drawn and mirrored to the lower one
/// * `loops` - if `false`, the diagonal is zeroed after sampling
/// * `rng` - random source; a seeded one makes the draw reproducible
pub fn sample_edges<R>(p_mat: &Array2<f64>, directed: bool, loops: bool, rng: &mut R) -> Result<Array2<f64>>
where
    R: Rng + ?Sized,
{
    let (n, ncol) = p_mat.dim();
    if n != ncol {
        return Err(GraphModelError::Shape(format!(
            "probability matrix is not square: {} x {}",
            n, ncol
        )));
    }

    let mut graph = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        let first = if directed { 0 } else { i };
        for j in first..n {
            let p = p_mat[(i, j)];
            let coin = Bernoulli::new(p).map_err(|_| GraphModelError::InvalidProbability {
                row: i,
                col: j,
                value: p,
            })?;

            if coin.sample(rng) {
                graph[(i, j)] = 1.0;
                if !directed {
                    graph[(j, i)] = 1.0;
                }
            }
        }
    }

    if !loops {
        graph.diag_mut().fill(0.0);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_util::traits::GraphOps;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn undirected_without_loops() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let p_mat = Array2::from_elem((20, 20), 0.5);

        for _ in 0..5 {
            let graph = sample_edges(&p_mat, false, false, &mut rng)?;
            assert!(graph.is_symmetric());
            assert!(!graph.has_loops());
            assert!(graph.is_unweighted());
        }
        Ok(())
    }

    #[test]
    fn loops_are_zeroed_even_with_certain_diagonal() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(1);
        let p_mat = Array2::from_elem((6, 6), 1.0);

        let graph = sample_edges(&p_mat, true, false, &mut rng)?;
        assert!(!graph.has_loops());
        assert_eq!(graph.sum(), 30.0);

        let graph = sample_edges(&p_mat, true, true, &mut rng)?;
        assert_eq!(graph.sum(), 36.0);
        Ok(())
    }

    #[test]
    fn seeded_draws_repeat() -> Result<()> {
        let p_mat = Array2::from_elem((10, 10), 0.3);
        let a = sample_edges(&p_mat, true, true, &mut StdRng::seed_from_u64(7))?;
        let b = sample_edges(&p_mat, true, true, &mut StdRng::seed_from_u64(7))?;
        assert_eq!(a, b);
        Ok(())
    }

    #[test]
    fn out_of_range_probability() {
        let p_mat = array![[0.0, 1.5], [0.0, 0.0]];
        let res = sample_edges(&p_mat, true, true, &mut StdRng::seed_from_u64(0));
        assert_eq!(
            res,
            Err(GraphModelError::InvalidProbability {
                row: 0,
                col: 1,
                value: 1.5
            })
        );
    }
}
