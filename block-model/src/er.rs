//! Erdos-Renyi model: every vertex pair shares one edge probability,
//! optionally scaled by per-vertex degree corrections (DCER).
//!
//! The fit is the one-block case of the block model, so `p` is the mean
//! of the whole adjacency matrix.

use crate::block_fit::fit_blocks;
use crate::error::{GraphModelError, Result};
use crate::estimator::{EstimatorOptions, GraphEstimator, GraphModel, ModelKind};
use crate::graph_input::GraphInput;
use crate::partition::BlockPartition;
use log::info;
use ndarray::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct ErFit {
    p: f64,
    p_mat: Array2<f64>,
    degree_corrections: Option<Array1<f64>>,
}

/// Erdos-Renyi estimator; vertex labels are not used.
#[derive(Debug, Clone)]
pub struct ErEstimator {
    options: EstimatorOptions,
    fitted: Option<ErFit>,
}

impl ErEstimator {
    /// An unfitted ER model; degree correction follows
    /// `options.fit_degrees`
    pub fn new(options: EstimatorOptions) -> Self {
        ErEstimator {
            options,
            fitted: None,
        }
    }

    /// An unfitted DCER model with the Erdos-Renyi defaults
    pub fn dcer() -> Self {
        Self::new(EstimatorOptions {
            fit_degrees: true,
            ..EstimatorOptions::erdos_renyi()
        })
    }

    /// Fit the single edge probability (and degree corrections).
    pub fn fit(&mut self, graph: &GraphInput) -> Result<()> {
        self.options.check_supported()?;

        let graph = graph.to_adjacency()?;
        let n = graph.nrows();
        if n == 0 {
            return Err(GraphModelError::Shape("graph has no vertices".into()));
        }

        let fit = fit_blocks(&graph, BlockPartition::from_labels(&vec![(); n]), self.options.fit_degrees)?;

        let fit = ErFit {
            p: fit.block_p[(0, 0)],
            p_mat: fit.p_mat,
            degree_corrections: fit.degree_corrections,
        };

        info!(
            "{}: n={}, p={:.4}, directed={}, loops={}",
            self.kind(),
            n,
            fit.p,
            self.options.directed,
            self.options.loops
        );

        self.fitted = Some(fit);
        Ok(())
    }

    fn fitted(&self) -> Result<&ErFit> {
        self.fitted.as_ref().ok_or(GraphModelError::NotFitted)
    }

    /// Fitted edge probability
    pub fn p(&self) -> Result<f64> {
        Ok(self.fitted()?.p)
    }

    /// Per-vertex degree corrections; `None` if not fitted with them
    pub fn degree_corrections(&self) -> Result<Option<&Array1<f64>>> {
        Ok(self.fitted()?.degree_corrections.as_ref())
    }
}

impl GraphModel for ErEstimator {
    fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    fn kind(&self) -> ModelKind {
        if self.options.fit_degrees {
            ModelKind::Dcer
        } else {
            ModelKind::Er
        }
    }

    fn p_mat(&self) -> Result<&Array2<f64>> {
        Ok(&self.fitted()?.p_mat)
    }

    /// One edge probability (+ `n` degree corrections)
    fn n_parameters(&self) -> Result<usize> {
        let fit = self.fitted()?;
        Ok(1 + fit.degree_corrections.as_ref().map_or(0, |theta| theta.len()))
    }
}

/// Labels, when given, are ignored.
impl<L> GraphEstimator<L> for ErEstimator {
    fn fit(&mut self, graph: &GraphInput, _labels: Option<&[L]>) -> Result<()> {
        ErEstimator::fit(self, graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_abs_diff_eq;

    #[test]
    fn p_is_the_matrix_mean() -> Result<()> {
        let graph = array![[0., 1., 0.], [1., 0., 1.], [0., 1., 0.]];
        let mut er = ErEstimator::new(EstimatorOptions::erdos_renyi());
        er.fit(&graph.clone().into())?;

        assert_abs_diff_eq!(er.p()?, 4.0 / 9.0);
        assert_abs_diff_eq!(*er.p_mat()?, Array2::from_elem((3, 3), 4.0 / 9.0));
        assert_eq!(er.n_parameters()?, 1);
        assert_eq!(er.kind(), ModelKind::Er);
        assert!(er.degree_corrections()?.is_none());
        Ok(())
    }

    #[test]
    fn dcer_counts_corrections() -> Result<()> {
        let graph = array![[0., 1., 1.], [1., 0., 0.], [1., 0., 0.]];
        let mut dcer = ErEstimator::dcer();
        dcer.fit(&graph.into())?;

        assert_eq!(dcer.kind(), ModelKind::Dcer);
        assert_eq!(dcer.n_parameters()?, 1 + 3);
        assert!(!dcer.options().loops);
        let theta = dcer.degree_corrections()?.unwrap();
        assert_abs_diff_eq!(theta.sum(), 3.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn labels_are_ignored() -> Result<()> {
        let graph: GraphInput = array![[0., 1.], [1., 0.]].into();
        let mut er = ErEstimator::new(EstimatorOptions::erdos_renyi());
        GraphEstimator::<&str>::fit(&mut er, &graph, Some(&["a", "b"][..]))?;
        assert_abs_diff_eq!(er.p()?, 0.5);
        Ok(())
    }

    #[test]
    fn errors() {
        let mut er = ErEstimator::new(EstimatorOptions::erdos_renyi());
        assert_eq!(er.p(), Err(GraphModelError::NotFitted));

        let empty: GraphInput = Array2::<f64>::zeros((0, 0)).into();
        assert_eq!(er.fit(&empty).unwrap_err().kind(), ErrorKind::Validation);

        let mut weighted = ErEstimator::new(EstimatorOptions {
            fit_weights: true,
            ..EstimatorOptions::erdos_renyi()
        });
        let graph: GraphInput = array![[0., 1.], [1., 0.]].into();
        assert_eq!(weighted.fit(&graph).unwrap_err().kind(), ErrorKind::NotImplemented);
    }
}
