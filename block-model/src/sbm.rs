//! Stochastic block model with a-priori block labels, optionally
//! degree-corrected.
//!
//! ```text
//! P(i, j) = B(z(i), z(j))                         (SBM)
//! P(i, j) = min(1, theta(i) theta(j) B(z(i), z(j)))   (DCSBM)
//! ```

use crate::block_fit::{fit_blocks, BlockFit};
use crate::error::{GraphModelError, Result};
use crate::estimator::{EstimatorOptions, GraphEstimator, GraphModel, ModelKind};
use crate::graph_input::GraphInput;
use crate::partition::{BlockLabel, BlockPartition};
use log::info;
use ndarray::prelude::*;

/// Stochastic block model estimator.
///
/// # Usage
///
/// ```
/// use block_model::{EstimatorOptions, GraphEstimator, GraphModel, SbmEstimator};
/// use ndarray::array;
///
/// let graph = array![[0., 1., 1., 0.], [1., 0., 0., 1.], [1., 0., 0., 1.], [0., 1., 1., 0.]];
/// let labels = [0, 1, 1, 0];
/// let mut sbm = SbmEstimator::new(EstimatorOptions::sbm());
/// sbm.fit(&graph.into(), Some(&labels[..])).unwrap();
///
/// assert_eq!(sbm.block_p().unwrap(), &array![[0., 1.], [1., 0.]]);
/// assert_eq!(sbm.n_parameters().unwrap(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct SbmEstimator<L> {
    options: EstimatorOptions,
    fitted: Option<BlockFit<L>>,
}

impl<L: BlockLabel> SbmEstimator<L> {
    /// An unfitted SBM; degree correction follows `options.fit_degrees`
    pub fn new(options: EstimatorOptions) -> Self {
        SbmEstimator {
            options,
            fitted: None,
        }
    }

    /// An unfitted DCSBM with the block-model defaults
    pub fn dcsbm() -> Self {
        Self::dcsbm_with(EstimatorOptions::sbm())
    }

    /// An unfitted DCSBM; `fit_degrees` is forced on
    pub fn dcsbm_with(options: EstimatorOptions) -> Self {
        Self::new(EstimatorOptions {
            fit_degrees: true,
            ..options
        })
    }

    /// Fit against a declared block set. Blocks no vertex belongs to
    /// make the fit fail with [`GraphModelError::EmptyBlock`].
    pub fn fit_with_blocks(&mut self, graph: &GraphInput, labels: &[L], blocks: &[L]) -> Result<()> {
        self.options.check_supported()?;
        let graph = graph.to_adjacency()?;
        if labels.len() != graph.nrows() {
            return Err(GraphModelError::InvalidLabels(format!(
                "{} labels for a graph of {} vertices",
                labels.len(),
                graph.nrows()
            )));
        }
        let partition = BlockPartition::with_blocks(labels, blocks)?;
        self.install(&graph, partition)
    }

    fn install(&mut self, graph: &Array2<f64>, partition: BlockPartition<L>) -> Result<()> {
        if graph.nrows() == 0 {
            return Err(GraphModelError::Shape("graph has no vertices".into()));
        }

        let fit = fit_blocks(graph, partition, self.options.fit_degrees)?;

        info!(
            "{}: n={}, K={}, directed={}, loops={}, #params={}",
            self.kind(),
            fit.n_vertices(),
            fit.partition.num_blocks(),
            self.options.directed,
            self.options.loops,
            Self::count_parameters(&fit),
        );

        self.fitted = Some(fit);
        Ok(())
    }

    fn count_parameters(fit: &BlockFit<L>) -> usize {
        let mut n_parameters = fit.block_p.len() + fit.partition.block_sizes().len();
        if let Some(theta) = fit.degree_corrections.as_ref() {
            n_parameters += theta.len();
        }
        n_parameters
    }

    fn fitted(&self) -> Result<&BlockFit<L>> {
        self.fitted.as_ref().ok_or(GraphModelError::NotFitted)
    }

    /// Fitted `k x k` block probability matrix
    pub fn block_p(&self) -> Result<&Array2<f64>> {
        Ok(&self.fitted()?.block_p)
    }

    /// Distinct block labels, ascending
    pub fn block_labels(&self) -> Result<&[L]> {
        Ok(self.fitted()?.partition.block_labels())
    }

    /// Block index of each vertex
    pub fn block_inv(&self) -> Result<&[usize]> {
        Ok(self.fitted()?.partition.block_inv())
    }

    /// Number of vertices in each block
    pub fn block_sizes(&self) -> Result<&[usize]> {
        Ok(self.fitted()?.partition.block_sizes())
    }

    /// Per-vertex degree corrections; `None` if not fitted with them
    pub fn degree_corrections(&self) -> Result<Option<&Array1<f64>>> {
        Ok(self.fitted()?.degree_corrections.as_ref())
    }

    /// The whole fitted state
    pub fn block_fit(&self) -> Result<&BlockFit<L>> {
        self.fitted()
    }
}

impl<L: BlockLabel> GraphModel for SbmEstimator<L> {
    fn options(&self) -> &EstimatorOptions {
        &self.options
    }

    fn kind(&self) -> ModelKind {
        if self.options.fit_degrees {
            ModelKind::Dcsbm
        } else {
            ModelKind::Sbm
        }
    }

    fn p_mat(&self) -> Result<&Array2<f64>> {
        Ok(&self.fitted()?.p_mat)
    }

    /// `k^2` block probabilities + `k` block sizes (+ `n` degree
    /// corrections)
    fn n_parameters(&self) -> Result<usize> {
        Ok(Self::count_parameters(self.fitted()?))
    }
}

impl<L: BlockLabel> GraphEstimator<L> for SbmEstimator<L> {
    fn fit(&mut self, graph: &GraphInput, labels: Option<&[L]>) -> Result<()> {
        let labels = labels.ok_or(GraphModelError::NotImplemented(
            "fitting without vertex labels (a posteriori block assignment)",
        ))?;
        self.options.check_supported()?;

        let graph = graph.to_adjacency()?;
        let partition = BlockPartition::for_graph(labels, graph.nrows())?;
        self.install(&graph, partition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn bipartite() -> GraphInput {
        array![[0., 1., 1., 0.], [1., 0., 0., 1.], [1., 0., 0., 1.], [0., 1., 1., 0.]].into()
    }

    #[test]
    fn recovers_the_bipartite_graph() -> Result<()> {
        let mut sbm = SbmEstimator::new(EstimatorOptions::sbm());
        let labels = ["u", "v", "v", "u"];
        sbm.fit(&bipartite(), Some(&labels[..]))?;

        assert_eq!(sbm.block_p()?, &array![[0., 1.], [1., 0.]]);
        assert_eq!(sbm.p_mat()?, &bipartite().to_adjacency()?);
        assert_eq!(sbm.block_labels()?, &["u", "v"]);
        assert_eq!(sbm.block_sizes()?, &[2, 2]);
        assert!(sbm.degree_corrections()?.is_none());
        assert_eq!(sbm.n_parameters()?, 4 + 2);
        assert_eq!(sbm.kind(), ModelKind::Sbm);
        Ok(())
    }

    #[test]
    fn dcsbm_adds_one_parameter_per_vertex() -> Result<()> {
        let mut dcsbm = SbmEstimator::dcsbm();
        dcsbm.fit(&bipartite(), Some(&[0, 1, 1, 0][..]))?;

        assert_eq!(dcsbm.kind(), ModelKind::Dcsbm);
        assert_eq!(dcsbm.n_parameters()?, 4 + 2 + 4);
        assert!(dcsbm.degree_corrections()?.is_some());
        Ok(())
    }

    #[test]
    fn queries_before_fit() {
        let sbm = SbmEstimator::<usize>::new(EstimatorOptions::sbm());
        assert_eq!(sbm.n_parameters(), Err(GraphModelError::NotFitted));
        assert_eq!(sbm.sample().unwrap_err().kind(), ErrorKind::NotFitted);
        assert!(sbm.block_p().is_err());
    }

    #[test]
    fn missing_labels_and_weights_are_not_implemented() {
        let mut sbm = SbmEstimator::<usize>::new(EstimatorOptions::sbm());
        let err = sbm.fit(&bipartite(), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);

        let mut weighted = SbmEstimator::new(EstimatorOptions {
            fit_weights: true,
            ..EstimatorOptions::sbm()
        });
        let err = weighted.fit(&bipartite(), Some(&[0, 0, 1, 1][..])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        assert!(weighted.p_mat().is_err());
    }

    #[test]
    fn failed_refit_keeps_previous_state() -> Result<()> {
        let mut sbm = SbmEstimator::new(EstimatorOptions::sbm());
        sbm.fit(&bipartite(), Some(&[0, 1, 1, 0][..]))?;
        let before = sbm.block_fit()?.clone();

        let bad = sbm.fit(&bipartite(), Some(&[0, 1, 1][..]));
        assert!(matches!(bad, Err(GraphModelError::InvalidLabels(_))));

        let rect: GraphInput = Array2::<f64>::zeros((3, 4)).into();
        let res = sbm.fit(&rect, Some(&[0, 1, 1][..]));
        assert!(matches!(res, Err(GraphModelError::Shape(_))));

        assert_eq!(sbm.block_fit()?, &before);
        Ok(())
    }

    #[test]
    fn declared_empty_block() {
        let mut sbm = SbmEstimator::new(EstimatorOptions::sbm());
        let res = sbm.fit_with_blocks(&bipartite(), &[0, 2, 2, 0], &[0, 1, 2]);
        assert_eq!(res, Err(GraphModelError::EmptyBlock { block: 1 }));
        assert!(sbm.p_mat().is_err());
    }
}
