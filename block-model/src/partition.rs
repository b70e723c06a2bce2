//! Block partition of the vertices derived from a label assignment.
//!
//! Blocks are ordered by ascending label value. For each vertex we keep
//! the index of its block (`block_inv`), and for each block its size and
//! its member vertices in ascending order.

use crate::error::{GraphModelError, Result};
use log::debug;
use matrix_util::utils::partition_by_membership;
use std::fmt::Debug;
use std::hash::Hash;

/// Anything usable as a vertex label: hashable and totally ordered.
pub trait BlockLabel: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> BlockLabel for T where T: Clone + Eq + Hash + Ord + Debug + Send + Sync {}

/// Partition of `n` vertices into `k` blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockPartition<L> {
    block_labels: Vec<L>,
    block_inv: Vec<usize>,
    block_sizes: Vec<usize>,
    block_members: Vec<Vec<usize>>,
}

impl<L: BlockLabel> BlockPartition<L> {
    /// Partition by the distinct values of `labels` (one per vertex).
    pub fn from_labels(labels: &[L]) -> Self {
        let groups = partition_by_membership(labels);

        let mut block_inv = vec![0; labels.len()];
        let mut block_labels = Vec::with_capacity(groups.len());
        let mut block_sizes = Vec::with_capacity(groups.len());
        let mut block_members = Vec::with_capacity(groups.len());

        for (b, (label, members)) in groups.into_iter().enumerate() {
            for &v in members.iter() {
                block_inv[v] = b;
            }
            block_labels.push(label);
            block_sizes.push(members.len());
            block_members.push(members);
        }

        debug!(
            "partitioned {} vertices into {} blocks: sizes {:?}",
            labels.len(),
            block_labels.len(),
            block_sizes
        );

        BlockPartition {
            block_labels,
            block_inv,
            block_sizes,
            block_members,
        }
    }

    /// Partition `n` vertices by `labels`, failing if the lengths differ.
    pub fn for_graph(labels: &[L], n: usize) -> Result<Self> {
        if labels.len() != n {
            return Err(GraphModelError::InvalidLabels(format!(
                "{} labels for a graph of {} vertices",
                labels.len(),
                n
            )));
        }
        Ok(Self::from_labels(labels))
    }

    /// Partition against a declared set of blocks.
    ///
    /// Every declared block is kept even if no vertex carries its
    /// label, so the result may contain empty blocks; every label must
    /// be one of `blocks`.
    pub fn with_blocks(labels: &[L], blocks: &[L]) -> Result<Self> {
        let mut block_labels = blocks.to_vec();
        block_labels.sort();
        block_labels.dedup();

        let k = block_labels.len();
        let mut block_inv = Vec::with_capacity(labels.len());
        let mut block_members = vec![vec![]; k];

        for (v, label) in labels.iter().enumerate() {
            let b = block_labels.binary_search(label).map_err(|_| {
                GraphModelError::InvalidLabels(format!(
                    "vertex {} has label {:?}, which is not a declared block",
                    v, label
                ))
            })?;
            block_inv.push(b);
            block_members[b].push(v);
        }

        let block_sizes = block_members.iter().map(|m| m.len()).collect();

        Ok(BlockPartition {
            block_labels,
            block_inv,
            block_sizes,
            block_members,
        })
    }
}

impl<L> BlockPartition<L> {
    /// Number of blocks `k`
    pub fn num_blocks(&self) -> usize {
        self.block_labels.len()
    }

    /// Number of vertices `n`
    pub fn num_vertices(&self) -> usize {
        self.block_inv.len()
    }

    /// Distinct labels in ascending order
    pub fn block_labels(&self) -> &[L] {
        &self.block_labels
    }

    /// Block index of each vertex
    pub fn block_inv(&self) -> &[usize] {
        &self.block_inv
    }

    /// Number of vertices in each block
    pub fn block_sizes(&self) -> &[usize] {
        &self.block_sizes
    }

    /// Member vertices of block `b`, ascending
    pub fn members(&self, b: usize) -> &[usize] {
        &self.block_members[b]
    }

    /// Fail with [`GraphModelError::EmptyBlock`] on the first empty block
    pub fn check_nonempty(&self) -> Result<()> {
        match self.block_sizes.iter().position(|&s| s == 0) {
            Some(block) => Err(GraphModelError::EmptyBlock { block }),
            None => Ok(()),
        }
    }
}
