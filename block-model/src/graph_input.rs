//! Graph representations accepted by the estimators, and their
//! normalisation to a dense square `f64` adjacency matrix.
//!
//! Dense input may come as floating, integer or boolean arrays of any
//! dimensionality; dimensionality and squareness are checked here, once,
//! so everything downstream only sees `Array2<f64>`.

use crate::error::{GraphModelError, Result};
use ndarray::prelude::*;
use std::any::{type_name, Any};
use std::collections::{BTreeMap, BTreeSet};

/// Identifier of a vertex in a [`NodeLinkGraph`].
///
/// Keys are totally ordered (all indices before all names), which fixes
/// the row/column order of the converted matrix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKey {
    /// Integer node id
    Index(i64),
    /// Named node
    Name(Box<str>),
}

impl From<i64> for NodeKey {
    fn from(x: i64) -> Self {
        NodeKey::Index(x)
    }
}

impl From<i32> for NodeKey {
    fn from(x: i32) -> Self {
        NodeKey::Index(x as i64)
    }
}

impl From<usize> for NodeKey {
    fn from(x: usize) -> Self {
        NodeKey::Index(x as i64)
    }
}

impl From<&str> for NodeKey {
    fn from(x: &str) -> Self {
        NodeKey::Name(x.into())
    }
}

impl From<String> for NodeKey {
    fn from(x: String) -> Self {
        NodeKey::Name(x.into_boxed_str())
    }
}

/// A node-link graph: a node set plus weighted edges.
///
/// Adding an edge implicitly adds its endpoints. Adding the same edge
/// twice keeps the last weight. For an undirected graph `(u, v)` and
/// `(v, u)` are the same edge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLinkGraph {
    directed: bool,
    nodes: BTreeSet<NodeKey>,
    edges: BTreeMap<(NodeKey, NodeKey), f64>,
}

impl NodeLinkGraph {
    /// An empty graph
    pub fn new(directed: bool) -> Self {
        NodeLinkGraph {
            directed,
            ..Default::default()
        }
    }

    /// Whether `(u, v)` and `(v, u)` are distinct edges
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Add an isolated node (no-op if present)
    pub fn add_node(&mut self, key: impl Into<NodeKey>) -> &mut Self {
        self.nodes.insert(key.into());
        self
    }

    /// Add (or re-weight) the edge `u -> v`
    pub fn add_edge(
        &mut self,
        u: impl Into<NodeKey>,
        v: impl Into<NodeKey>,
        weight: f64,
    ) -> &mut Self {
        let (u, v) = (u.into(), v.into());
        self.nodes.insert(u.clone());
        self.nodes.insert(v.clone());

        let key = if self.directed || u <= v { (u, v) } else { (v, u) };
        self.edges.insert(key, weight);
        self
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Nodes in the order used for matrix rows and columns
    pub fn nodes(&self) -> impl Iterator<Item = &NodeKey> {
        self.nodes.iter()
    }

    /// Dense weighted adjacency matrix in ascending node order.
    /// Undirected edges are written to both `(u, v)` and `(v, u)`.
    pub fn to_adjacency(&self) -> Array2<f64> {
        let position: BTreeMap<&NodeKey, usize> =
            self.nodes.iter().enumerate().map(|(i, k)| (k, i)).collect();

        let n = self.nodes.len();
        let mut adj = Array2::<f64>::zeros((n, n));

        for ((u, v), &w) in self.edges.iter() {
            let (i, j) = (position[u], position[v]);
            adj[(i, j)] = w;
            if !self.directed {
                adj[(j, i)] = w;
            }
        }
        adj
    }
}

/// Every graph representation the estimators accept.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphInput {
    /// Floating-point array, used as is
    Float(ArrayD<f64>),
    /// Integer array, converted to `f64`
    Integer(ArrayD<i64>),
    /// Boolean array, converted to 0/1
    Boolean(ArrayD<bool>),
    /// Node-link graph, converted in sorted node order
    NodeLink(NodeLinkGraph),
}

impl<D: Dimension> From<Array<f64, D>> for GraphInput {
    fn from(x: Array<f64, D>) -> Self {
        GraphInput::Float(x.into_dyn())
    }
}

impl<D: Dimension> From<Array<f32, D>> for GraphInput {
    fn from(x: Array<f32, D>) -> Self {
        GraphInput::Float(x.mapv(|v| v as f64).into_dyn())
    }
}

impl<D: Dimension> From<Array<i64, D>> for GraphInput {
    fn from(x: Array<i64, D>) -> Self {
        GraphInput::Integer(x.into_dyn())
    }
}

impl<D: Dimension> From<Array<bool, D>> for GraphInput {
    fn from(x: Array<bool, D>) -> Self {
        GraphInput::Boolean(x.into_dyn())
    }
}

impl From<NodeLinkGraph> for GraphInput {
    fn from(g: NodeLinkGraph) -> Self {
        GraphInput::NodeLink(g)
    }
}

impl From<&Array2<f64>> for GraphInput {
    fn from(x: &Array2<f64>) -> Self {
        GraphInput::Float(x.clone().into_dyn())
    }
}

impl GraphInput {
    /// Classify a value whose concrete type is only known at runtime.
    ///
    /// Recognises `Array2`/`ArrayD` of `f64`, `f32`, `i64` and `bool`,
    /// [`NodeLinkGraph`] and `GraphInput` itself. Anything else fails
    /// with [`GraphModelError::UnsupportedInput`] naming the type.
    pub fn from_value<T: Any>(value: &T) -> Result<GraphInput> {
        let any = value as &dyn Any;

        if let Some(x) = any.downcast_ref::<GraphInput>() {
            return Ok(x.clone());
        }
        if let Some(g) = any.downcast_ref::<NodeLinkGraph>() {
            return Ok(g.clone().into());
        }
        if let Some(x) = any.downcast_ref::<Array2<f64>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<ArrayD<f64>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<Array2<f32>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<ArrayD<f32>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<Array2<i64>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<ArrayD<i64>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<Array2<bool>>() {
            return Ok(x.clone().into());
        }
        if let Some(x) = any.downcast_ref::<ArrayD<bool>>() {
            return Ok(x.clone().into());
        }

        Err(GraphModelError::UnsupportedInput(format!(
            "expected a dense matrix or a node-link graph, not {}",
            type_name::<T>()
        )))
    }

    /// Normalise to a dense square `f64` adjacency matrix.
    ///
    /// Fails with [`GraphModelError::Shape`] if a dense input is not
    /// two-dimensional or not square, and with
    /// [`GraphModelError::InvalidEntry`] on the first negative or
    /// non-finite entry.
    pub fn to_adjacency(&self) -> Result<Array2<f64>> {
        let adj = match self {
            GraphInput::Float(x) => square_matrix(x.clone())?,
            GraphInput::Integer(x) => square_matrix(x.mapv(|v| v as f64))?,
            GraphInput::Boolean(x) => square_matrix(x.mapv(|v| if v { 1.0 } else { 0.0 }))?,
            GraphInput::NodeLink(g) => g.to_adjacency(),
        };
        check_entries(&adj)?;
        Ok(adj)
    }
}

fn check_entries(adj: &Array2<f64>) -> Result<()> {
    match adj.indexed_iter().find(|&(_, &x)| !x.is_finite() || x < 0.0) {
        Some(((row, col), &value)) => Err(GraphModelError::InvalidEntry { row, col, value }),
        None => Ok(()),
    }
}

fn square_matrix(x: ArrayD<f64>) -> Result<Array2<f64>> {
    if x.ndim() != 2 {
        return Err(GraphModelError::Shape(format!(
            "matrix has {} dimensions, expected 2",
            x.ndim()
        )));
    }

    let x = x
        .into_dimensionality::<Ix2>()
        .map_err(|e| GraphModelError::Shape(e.to_string()))?;

    let (nrow, ncol) = x.dim();
    if nrow != ncol {
        return Err(GraphModelError::Shape(format!(
            "matrix is not square: {} x {}",
            nrow, ncol
        )));
    }
    Ok(x)
}
