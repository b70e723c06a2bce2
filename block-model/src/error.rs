//! Error types for fitting, scoring and sampling graph models.
//!
//! Validation errors are raised before any computation begins, so a
//! failed `fit` never leaves a half-updated model behind.

/// Coarse class of a [`GraphModelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad input: shape, type or labels
    Validation,
    /// The requested feature is not available
    NotImplemented,
    /// A fitted-state query was made before `fit`
    NotFitted,
    /// The data produced a degenerate model, e.g., an empty block
    Degenerate,
}

/// Primary error type of the `block-model` crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphModelError {
    /// The graph is not a non-empty square two-dimensional matrix.
    #[error("shape error: {0}")]
    Shape(String),

    /// The graph representation is not one we can convert.
    #[error("unsupported graph input: {0}")]
    UnsupportedInput(String),

    /// An adjacency entry is negative, infinite or NaN.
    #[error("invalid adjacency entry {value} at ({row}, {col}): must be finite and non-negative")]
    InvalidEntry {
        /// Row (source vertex).
        row: usize,
        /// Column (target vertex).
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// Vertex labels do not match the graph.
    #[error("invalid vertex labels: {0}")]
    InvalidLabels(String),

    /// A declared block has no member vertices.
    #[error("empty block: block {block} has no vertices")]
    EmptyBlock {
        /// Index of the block in the canonical (ascending) block order.
        block: usize,
    },

    /// A probability-matrix entry cannot parameterise a Bernoulli draw.
    #[error("invalid edge probability {value} at ({row}, {col})")]
    InvalidProbability {
        /// Row (source vertex).
        row: usize,
        /// Column (target vertex).
        col: usize,
        /// The offending value.
        value: f64,
    },

    /// An argument is outside its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Feature not available in this implementation.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    /// The estimator has no fitted state yet.
    #[error("model not fitted: call `fit` first")]
    NotFitted,
}

impl GraphModelError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphModelError::Shape(_)
            | GraphModelError::UnsupportedInput(_)
            | GraphModelError::InvalidEntry { .. }
            | GraphModelError::InvalidLabels(_)
            | GraphModelError::InvalidProbability { .. }
            | GraphModelError::InvalidArgument(_) => ErrorKind::Validation,
            GraphModelError::EmptyBlock { .. } => ErrorKind::Degenerate,
            GraphModelError::NotImplemented(_) => ErrorKind::NotImplemented,
            GraphModelError::NotFitted => ErrorKind::NotFitted,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphModelError>;
