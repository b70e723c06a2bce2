/// Line-oriented file I/O (plain or gzipped)
pub mod common_io;

/// Delimited text I/O for `ndarray::Array2`
pub mod ndarray_io;

/// Adjacency-matrix operations for `ndarray::Array2`
pub mod ndarray_util;

/// Traits implemented by the matrix types
pub mod traits;

/// Grouping helpers
pub mod utils;
