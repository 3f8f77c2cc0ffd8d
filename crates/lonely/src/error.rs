//! Error types for the gnuplot grid codec.

use thiserror::Error;

/// Error while constructing a [`Spec`](crate::gnuplot::Spec).
///
/// Raised eagerly by the constructor; a `Spec` is never partially built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    #[error("axis order {order:?} has {len} labels (expected 4)")]
    WrongLength { order: String, len: usize },

    #[error("{end:?} is not a permutation of {start:?}")]
    NotAPermutation { start: String, end: String },

    #[error("axis order {order:?} has duplicates")]
    DuplicateAxis { order: String },
}

/// Error raised when nested data cannot be transposed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("ragged data at level {level}: expected length {expected}, found {found}")]
    Ragged {
        level: usize,
        expected: usize,
        found: usize,
    },
}

/// Error while decoding a gnuplot data file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error(
        "could not parse {token:?} as a number \
         (dataset {dataset}, block {block}, row {row}, field {field})"
    )]
    InvalidNumber {
        token: String,
        dataset: usize,
        block: usize,
        row: usize,
        field: usize,
    },

    #[error("cannot permute decoded data: {0}")]
    Shape(#[from] ShapeError),
}

/// Error while encoding a grid to a gnuplot data file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("cannot permute data for encoding: {0}")]
    Shape(#[from] ShapeError),
}

/// Error from the stream-based entry points ([`load`](crate::gnuplot::load),
/// [`dump`](crate::gnuplot::dump)).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
