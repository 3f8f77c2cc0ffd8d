//! Lonely: small personal-use utilities.
//!
//! # Overview
//!
//! - [`gnuplot`]: a codec between gnuplot's data file convention and
//!   quadruply-nested arrays, with axis permutation
//! - [`decorator`]: wrappers around function calls (immediate invocation,
//!   memoization, call tracing)
//! - [`error`]: error types
//!
//! # Quick Start
//!
//! ```rust
//! use lonely::gnuplot::{dumps, loads, Spec};
//!
//! // Rows of (x, y) pairs, read as one array of xs and one of ys.
//! let spec = Spec::default().comment(Some("#")).order("dblw", "wdbl").unwrap();
//! let data = loads("# x y\n0 10\n1 11\n2 12\n", &spec).unwrap();
//! assert_eq!(data[0][0][0], vec![0.0, 1.0, 2.0]);
//! assert_eq!(data[1][0][0], vec![10.0, 11.0, 12.0]);
//!
//! // Encoding with the same spec restores the file layout.
//! assert_eq!(dumps(&data, &spec).unwrap(), "0.0 10.0\n1.0 11.0\n2.0 12.0");
//! ```
//!
//! # Text Format
//!
//! - Fields: anything `f64::from_str` accepts, separated by spaces or tabs
//! - Rows: separated by a line break
//! - Blocks: separated by one blank line
//! - Datasets: separated by two blank lines
//! - Comments: lines starting with the [`Spec`]'s comment prefix, removed before
//!   blank lines are interpreted

pub mod decorator;
pub mod error;
pub mod gnuplot;

// Re-export commonly used types at crate root
pub use decorator::{debug, debug_rec, invoke, memoize, memoize_onevar};
pub use error::{DecodeError, EncodeError, Error, ShapeError, SpecError};
pub use gnuplot::{dump, dumps, load, loads, AxisOrder, Grid, Spec};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
