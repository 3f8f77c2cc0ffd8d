//! Conversion between gnuplot data files and quadruply-nested arrays.
//!
//! A gnuplot data file is read as four levels of nesting, outermost first:
//! datasets separated by two blank lines, blocks separated by one blank
//! line, rows separated by line breaks, and fields separated by spaces.
//! A [`Spec`] may relabel these levels so that the in-memory [`Grid`] is a
//! transpose of the file's natural order.
//!
//! ```rust
//! use lonely::gnuplot::{dumps, loads, Spec};
//!
//! let spec = Spec::default().comment(Some("#"));
//! let data = loads("# x y\n1 2\n3 4\n\n5 6\n", &spec).unwrap();
//! assert_eq!(data, vec![vec![vec![vec![1.0, 2.0], vec![3.0, 4.0]], vec![vec![5.0, 6.0]]]]);
//! assert_eq!(dumps(&data, &spec).unwrap(), "1.0 2.0\n3.0 4.0\n\n5.0 6.0");
//! ```

pub mod codec;
pub mod permute;
pub mod spec;

pub use codec::{dump, dumps, load, loads};
pub use permute::{invert, permute, shape, Grid};
pub use spec::{solve_permutation, AxisOrder, Spec, NDIM};
