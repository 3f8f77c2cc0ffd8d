//! Axis orders and the immutable codec configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::SpecError;

/// Number of nesting levels in a grid.
pub const NDIM: usize = 4;

/// Labels for the four nesting levels, outermost to innermost.
///
/// The conventional labels are `d` (double blank line), `b` (blank line),
/// `l` (line) and `w` (word).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisOrder([char; NDIM]);

impl AxisOrder {
    /// `dblw`: the order in which gnuplot itself nests data.
    pub const DEFAULT: AxisOrder = AxisOrder(['d', 'b', 'l', 'w']);

    /// Returns the labels, outermost first.
    pub fn labels(&self) -> [char; NDIM] {
        self.0
    }

    /// Returns the position of `label` in this order.
    pub fn position(&self, label: char) -> Option<usize> {
        self.0.iter().position(|&c| c == label)
    }

    fn has_duplicates(&self) -> bool {
        (0..NDIM).any(|i| self.0[i + 1..].contains(&self.0[i]))
    }

    fn same_labels(&self, other: &AxisOrder) -> bool {
        self.0.iter().all(|c| other.0.contains(c)) && other.0.iter().all(|c| self.0.contains(c))
    }
}

impl Default for AxisOrder {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FromStr for AxisOrder {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let labels: [char; NDIM] = chars.as_slice().try_into().map_err(|_| SpecError::WrongLength {
            order: s.to_string(),
            len: chars.len(),
        })?;
        Ok(AxisOrder(labels))
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

/// Solves for the axes argument of a transpose taking `start` to `end`.
///
/// `out[i]` is the index in `start` of the label at `end[i]`.
pub fn solve_permutation(start: &AxisOrder, end: &AxisOrder) -> Result<[usize; NDIM], SpecError> {
    if !start.same_labels(end) {
        return Err(SpecError::NotAPermutation {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    for order in [start, end] {
        if order.has_duplicates() {
            return Err(SpecError::DuplicateAxis {
                order: order.to_string(),
            });
        }
    }

    let mut out = [0; NDIM];
    for (slot, &label) in out.iter_mut().zip(end.0.iter()) {
        // same_labels guarantees every label of `end` occurs in `start`
        *slot = start.position(label).ok_or_else(|| SpecError::NotAPermutation {
            start: start.to_string(),
            end: end.to_string(),
        })?;
    }
    debug_assert!((0..NDIM).all(|i| start.0[out[i]] == end.0[i]));
    Ok(out)
}

/// Configuration for reading and writing gnuplot data files.
///
/// A `Spec` is a value: the builder-style methods return a new `Spec`
/// and leave `self` untouched. Both axis maps are solved once, when the
/// `Spec` is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    comment: Option<String>,
    file_order: AxisOrder,
    logical_order: AxisOrder,
    file_to_logical: [usize; NDIM],
    logical_to_file: [usize; NDIM],
}

impl Spec {
    /// Creates a spec.
    ///
    /// `file_order` labels the nesting levels of the text file, and
    /// `logical_order` labels the levels of the in-memory grid using the
    /// same four symbols.
    pub fn new(comment: Option<&str>, file_order: &str, logical_order: &str) -> Result<Self, SpecError> {
        let file_order: AxisOrder = file_order.parse()?;
        let logical_order: AxisOrder = logical_order.parse()?;
        let comment = comment.filter(|c| !c.is_empty()).map(str::to_string);
        Self::from_orders(comment, file_order, logical_order)
    }

    fn from_orders(
        comment: Option<String>,
        file_order: AxisOrder,
        logical_order: AxisOrder,
    ) -> Result<Self, SpecError> {
        let file_to_logical = solve_permutation(&file_order, &logical_order)?;
        let logical_to_file = solve_permutation(&logical_order, &file_order)?;
        Ok(Self {
            comment,
            file_order,
            logical_order,
            file_to_logical,
            logical_to_file,
        })
    }

    /// Returns a copy of this spec with a different comment prefix.
    ///
    /// An empty prefix disables comment stripping, same as `None`.
    pub fn comment(&self, comment: Option<&str>) -> Self {
        Self {
            comment: comment.filter(|c| !c.is_empty()).map(str::to_string),
            ..self.clone()
        }
    }

    /// Returns a copy of this spec with different axis orders.
    pub fn order(&self, gnu: &str, json: &str) -> Result<Self, SpecError> {
        Self::new(self.comment_prefix(), gnu, json)
    }

    /// The active comment prefix, if any.
    pub fn comment_prefix(&self) -> Option<&str> {
        self.comment.as_deref().filter(|c| !c.is_empty())
    }

    pub fn file_order(&self) -> AxisOrder {
        self.file_order
    }

    pub fn logical_order(&self) -> AxisOrder {
        self.logical_order
    }

    /// Transpose axes taking file-order data to logical order.
    pub fn file_to_logical(&self) -> [usize; NDIM] {
        self.file_to_logical
    }

    /// Transpose axes taking logical-order data to file order.
    pub fn logical_to_file(&self) -> [usize; NDIM] {
        self.logical_to_file
    }

    /// True when the two orders are labelled differently.
    ///
    /// This compares labels, not the solved permutation.
    pub fn has_nontrivial_order(&self) -> bool {
        self.file_order != self.logical_order
    }
}

impl Default for Spec {
    fn default() -> Self {
        Self {
            comment: None,
            file_order: AxisOrder::DEFAULT,
            logical_order: AxisOrder::DEFAULT,
            file_to_logical: [0, 1, 2, 3],
            logical_to_file: [0, 1, 2, 3],
        }
    }
}
