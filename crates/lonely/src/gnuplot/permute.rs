//! Axis permutation for quadruply-nested data.

use crate::error::ShapeError;
use crate::gnuplot::spec::NDIM;

/// A quadruply-nested sequence of numbers: datasets, blocks, rows, fields.
pub type Grid = Vec<Vec<Vec<Vec<f64>>>>;

/// Returns the extent of each level of `grid`.
///
/// Every sibling at a level must have the same length. Levels beneath an
/// empty level have extent 0.
pub fn shape(grid: &[Vec<Vec<Vec<f64>>>]) -> Result<[usize; NDIM], ShapeError> {
    let datasets = grid.len();
    let blocks = grid.first().map_or(0, Vec::len);
    let rows = grid.first().and_then(|d| d.first()).map_or(0, Vec::len);
    let fields = grid
        .first()
        .and_then(|d| d.first())
        .and_then(|b| b.first())
        .map_or(0, Vec::len);

    let check = |level: usize, expected: usize, found: usize| {
        if expected == found {
            Ok(())
        } else {
            Err(ShapeError::Ragged {
                level,
                expected,
                found,
            })
        }
    };

    for dataset in grid {
        check(1, blocks, dataset.len())?;
        for block in dataset {
            check(2, rows, block.len())?;
            for row in block {
                check(3, fields, row.len())?;
            }
        }
    }
    Ok([datasets, blocks, rows, fields])
}

/// Transposes the levels of `grid`.
///
/// Level `i` of the output is level `axes[i]` of the input, so
/// `out[o0][o1][o2][o3] == grid[s0][s1][s2][s3]` where `s[axes[i]] = o[i]`.
/// `axes` must be a permutation of `0..4`.
pub fn permute(grid: &[Vec<Vec<Vec<f64>>>], axes: [usize; NDIM]) -> Result<Grid, ShapeError> {
    let dims = shape(grid)?;
    let out_dims = axes.map(|axis| dims[axis]);

    let at = |o: [usize; NDIM]| {
        let mut s = [0; NDIM];
        for (i, &axis) in axes.iter().enumerate() {
            s[axis] = o[i];
        }
        grid[s[0]][s[1]][s[2]][s[3]]
    };

    let mut out = Vec::with_capacity(out_dims[0]);
    for a in 0..out_dims[0] {
        let mut dataset = Vec::with_capacity(out_dims[1]);
        for b in 0..out_dims[1] {
            let mut block = Vec::with_capacity(out_dims[2]);
            for c in 0..out_dims[2] {
                let row = (0..out_dims[3]).map(|d| at([a, b, c, d])).collect();
                block.push(row);
            }
            dataset.push(block);
        }
        out.push(dataset);
    }
    Ok(out)
}

/// Returns the inverse of a permutation of `0..4`.
pub fn invert(axes: [usize; NDIM]) -> [usize; NDIM] {
    let mut inv = [0; NDIM];
    for (i, &axis) in axes.iter().enumerate() {
        inv[axis] = i;
    }
    inv
}
