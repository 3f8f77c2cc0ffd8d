//! Reading and writing gnuplot data files.
//!
//! Data is delimited by non-line-breaking whitespace, then line breaks,
//! then blank lines, and then double blank lines.

use std::io::{Read, Write};

use log::{debug, trace};

use crate::error::{DecodeError, EncodeError, Error};
use crate::gnuplot::permute::{permute, Grid};
use crate::gnuplot::spec::Spec;

const DATASET_SEP: &str = "\n\n\n";
const BLOCK_SEP: &str = "\n\n";
const ROW_SEP: &str = "\n";
const FIELD_SEP: &str = " ";

// =============================================================================
// DECODING
// =============================================================================

/// Loads a gnuplot data file from a string.
///
/// Lines whose first non-blank text is the `Spec`'s comment prefix are removed
/// before any blank lines are interpreted. Blank chunks at the dataset and
/// block levels are dropped, which absorbs stray leading and trailing
/// separators.
pub fn loads(text: &str, spec: &Spec) -> Result<Grid, DecodeError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| match spec.comment_prefix() {
            Some(prefix) => !line.starts_with(prefix),
            None => true,
        })
        .collect();
    let concat = lines.join(ROW_SEP);

    let mut data = Grid::new();
    for (d, chunk) in concat.split(DATASET_SEP).filter(|s| !is_blank(s)).enumerate() {
        let mut dataset = Vec::new();
        for (b, block_text) in chunk.split(BLOCK_SEP).filter(|s| !is_blank(s)).enumerate() {
            let mut block = Vec::new();
            for (r, line) in block_text.split(ROW_SEP).enumerate() {
                let row = line
                    .split_whitespace()
                    .enumerate()
                    .map(|(f, token)| {
                        token.parse::<f64>().map_err(|_| DecodeError::InvalidNumber {
                            token: token.to_string(),
                            dataset: d,
                            block: b,
                            row: r,
                            field: f,
                        })
                    })
                    .collect::<Result<Vec<f64>, _>>()?;
                block.push(row);
            }
            dataset.push(block);
        }
        data.push(dataset);
    }
    trace!(
        "decoded {} datasets, {} blocks",
        data.len(),
        data.iter().map(Vec::len).sum::<usize>()
    );

    if spec.has_nontrivial_order() {
        debug!("permuting {} -> {}", spec.file_order(), spec.logical_order());
        data = permute(&data, spec.file_to_logical())?;
    }
    Ok(data)
}

/// Loads a gnuplot data file from a reader.
pub fn load<R: Read>(mut reader: R, spec: &Spec) -> Result<Grid, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(loads(&text, spec)?)
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| matches!(c, ' ' | '\n' | '\r' | '\t'))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Dumps a grid to a string in gnuplot data file format.
///
/// Numbers are written in their shortest round-trip form, switching to
/// exponent notation at extreme magnitudes. No trailing newline is written.
pub fn dumps(data: &[Vec<Vec<Vec<f64>>>], spec: &Spec) -> Result<String, EncodeError> {
    let permuted;
    let data = if spec.has_nontrivial_order() {
        debug!("permuting {} -> {}", spec.logical_order(), spec.file_order());
        permuted = permute(data, spec.logical_to_file())?;
        permuted.as_slice()
    } else {
        data
    };

    let text = data
        .iter()
        .map(|dataset| {
            dataset
                .iter()
                .map(|block| {
                    block
                        .iter()
                        .map(|row| {
                            row.iter()
                                .map(|x| format!("{x:?}"))
                                .collect::<Vec<_>>()
                                .join(FIELD_SEP)
                        })
                        .collect::<Vec<_>>()
                        .join(ROW_SEP)
                })
                .collect::<Vec<_>>()
                .join(BLOCK_SEP)
        })
        .collect::<Vec<_>>()
        .join(DATASET_SEP);
    Ok(text)
}

/// Dumps a grid to a writer, followed by a single newline.
pub fn dump<W: Write>(data: &[Vec<Vec<Vec<f64>>>], mut writer: W, spec: &Spec) -> Result<(), Error> {
    let text = dumps(data, spec)?;
    writeln!(writer, "{text}")?;
    writer.flush()?;
    Ok(())
}
