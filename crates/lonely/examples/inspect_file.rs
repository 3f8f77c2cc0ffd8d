//! Simple decoder to inspect gnuplot data files.

use std::fs;

use lonely::gnuplot::{loads, shape, Spec};

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data.dat".to_string());

    println!("Reading: {}", path);

    let text = fs::read_to_string(&path).expect("Failed to read file");
    println!("File size: {} bytes", text.len());

    let spec = Spec::default().comment(Some("#"));
    let data = loads(&text, &spec).expect("Failed to decode");

    println!("\n=== Layout ===");
    println!("Datasets: {}", data.len());
    for (i, dataset) in data.iter().enumerate() {
        let rows: usize = dataset.iter().map(Vec::len).sum();
        println!("  [{}] {} blocks, {} rows", i, dataset.len(), rows);
    }

    match shape(&data) {
        Ok(dims) => println!("Shape: {:?} (can be permuted)", dims),
        Err(e) => println!("Ragged: {}", e),
    }

    // Show the first few rows in detail
    println!("\n=== First 10 Rows ===");
    let rows = data
        .iter()
        .enumerate()
        .flat_map(|(d, dataset)| {
            dataset.iter().enumerate().flat_map(move |(b, block)| {
                block.iter().enumerate().map(move |(l, row)| ((d, b, l), row))
            })
        })
        .take(10);
    for ((d, b, l), row) in rows {
        println!("[{} {} {}] {:?}", d, b, l, row);
    }
}
