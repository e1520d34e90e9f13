//! Summarise one numeric column of a TSV stream read from stdin.
//!
//! ```sh
//! printf 'a\t1.5\nb\t2\nc\tx\n' | cargo run --example column_stats -- 2
//! ```
//!
//! Rows whose column does not parse are counted and skipped.
#![allow(missing_docs)]

use std::io;

use dsvreader::Reader;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let column: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(1);
    if column == 0 {
        return Err("columns are numbered from 1".into());
    }

    let mut reader = Reader::tsv(io::stdin().lock());
    let (mut count, mut sum, mut skipped) = (0u64, 0f64, 0u64);
    let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);

    while reader.next_row() {
        for _ in 1..column {
            reader.skip_col();
        }
        let value = reader.float64();
        if let Some(err) = reader.error() {
            eprintln!("skipping: {err}");
            skipped += 1;
            reader.reset_error();
            continue;
        }
        while reader.has_cols() {
            reader.skip_col();
        }
        count += 1;
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }
    if let Some(err) = reader.error() {
        return Err(err.clone().into());
    }

    println!("rows: {count}, skipped: {skipped}");
    if count > 0 {
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / count as f64;
        println!("min: {min}, max: {max}, mean: {mean}");
    }
    Ok(())
}
