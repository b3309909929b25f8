use csvfreq_common::{CsvFreqError, Result};
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::freq::FrequencyCounter;
use crate::render::{RowRenderer, WriterOptions};
use crate::stats::{derive_stats, header_row, StatsOptions, StatsRow};
use crate::table::{read_columns, Column, TableOptions};

#[derive(Debug, Clone, Default)]
pub struct FreqOptions {
    /// Comma-separated column indices and/or names.
    pub columns: String,
    pub table: TableOptions,
    pub stats: StatsOptions,
    pub writer: WriterOptions,
}

/// Per-column result of the frequency pipeline, before rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub column_name: String,
    pub total: u64,
    pub rows: Vec<StatsRow>,
}

/// Run counter, ranker, and stats deriver over one column.
pub fn column_frequency(column: &Column, opts: &StatsOptions) -> FrequencyReport {
    let mut counter = FrequencyCounter::new();
    for cell in &column.cells {
        counter.add(cell);
    }
    let total = counter.total();
    let rows = derive_stats(&counter.rank(), total, opts);
    FrequencyReport {
        column_name: column.name.clone(),
        total,
        rows,
    }
}

/// Full pipeline: validate the selector, materialize the selected columns,
/// then emit one self-contained header+rows table per column, in selector
/// order, into the single output stream.
///
/// Selector validation happens before any input is read; an unresolvable
/// selector aborts before any output is written. Columns are processed
/// independently and sequentially, each one's frequency state released
/// before the next begins.
pub fn run<R: Read, W: Write>(input: R, output: W, opts: &FreqOptions) -> Result<()> {
    if opts.columns.trim().is_empty() {
        return Err(CsvFreqError::MissingColumns);
    }
    let columns = read_columns(input, &opts.columns, &opts.table)?;
    let mut renderer = RowRenderer::new(output, &opts.writer);
    for column in &columns {
        let report = column_frequency(column, &opts.stats);
        renderer.write_header(&header_row(&report.column_name, &opts.stats))?;
        for row in &report.rows {
            renderer.write_row(row)?;
        }
    }
    renderer.flush()
}
