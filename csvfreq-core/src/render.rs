use csv::WriterBuilder;
use csvfreq_common::Result;
use std::io::Write;

use crate::stats::StatsRow;

#[derive(Debug, Clone)]
pub struct WriterOptions {
    pub delimiter: u8,
    /// Fixed decimal places for percentage fields; None renders the shortest
    /// `Display` form.
    pub float_precision: Option<usize>,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            float_precision: None,
        }
    }
}

/// Serializes header and stats rows to a delimited output stream. This is
/// the only place counts and percentages become text.
pub struct RowRenderer<W: Write> {
    writer: csv::Writer<W>,
    float_precision: Option<usize>,
}

impl<W: Write> RowRenderer<W> {
    pub fn new(output: W, opts: &WriterOptions) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(opts.delimiter)
            .from_writer(output);
        Self {
            writer,
            float_precision: opts.float_precision,
        }
    }

    pub fn write_header(&mut self, fields: &[String]) -> Result<()> {
        self.writer.write_record(fields)?;
        Ok(())
    }

    pub fn write_row(&mut self, row: &StatsRow) -> Result<()> {
        let mut fields = vec![row.value.clone(), row.frequency.to_string()];
        if let Some(cumulative) = row.cumulative_frequency {
            fields.push(cumulative.to_string());
        }
        if let Some(pct) = row.percentage {
            fields.push(self.format_float(pct));
        }
        if let Some(pct) = row.cumulative_percentage {
            fields.push(self.format_float(pct));
        }
        self.writer.write_record(&fields)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn format_float(&self, v: f64) -> String {
        match self.float_precision {
            Some(prec) => format!("{v:.prec$}"),
            None => v.to_string(),
        }
    }
}
