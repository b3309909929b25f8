pub mod freq;
pub mod pipeline;
pub mod render;
pub mod stats;
pub mod table;

pub use csvfreq_common::{CsvFreqError, Result};
pub use freq::{FrequencyCounter, RankedEntry};
pub use pipeline::{column_frequency, run, FreqOptions, FrequencyReport};
pub use render::{RowRenderer, WriterOptions};
pub use stats::{derive_stats, header_row, StatsOptions, StatsRow};
pub use table::{parse_selector, read_columns, Cell, Column, TableOptions};
