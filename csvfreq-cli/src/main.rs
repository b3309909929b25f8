use clap::Parser;
use csvfreq_common::Config;
use csvfreq_core::{parse_selector, run, FreqOptions, StatsOptions, TableOptions, WriterOptions};
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

fn parse_delim(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single character, got {s:?}")),
    }
}

#[derive(Parser)]
#[command(
    name = "csvfreq",
    version,
    about = "Print a frequency table for the values of the specified columns of a CSV file"
)]
struct Cli {
    /// Input file; reads standard input when omitted
    file: Option<PathBuf>,
    /// Comma-separated column indices and/or names to examine
    #[arg(short = 'c', long)]
    columns: Option<String>,
    /// Also print a relative frequency (percentage) column
    #[arg(long)]
    percentage: bool,
    /// Also print cumulative column(s)
    #[arg(long)]
    cumulative: bool,
    /// Input field delimiter
    #[arg(short = 'd', long, value_parser = parse_delim)]
    delimiter: Option<char>,
    /// Treat the input as tab-delimited (overrides -d)
    #[arg(short = 't', long)]
    tabs: bool,
    /// Input quote character
    #[arg(short = 'q', long, value_parser = parse_delim)]
    quotechar: Option<char>,
    /// The input has no header row; columns get synthetic names
    #[arg(short = 'H', long)]
    no_header_row: bool,
    /// Interpret numeric column indices as zero-based
    #[arg(short = 'z', long)]
    zero_based: bool,
    /// Output field delimiter
    #[arg(short = 'D', long, value_parser = parse_delim)]
    out_delimiter: Option<char>,
    /// Fixed number of decimal places for percentage output
    #[arg(long)]
    precision: Option<usize>,
}

fn delim_byte(c: char) -> anyhow::Result<u8> {
    if !c.is_ascii() {
        anyhow::bail!("delimiter must be an ASCII character, got {c:?}");
    }
    Ok(c as u8)
}

fn build_options(cli: &Cli, config: &Config) -> anyhow::Result<FreqOptions> {
    let in_delim = if cli.tabs {
        '\t'
    } else {
        cli.delimiter.unwrap_or(config.reader.delimiter)
    };
    Ok(FreqOptions {
        columns: cli.columns.clone().unwrap_or_default(),
        table: TableOptions {
            delimiter: delim_byte(in_delim)?,
            quote: delim_byte(cli.quotechar.unwrap_or(config.reader.quote))?,
            no_header: cli.no_header_row || config.reader.no_header,
            zero_based: cli.zero_based || config.reader.zero_based,
        },
        stats: StatsOptions {
            percentage: cli.percentage,
            cumulative: cli.cumulative,
        },
        writer: WriterOptions {
            delimiter: delim_byte(cli.out_delimiter.unwrap_or(config.writer.delimiter))?,
            float_precision: cli.precision.or(config.writer.float_precision),
        },
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_default();
    let opts = build_options(&cli, &config)?;

    // fail on a missing selector before the input is opened
    parse_selector(&opts.columns)?;

    let stdout = io::stdout();
    let output = BufWriter::new(stdout.lock());
    match &cli.file {
        Some(path) => run(BufReader::new(File::open(path)?), output, &opts)?,
        None => run(io::stdin().lock(), output, &opts)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_flag_overrides_delimiter() {
        let cli = Cli::parse_from(["csvfreq", "-c", "1", "-t", "-d", ";"]);
        let opts = build_options(&cli, &Config::default()).unwrap();
        assert_eq!(opts.table.delimiter, b'\t');
    }

    #[test]
    fn config_defaults_fill_unset_flags() {
        let cli = Cli::parse_from(["csvfreq", "-c", "kind"]);
        let mut config = Config::default();
        config.reader.delimiter = ';';
        config.writer.float_precision = Some(4);
        let opts = build_options(&cli, &config).unwrap();
        assert_eq!(opts.table.delimiter, b';');
        assert_eq!(opts.writer.float_precision, Some(4));
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["csvfreq", "-c", "kind", "-d", "|", "--precision", "1"]);
        let mut config = Config::default();
        config.reader.delimiter = ';';
        config.writer.float_precision = Some(4);
        let opts = build_options(&cli, &config).unwrap();
        assert_eq!(opts.table.delimiter, b'|');
        assert_eq!(opts.writer.float_precision, Some(1));
    }

    #[test]
    fn non_ascii_delimiter_is_rejected_late() {
        let cli = Cli::parse_from(["csvfreq", "-c", "1", "-d", "é"]);
        assert!(build_options(&cli, &Config::default()).is_err());
    }
}
