use csv::{ReaderBuilder, StringRecord};
use csvfreq_common::{CsvFreqError, Result};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A single cell: either the distinguished missing-value marker or a
/// printable scalar held in its canonical string form. The same string is
/// used for counting and for rendering, so keys and displayed values never
/// diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Null,
    Value(String),
}

impl Cell {
    /// An empty field (zero length after unquoting) is the null marker.
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Null
        } else {
            Cell::Value(field.to_owned())
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Cell::Null => None,
            Cell::Value(v) => Some(v),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone)]
pub struct TableOptions {
    pub delimiter: u8,
    pub quote: u8,
    pub no_header: bool,
    pub zero_based: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            no_header: false,
            zero_based: false,
        }
    }
}

/// Split a selector string into its comma-separated items.
/// An empty or all-blank selector is a configuration error.
pub fn parse_selector(selector: &str) -> Result<Vec<String>> {
    let items: Vec<String> = selector
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    if items.is_empty() {
        return Err(CsvFreqError::MissingColumns);
    }
    Ok(items)
}

/// Resolve one selector item against the header list. Numeric items resolve
/// by position (1-based unless `zero_based`) and never fall back to a name
/// match; anything else matches the first header with that exact name.
fn resolve_item(item: &str, headers: &[String], zero_based: bool) -> Option<usize> {
    if let Ok(n) = item.parse::<usize>() {
        let idx = if zero_based { n } else { n.checked_sub(1)? };
        return (idx < headers.len()).then_some(idx);
    }
    headers.iter().position(|h| h == item)
}

/// Read the selected columns from a delimited input, in selector order.
///
/// Selection is resolved once, against the header row (or against synthetic
/// `column{i}` names derived from the first record when `no_header`), before
/// any data is accumulated. Rows shorter than a selected index contribute a
/// null cell. A header-only input yields columns with no cells.
pub fn read_columns<R: Read>(input: R, selector: &str, opts: &TableOptions) -> Result<Vec<Column>> {
    let items = parse_selector(selector)?;
    let mut rdr = ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .quote(opts.quote)
        // headers handled manually so no-header inputs keep their first row
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = rdr.records();
    let mut pending: Option<StringRecord> = None;
    let headers: Vec<String> = if opts.no_header {
        match records.next().transpose()? {
            Some(first) => {
                let names = (1..=first.len()).map(|i| format!("column{i}")).collect();
                pending = Some(first);
                names
            }
            None => Vec::new(),
        }
    } else {
        match records.next().transpose()? {
            Some(header) => header.iter().map(str::to_owned).collect(),
            None => Vec::new(),
        }
    };

    let mut indices = Vec::with_capacity(items.len());
    let mut columns = Vec::with_capacity(items.len());
    for item in &items {
        let idx = resolve_item(item, &headers, opts.zero_based)
            .ok_or_else(|| CsvFreqError::ColumnNotFound(item.clone()))?;
        indices.push(idx);
        columns.push(Column {
            name: headers[idx].clone(),
            cells: Vec::new(),
        });
    }

    if let Some(first) = pending {
        push_record(&first, &indices, &mut columns);
    }
    for record in records {
        let record = record?;
        push_record(&record, &indices, &mut columns);
    }
    Ok(columns)
}

fn push_record(record: &StringRecord, indices: &[usize], columns: &mut [Column]) {
    for (slot, &idx) in indices.iter().enumerate() {
        let cell = record.get(idx).map(Cell::from_field).unwrap_or(Cell::Null);
        columns[slot].cells.push(cell);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str, selector: &str, opts: &TableOptions) -> Result<Vec<Column>> {
        read_columns(input.as_bytes(), selector, opts)
    }

    #[test]
    fn empty_selector_is_missing_columns() {
        assert!(matches!(parse_selector(""), Err(CsvFreqError::MissingColumns)));
        assert!(matches!(parse_selector(" , "), Err(CsvFreqError::MissingColumns)));
    }

    #[test]
    fn select_by_index_and_name_agree() {
        let input = "id,kind\n1,a\n2,b\n";
        let by_index = read(input, "2", &TableOptions::default()).unwrap();
        let by_name = read(input, "kind", &TableOptions::default()).unwrap();
        assert_eq!(by_index[0].name, "kind");
        assert_eq!(by_index[0].cells, by_name[0].cells);
    }

    #[test]
    fn zero_based_shifts_indices() {
        let input = "id,kind\n1,a\n";
        let opts = TableOptions {
            zero_based: true,
            ..TableOptions::default()
        };
        let cols = read(input, "1", &opts).unwrap();
        assert_eq!(cols[0].name, "kind");
    }

    #[test]
    fn index_zero_is_invalid_when_one_based() {
        let err = read("id\n1\n", "0", &TableOptions::default()).unwrap_err();
        assert!(matches!(err, CsvFreqError::ColumnNotFound(s) if s == "0"));
    }

    #[test]
    fn unknown_name_is_column_not_found() {
        let err = read("id\n1\n", "nope", &TableOptions::default()).unwrap_err();
        assert!(matches!(err, CsvFreqError::ColumnNotFound(s) if s == "nope"));
    }

    #[test]
    fn empty_field_is_null() {
        let cols = read("id,kind\n1,a\n2,\n3,b\n", "kind", &TableOptions::default()).unwrap();
        assert_eq!(
            cols[0].cells,
            vec![
                Cell::Value("a".into()),
                Cell::Null,
                Cell::Value("b".into())
            ]
        );
    }

    #[test]
    fn short_rows_pad_with_null() {
        let cols = read("id,kind\n1,a\n2\n", "kind", &TableOptions::default()).unwrap();
        assert_eq!(cols[0].cells, vec![Cell::Value("a".into()), Cell::Null]);
    }

    #[test]
    fn no_header_synthesizes_names_and_keeps_first_row() {
        let opts = TableOptions {
            no_header: true,
            ..TableOptions::default()
        };
        let cols = read("a,x\nb,y\n", "1", &opts).unwrap();
        assert_eq!(cols[0].name, "column1");
        assert_eq!(
            cols[0].cells,
            vec![Cell::Value("a".into()), Cell::Value("b".into())]
        );
    }

    #[test]
    fn header_only_input_yields_empty_columns() {
        let cols = read("id,kind\n", "kind", &TableOptions::default()).unwrap();
        assert!(cols[0].cells.is_empty());
    }

    #[test]
    fn selector_order_drives_output_order() {
        let cols = read("id,kind\n1,a\n", "kind,id", &TableOptions::default()).unwrap();
        assert_eq!(cols[0].name, "kind");
        assert_eq!(cols[1].name, "id");
    }
}
