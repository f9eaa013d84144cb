//! Output formatting helpers for human-readable and JSON output.

use caconf::Record;

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json { OutputFormat::Json } else { OutputFormat::Human }
    }
}

/// Print a table with aligned columns in human-readable format.
///
/// `headers` and each row in `rows` must have the same length.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let col_count = headers.len();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let render = |cells: Vec<String>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{:<width$}", cell, width = widths[i]))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", render(headers.iter().map(|h| h.to_string()).collect()));
    for row in rows {
        println!("{}", render(row.iter().take(col_count).cloned().collect()));
    }
}

/// Table rows for the properties of one record, prefixed by `prefix` cells.
pub fn property_rows(prefix: &[&str], record: &Record) -> Vec<Vec<String>> {
    record
        .iter()
        .map(|(key, value)| {
            let mut row: Vec<String> = prefix.iter().map(|cell| cell.to_string()).collect();
            row.push(key.to_string());
            row.push(value.to_string());
            row
        })
        .collect()
}
