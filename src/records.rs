use csv::{ReaderBuilder, WriterBuilder};
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::domain;
use crate::error::{Result, ScanError};

/// Header names recognised as the email column, in priority order.
pub const EMAIL_HEADERS: [&str; 3] = ["email", "e-mail", "mail"];

/// Input rows plus the column holding the email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub email_col: usize,
}

impl EmailTable {
    pub fn email_of<'a>(&self, row: &'a [String]) -> Option<&'a str> {
        row.get(self.email_col).map(String::as_str)
    }

    /// Sorted unique domains across all rows.
    pub fn domains(&self) -> Vec<String> {
        domain::unique_domains(self.rows.iter().filter_map(|row| self.email_of(row)))
    }
}

/// Column of the first recognised email header, or 0 when none matches.
pub fn detect_email_column(header: &[String]) -> usize {
    let normalized: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    EMAIL_HEADERS
        .iter()
        .find_map(|wanted| normalized.iter().position(|h| h == wanted))
        .unwrap_or(0)
}

/// Parses CSV text; `Ok(None)` when there is no header row at all.
pub fn parse_email_table<R: Read>(source: R) -> std::result::Result<Option<EmailTable>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if header.is_empty() {
        return Ok(None);
    }
    let email_col = detect_email_column(&header);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.is_empty() {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Some(EmailTable {
        header,
        rows,
        email_col,
    }))
}

pub fn read_email_table(path: &Path) -> Result<EmailTable> {
    let read_error = |source: csv::Error| ScanError::ReadInput {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|e| read_error(e.into()))?;
    let table = parse_email_table(file)
        .map_err(read_error)?
        .ok_or_else(|| ScanError::EmptyInput {
            path: path.to_path_buf(),
        })?;

    let email_column = &table.header[table.email_col];
    info!(
        action = "loaded",
        component = "csv_input",
        file_path = ?path,
        row_count = table.rows.len(),
        email_column = %email_column,
        "Input CSV loaded"
    );
    Ok(table)
}

pub fn write_results(path: &Path, header: &[String], rows: &[Vec<String>]) -> Result<()> {
    let write_error = |source: csv::Error| ScanError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(write_error)?;

    writer.write_record(header).map_err(write_error)?;
    for row in rows {
        writer.write_record(row).map_err(write_error)?;
    }
    writer.flush().map_err(|e| write_error(e.into()))?;

    info!(
        action = "written",
        component = "csv_output",
        file_path = ?path,
        row_count = rows.len(),
        "Output CSV written"
    );
    Ok(())
}
