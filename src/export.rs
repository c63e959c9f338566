use crate::error::ScrapeError;
use crate::models::ResultTable;
use rust_xlsxwriter::Workbook;
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::path::Path;
use tracing::info;

/// Output file format, picked from the path's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("tsv") => Self::Tsv,
            Some("json") => Self::Json,
            Some("xlsx") => Self::Xlsx,
            _ => Self::Csv,
        }
    }
}

/// Write the whole table to `path`, replacing any existing file
pub fn export_table(table: &ResultTable, path: &Path) -> Result<(), ScrapeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let format = ExportFormat::from_path(path);
    match format {
        ExportFormat::Csv => write_delimited(table, path, b',')?,
        ExportFormat::Tsv => write_delimited(table, path, b'\t')?,
        ExportFormat::Json => write_json(table, path)?,
        ExportFormat::Xlsx => write_xlsx(table, path)?,
    }

    info!(
        "💾 Saved {} rows x {} columns to {} ({:?})",
        table.len(),
        table.columns().len(),
        path.display(),
        format
    );
    Ok(())
}

fn write_delimited(table: &ResultTable, path: &Path, delimiter: u8) -> Result<(), ScrapeError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    wtr.write_record(table.columns())?;
    for row in table.rows() {
        wtr.write_record(&row.values)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Single worksheet: header row, then one row per listing
fn write_xlsx(table: &ResultTable, path: &Path) -> Result<(), ScrapeError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.columns().iter().enumerate() {
        sheet.write_string(0, col as u16, name.as_str())?;
    }
    for (row, record) in table.rows().iter().enumerate() {
        for (col, value) in record.values.iter().enumerate() {
            sheet.write_string(row as u32 + 1, col as u16, value.as_str())?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

fn write_json(table: &ResultTable, path: &Path) -> Result<(), ScrapeError> {
    let rows: Vec<Value> = table
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, Value> = table
                .columns()
                .iter()
                .cloned()
                .zip(row.values.iter().cloned().map(Value::String))
                .collect();
            Value::Object(object)
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Plain-text preview of the table, one line per listing
pub fn render_summary(table: &ResultTable) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", table.columns().join(" | "));
    for (i, row) in table.rows().iter().enumerate() {
        let _ = writeln!(out, "{}. [{}] {}", i + 1, row.id, row.values.join(" | "));
    }
    out
}
