//! Export of selected rows
//!
//! Pages export whatever the table selection holds. An empty selection is
//! refused before any work is done.

use std::str::FromStr;

use serde::Serialize;
use trellis::table::{Field, TableRow};

use crate::error::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Fail with [`ExportError::NothingSelected`] when `selected` is empty.
pub fn require_selection<K>(selected: &[K]) -> Result<(), ExportError> {
    if selected.is_empty() {
        return Err(ExportError::NothingSelected);
    }
    Ok(())
}

/// Export the rows of `data` whose keys are in `selected`.
///
/// Rows keep their dataset order. CSV uses the rendered cell text of each
/// field; JSON serializes the records themselves.
pub fn export_selected<T>(
    fields: &[Field<T>],
    data: &[T],
    selected: &[T::Key],
    format: ExportFormat,
) -> Result<String, ExportError>
where
    T: TableRow + Serialize,
{
    require_selection(selected)?;

    let rows: Vec<&T> = data
        .iter()
        .filter(|row| selected.contains(&row.key()))
        .collect();
    log::info!("exporting {} rows as {:?}", rows.len(), format);

    match format {
        ExportFormat::Csv => Ok(to_csv(fields, &rows)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(&rows)?),
    }
}

/// Render rows as CSV with a header line from the field headers.
pub fn to_csv<T>(fields: &[Field<T>], rows: &[&T]) -> String {
    let mut out = String::new();
    let header: Vec<String> = fields.iter().map(|f| escape(&f.header)).collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = fields.iter().map(|f| escape(&f.render(row))).collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
