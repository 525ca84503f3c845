//! CSV export of a JSON table.

use std::path::Path;

use shopsphere_storefront::ElementId;
use shopsphere_storefront::services::export_table_to_csv;
use thiserror::Error;

use crate::console::ConsolePresenter;

/// Id the loaded table is registered under.
const TABLE_ID: &str = "export";

/// Errors that can occur while exporting.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The input is not an array of string arrays.
    #[error("Invalid table JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read rows (an array of arrays of strings) from a JSON file.
fn read_rows(input: &Path) -> Result<Vec<Vec<String>>, ExportError> {
    let bytes = std::fs::read(input).map_err(|source| ExportError::Io {
        path: input.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Export the table in `input` as CSV to `output`.
///
/// # Errors
///
/// Returns error if the input cannot be read or is not a table.
pub fn table(input: &Path, output: &str) -> Result<(), ExportError> {
    let rows = read_rows(input)?;
    tracing::info!(rows = rows.len(), output, "Exporting table");

    let presenter = ConsolePresenter::new().with_table(ElementId::new(TABLE_ID), rows);
    export_table_to_csv(&presenter, &ElementId::new(TABLE_ID), output);
    Ok(())
}
