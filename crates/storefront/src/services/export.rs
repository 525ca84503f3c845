//! Table export.

use tracing::debug;

use crate::presenter::{Download, ElementId, Presenter};

/// MIME type of exported tables.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// Join cell texts with `,` and rows with `\n`.
///
/// Cells are written as-is, without quoting or escaping.
#[must_use]
pub fn table_to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(","))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Export a table's header and data cells as a CSV download.
///
/// Returns false when the page has no such table.
pub fn export_table_to_csv(presenter: &dyn Presenter, table: &ElementId, filename: &str) -> bool {
    let Some(rows) = presenter.table_rows(table) else {
        debug!(%table, "Table not found, nothing to export");
        return false;
    };

    let csv = table_to_csv(&rows);
    debug!(%table, filename, rows = rows.len(), "Exporting table");
    presenter.download(Download {
        filename: filename.to_string(),
        mime_type: CSV_MIME_TYPE,
        content: csv.into_bytes(),
    });
    true
}
