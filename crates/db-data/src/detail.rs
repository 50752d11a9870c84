//! Detail-view preparation for a single row
//!
//! The table view shows sanitized single-line cells; the detail view shows
//! the raw values of one row, pretty-printed, with line breaks restored. All
//! styling stays in the view layer.

use db_core::{Column, Value};

/// One field of the record detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    /// Field label, the newest alias of the column.
    pub label: String,
    /// Pretty-printed value text. Embedded newlines are real so the view
    /// layer can mark the breaks visually.
    pub text: String,
    /// True when the cell is null, whether the field was absent or stored
    /// as null. The view layer renders these distinctly from normal text.
    pub is_null: bool,
}

/// Prepare the detail fields for one raw row.
pub fn document_fields(columns: &[Column], raw_row: &[Value]) -> Vec<FieldView> {
    columns
        .iter()
        .zip(raw_row.iter())
        .map(|(column, value)| {
            let label = column.aliases.newest().unwrap_or(column.label.as_str());
            FieldView {
                label: label.to_string(),
                text: detail_text(value),
                is_null: value.is_null(),
            }
        })
        .collect()
}

/// Widest alias name across `columns`, for aligned detail layout.
pub fn label_width(columns: &[Column]) -> usize {
    columns
        .iter()
        .flat_map(|column| column.aliases.names())
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
}

/// Pretty-print a value for the detail view.
///
/// Serialization escapes newlines inside strings; those escapes are turned
/// back into line breaks so multi-line text reads as written. Other control
/// characters stay out.
fn detail_text(value: &Value) -> String {
    let serialized = format!("{:#}", value);
    multi_line(&serialized).replace("\\n", "\n")
}

/// Drop non-printable characters but keep line breaks.
fn multi_line(text: &str) -> String {
    text.chars()
        .filter(|c| *c == '\n' || !c.is_control())
        .collect()
}
