//! Document projection into aligned display and raw row matrices

use db_core::{Column, Document, DocumentStore, Value};
use tracing::warn;

use crate::BrowseError;

/// Placeholder shown when no alias of a column is present in a document.
pub const MISSING_CELL: &str = "(None)";

/// Output of one projection pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    /// Sanitized single-line cell text, one row per accepted document.
    pub display: Vec<Vec<String>>,
    /// Original cell values, position-aligned with `display`. A column with
    /// no present alias holds `Value::Null`.
    pub raw: Vec<Vec<Value>>,
    /// Documents excluded because their cell count did not match the
    /// columns.
    pub rejected: usize,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.display.len()
    }

    pub fn is_empty(&self) -> bool {
        self.display.is_empty()
    }
}

/// Render a value the way a table cell shows it: bare text for strings,
/// canonical JSON for everything else, non-printables stripped.
///
/// The locator compares against cells with this same rendering, so any
/// change here changes reverse-lookup identity too.
pub fn display_cell(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    single_line(&text)
}

/// Drop every non-printable character, newline included. Table cells are
/// single-line.
fn single_line(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Project `documents` against `columns` in document order.
pub fn project<'a, I>(columns: &[Column], documents: I) -> Projection
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut out = Projection::default();
    for doc in documents {
        push_document(&mut out, columns, doc);
    }
    out
}

/// Project every document of `collection` in store order.
///
/// The store's visitor contract would let a row abort the scan; projection
/// never does, it only aggregates.
pub fn project_collection(
    store: &dyn DocumentStore,
    collection: &str,
    columns: &[Column],
) -> Result<Projection, BrowseError> {
    let mut out = Projection::default();
    store
        .for_each_document(collection, &mut |doc| {
            push_document(&mut out, columns, doc);
            Ok(())
        })
        .map_err(|e| BrowseError::Store(e.to_string()))?;

    if out.rejected > 0 {
        warn!(
            collection,
            rejected = out.rejected,
            "excluded documents with mismatched cell counts"
        );
    }
    Ok(out)
}

fn push_document(out: &mut Projection, columns: &[Column], doc: &Document) {
    let mut display = Vec::with_capacity(columns.len());
    let mut raw = Vec::with_capacity(columns.len());

    for column in columns {
        match column.aliases.first_present(doc) {
            Some((_, value)) => {
                display.push(display_cell(value));
                raw.push(value.clone());
            }
            None => {
                display.push(MISSING_CELL.to_string());
                raw.push(Value::Null);
            }
        }
    }

    // A count mismatch can only come from an internal bookkeeping fault;
    // the document is excluded whole, never partially included.
    if display.len() != columns.len() || raw.len() != columns.len() {
        out.rejected += 1;
        return;
    }

    out.display.push(display);
    out.raw.push(raw);
}

#[cfg(test)]
mod tests {
    use super::*;
    use db_core::AliasGroup;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    fn name_columns() -> Vec<Column> {
        vec![Column::from_aliases(AliasGroup::new(["name", "nm"])).unwrap()]
    }

    #[test]
    fn test_alias_drift_scenario() {
        let columns = name_columns();
        let docs = vec![
            doc(json!({ "name": "a" })),
            doc(json!({ "nm": "b" })),
            doc(json!({})),
        ];

        let projection = project(&columns, &docs);

        assert_eq!(
            projection.display,
            vec![vec!["a".to_string()], vec!["b".to_string()], vec![MISSING_CELL.to_string()]]
        );
        assert_eq!(
            projection.raw,
            vec![vec![json!("a")], vec![json!("b")], vec![Value::Null]]
        );
        assert_eq!(projection.rejected, 0);
    }

    #[test]
    fn test_first_match_ignores_later_aliases() {
        let columns = name_columns();
        let docs = vec![doc(json!({ "name": "", "nm": "shadowed" }))];

        let projection = project(&columns, &docs);

        // Empty string under the earlier alias is still a match.
        assert_eq!(projection.display[0][0], "");
        assert_eq!(projection.raw[0][0], json!(""));
    }

    #[test]
    fn test_present_null_differs_from_absent() {
        let columns = name_columns();
        let docs = vec![doc(json!({ "name": null })), doc(json!({}))];

        let projection = project(&columns, &docs);

        assert_eq!(projection.display[0][0], "null");
        assert_eq!(projection.display[1][0], MISSING_CELL);
        assert_eq!(projection.raw[0][0], Value::Null);
        assert_eq!(projection.raw[1][0], Value::Null);
    }

    #[test]
    fn test_structured_values_render_canonically() {
        let columns = vec![
            Column::from_aliases(AliasGroup::new(["tags"])).unwrap(),
            Column::from_aliases(AliasGroup::new(["meta"])).unwrap(),
        ];
        let docs = vec![doc(json!({ "tags": [1, "two"], "meta": { "k": true } }))];

        let projection = project(&columns, &docs);

        assert_eq!(projection.display[0][0], r#"[1,"two"]"#);
        assert_eq!(projection.display[0][1], r#"{"k":true}"#);
    }

    #[test]
    fn test_display_cells_are_single_line() {
        let columns = name_columns();
        let docs = vec![doc(json!({ "name": "a\nb\tc\u{7}d" }))];

        let projection = project(&columns, &docs);

        assert_eq!(projection.display[0][0], "abcd");
        // The raw cell keeps the original value untouched.
        assert_eq!(projection.raw[0][0], json!("a\nb\tc\u{7}d"));
    }

    #[test]
    fn test_shape_invariant() {
        let columns = vec![
            Column::from_aliases(AliasGroup::new(["a"])).unwrap(),
            Column::from_aliases(AliasGroup::new(["b", "bee"])).unwrap(),
            Column::from_aliases(AliasGroup::new(["c"])).unwrap(),
        ];
        let docs = vec![
            doc(json!({ "a": 1 })),
            doc(json!({ "bee": 2, "c": 3 })),
            doc(json!({ "unrelated": true })),
        ];

        let projection = project(&columns, &docs);

        assert_eq!(projection.display.len(), projection.raw.len());
        for (display, raw) in projection.display.iter().zip(&projection.raw) {
            assert_eq!(display.len(), columns.len());
            assert_eq!(raw.len(), columns.len());
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let columns = name_columns();
        let docs = vec![
            doc(json!({ "name": "a" })),
            doc(json!({ "nm": "b" })),
            doc(json!({ "name": null })),
        ];

        let first = project(&columns, &docs);
        let second = project(&columns, &docs);

        assert_eq!(first, second);
    }
}
