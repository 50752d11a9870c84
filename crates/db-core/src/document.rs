//! Document data model for schema-less collections

use serde::{Deserialize, Serialize};

/// A single document field value.
///
/// `serde_json::Value` is the tagged variant over null, boolean, number,
/// string, list and map. Matching on it is exhaustive, so a new variant can
/// never slip through a cell renderer unnoticed.
pub type Value = serde_json::Value;

/// A schema-less document: field names mapped to values.
///
/// The field set varies per document; there is no fixed schema. Field order
/// is the order the store yielded them in.
pub type Document = serde_json::Map<String, Value>;

/// Ordered candidate field names for one logical column.
///
/// A collection that renamed a field across schema versions reports every
/// historical name here. Earlier aliases take precedence when a document
/// carries more than one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasGroup(pub Vec<String>);

impl AliasGroup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// The leading alias, used as the table header.
    pub fn label(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The trailing alias, used as the field label in the detail view.
    pub fn newest(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// All aliases in precedence order.
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first alias present as a key in `doc`, with its value.
    ///
    /// Presence decides the match; an empty or null value under an earlier
    /// alias still wins over a later alias.
    pub fn first_present<'d>(&self, doc: &'d Document) -> Option<(&str, &'d Value)> {
        self.0
            .iter()
            .find_map(|name| doc.get(name).map(|value| (name.as_str(), value)))
    }
}

/// A display column: header label plus the alias group that feeds it.
///
/// Columns are ordered and that order is the display order, fixed for the
/// lifetime of one collection activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header text, the first alias in the group.
    pub label: String,
    /// Candidate field names in precedence order.
    pub aliases: AliasGroup,
}

impl Column {
    /// Build a column from a non-empty alias group.
    pub fn from_aliases(aliases: AliasGroup) -> Option<Self> {
        let label = aliases.label()?.to_string();
        Some(Self { label, aliases })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn test_first_present_prefers_earlier_alias() {
        let group = AliasGroup::new(["name", "nm"]);
        let d = doc(json!({ "nm": "old", "name": "new" }));

        let (alias, value) = group.first_present(&d).unwrap();
        assert_eq!(alias, "name");
        assert_eq!(value, &json!("new"));
    }

    #[test]
    fn test_first_present_empty_value_still_matches() {
        let group = AliasGroup::new(["name", "nm"]);
        let d = doc(json!({ "name": "", "nm": "fallback" }));

        let (alias, value) = group.first_present(&d).unwrap();
        assert_eq!(alias, "name");
        assert_eq!(value, &json!(""));
    }

    #[test]
    fn test_first_present_null_value_still_matches() {
        let group = AliasGroup::new(["name", "nm"]);
        let d = doc(json!({ "name": null, "nm": "fallback" }));

        let (alias, value) = group.first_present(&d).unwrap();
        assert_eq!(alias, "name");
        assert!(value.is_null());
    }

    #[test]
    fn test_first_present_absent() {
        let group = AliasGroup::new(["name", "nm"]);
        let d = doc(json!({ "email": "a@b.c" }));

        assert!(group.first_present(&d).is_none());
    }

    #[test]
    fn test_column_from_aliases() {
        let column = Column::from_aliases(AliasGroup::new(["name", "nm"])).unwrap();
        assert_eq!(column.label, "name");
        assert_eq!(column.aliases.newest(), Some("nm"));

        assert!(Column::from_aliases(AliasGroup::new(Vec::<String>::new())).is_none());
    }
}
