use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table entry returned by the metadata/tables endpoint.
///
/// Only the identifier and display name are interpreted; every other field
/// the service sends is kept as-is.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TableDescriptor {
    pub fn new(table_name: &str, display_name: Option<&str>) -> Self {
        Self {
            table_name: Some(table_name.to_string()),
            display_name: display_name.map(str::to_string),
            extra: Map::new(),
        }
    }

    /// Display name used for ordering, empty when the service omitted it
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }

    /// Identifier submitted back to the column listing step
    pub fn identifier(&self) -> &str {
        self.table_name
            .as_deref()
            .or(self.display_name.as_deref())
            .unwrap_or("")
    }
}

/// Stable, case-sensitive sort by display name.
pub fn sort_by_display_name(tables: &mut [TableDescriptor]) {
    tables.sort_by(|a, b| a.display_name().cmp(b.display_name()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sort_missing_display_name_first() {
        let mut tables = vec![
            TableDescriptor::new("PROJECT", Some("Project")),
            TableDescriptor::new("ACTIVITY", Some("Activity")),
            TableDescriptor::new("UNNAMED", None),
            TableDescriptor::new("LOWER", Some("activity code")),
        ];
        sort_by_display_name(&mut tables);

        let order: Vec<&str> = tables.iter().map(|t| t.identifier()).collect();
        // Uppercase sorts before lowercase
        assert_eq!(order, vec!["UNNAMED", "ACTIVITY", "PROJECT", "LOWER"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_names() {
        let mut tables = vec![
            TableDescriptor::new("B", Some("Same")),
            TableDescriptor::new("A", Some("Same")),
        ];
        sort_by_display_name(&mut tables);
        assert_eq!(tables[0].identifier(), "B");
        assert_eq!(tables[1].identifier(), "A");
    }

    #[test]
    fn test_deserialize_keeps_unknown_fields() {
        let table: TableDescriptor = serde_json::from_value(json!({
            "tableName": "PROJECT",
            "displayName": "Project",
            "description": "All projects"
        }))
        .unwrap();

        assert_eq!(table.identifier(), "PROJECT");
        assert_eq!(table.display_name(), "Project");
        assert_eq!(table.extra.get("description"), Some(&json!("All projects")));
    }

    #[test]
    fn test_identifier_falls_back_to_display_name() {
        let table: TableDescriptor =
            serde_json::from_value(json!({ "displayName": "Resource" })).unwrap();
        assert_eq!(table.identifier(), "Resource");

        let null_name: TableDescriptor =
            serde_json::from_value(json!({ "tableName": "X", "displayName": null })).unwrap();
        assert_eq!(null_name.display_name(), "");
    }
}
