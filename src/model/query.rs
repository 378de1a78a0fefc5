use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("must select at least one column")]
    Empty,
    #[error("invalid column selection '{0}', expected table:column")]
    MissingSeparator(String),
}

/// A `table:column` checkbox value, split on the first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub table: String,
    pub column: String,
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (table, column) = s
            .split_once(':')
            .ok_or_else(|| SelectionError::MissingSeparator(s.to_string()))?;
        Ok(Self {
            table: table.to_string(),
            column: column.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryTable {
    pub table_name: String,
    pub columns: Vec<String>,
}

/// Body of the runquery call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    pub name: String,
    /// Always sent as `null`
    pub since_date: Option<String>,
    pub tables: Vec<QueryTable>,
}

impl QueryPayload {
    /// Group flat selections by table. Tables keep the order in which they
    /// were first seen and each table keeps its columns in encounter order.
    pub fn from_selections<I, S>(name: &str, selections: I) -> Result<Self, SelectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tables: Vec<QueryTable> = Vec::new();

        for raw in selections {
            let selection: Selection = raw.as_ref().parse()?;
            let index = match tables.iter().position(|t| t.table_name == selection.table) {
                Some(index) => index,
                None => {
                    tables.push(QueryTable {
                        table_name: selection.table,
                        columns: Vec::new(),
                    });
                    tables.len() - 1
                }
            };
            let columns = &mut tables[index].columns;
            if !columns.contains(&selection.column) {
                columns.push(selection.column);
            }
        }

        if tables.is_empty() {
            return Err(SelectionError::Empty);
        }

        Ok(Self {
            name: name.to_string(),
            since_date: None,
            tables,
        })
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.table_name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_splits_on_first_colon() {
        let selection: Selection = "PROJECT:Code:Alt".parse().unwrap();
        assert_eq!(selection.table, "PROJECT");
        assert_eq!(selection.column, "Code:Alt");

        let empty_column: Selection = "PROJECT:".parse().unwrap();
        assert_eq!(empty_column.column, "");
    }

    #[test]
    fn test_selection_without_colon_is_rejected() {
        assert_eq!(
            "PROJECT".parse::<Selection>(),
            Err(SelectionError::MissingSeparator("PROJECT".to_string()))
        );
    }

    #[test]
    fn test_grouping_preserves_first_seen_order() {
        let payload =
            QueryPayload::from_selections("q", ["A:c1", "B:c3", "A:c2"]).unwrap();

        assert_eq!(payload.table_names(), vec!["A", "B"]);
        assert_eq!(payload.tables[0].columns, vec!["c1", "c2"]);
        assert_eq!(payload.tables[1].columns, vec!["c3"]);
    }

    #[test]
    fn test_duplicate_selection_counted_once() {
        let payload = QueryPayload::from_selections("q", ["A:c1", "A:c1"]).unwrap();
        assert_eq!(payload.tables[0].columns, vec!["c1"]);
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let none: Vec<String> = Vec::new();
        assert_eq!(
            QueryPayload::from_selections("q", none),
            Err(SelectionError::Empty)
        );
    }

    #[test]
    fn test_payload_wire_format() {
        let payload = QueryPayload::from_selections("adhoc_query", ["A:c1", "A:c2", "B:c3"])
            .unwrap();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "adhoc_query",
                "sinceDate": null,
                "tables": [
                    { "tableName": "A", "columns": ["c1", "c2"] },
                    { "tableName": "B", "columns": ["c3"] }
                ]
            })
        );
    }
}
