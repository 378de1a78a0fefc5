use serde::Deserialize;
use serde_json::{Map, Value};

/// One entry of a table's column list.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnDescriptor {
    /// The service returned only the column name
    Name(String),
    /// The service returned a structured column record
    Record(Map<String, Value>),
    /// Placeholder for a table whose column lookup failed upstream
    Error(String),
}

impl ColumnDescriptor {
    /// Column name to submit in a `table:column` selection.
    pub fn name(&self) -> Option<&str> {
        match self {
            ColumnDescriptor::Name(name) => Some(name),
            ColumnDescriptor::Record(record) => ["columnName", "name", "displayName"]
                .iter()
                .find_map(|key| record.get(*key).and_then(Value::as_str)),
            ColumnDescriptor::Error(_) => None,
        }
    }

    /// Human-readable label for the column list view.
    pub fn label(&self) -> String {
        match self {
            ColumnDescriptor::Record(record) => record
                .get("displayName")
                .and_then(Value::as_str)
                .or_else(|| self.name())
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(record.clone()).to_string()),
            ColumnDescriptor::Name(name) => name.clone(),
            ColumnDescriptor::Error(message) => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ColumnDescriptor::Error(_))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumn {
    Name(String),
    Record(Map<String, Value>),
}

/// The columns endpoint answers with either a bare list or an object
/// wrapping the list under `columns`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColumnsResponse {
    List(Vec<RawColumn>),
    Wrapped {
        #[serde(default)]
        columns: Vec<RawColumn>,
    },
}

impl From<RawColumn> for ColumnDescriptor {
    fn from(raw: RawColumn) -> Self {
        match raw {
            RawColumn::Name(name) => ColumnDescriptor::Name(name),
            RawColumn::Record(record) => ColumnDescriptor::Record(record),
        }
    }
}

/// Decode a columns response body into a single column list.
pub fn parse_columns(body: &[u8]) -> Result<Vec<ColumnDescriptor>, serde_json::Error> {
    let raw = match serde_json::from_slice::<ColumnsResponse>(body)? {
        ColumnsResponse::List(columns) => columns,
        ColumnsResponse::Wrapped { columns } => columns,
    };
    Ok(raw.into_iter().map(ColumnDescriptor::from).collect())
}

/// Columns of one table, in the order the service listed them.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumns {
    pub table: String,
    pub columns: Vec<ColumnDescriptor>,
}

/// Per-table column lists, ordered by table submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnListing {
    tables: Vec<TableColumns>,
}

impl ColumnListing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a table's columns. A table submitted twice keeps its first
    /// position and the latest list.
    pub fn insert(&mut self, table: impl Into<String>, columns: Vec<ColumnDescriptor>) {
        let table = table.into();
        match self.tables.iter_mut().find(|entry| entry.table == table) {
            Some(entry) => entry.columns = columns,
            None => self.tables.push(TableColumns { table, columns }),
        }
    }

    pub fn get(&self, table: &str) -> Option<&[ColumnDescriptor]> {
        self.tables
            .iter()
            .find(|entry| entry.table == table)
            .map(|entry| entry.columns.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableColumns> {
        self.tables.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
