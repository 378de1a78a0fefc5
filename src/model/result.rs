use serde_json::{Map, Value};

/// Tabular view over a runquery response.
///
/// The response itself is kept verbatim; this only decides how to lay it
/// out. Arrays of objects (directly, or under `data`/`rows`) become a table
/// whose header is the union of keys in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    pub fn from_value(value: &Value) -> Option<Self> {
        let records = match value {
            Value::Array(items) => items,
            Value::Object(object) => ["data", "rows"]
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_array))?,
            _ => return None,
        };

        let objects: Vec<&Map<String, Value>> =
            records.iter().map(Value::as_object).collect::<Option<_>>()?;

        let mut headers: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = objects
            .iter()
            .map(|object| {
                headers
                    .iter()
                    .map(|header| object.get(header).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect();

        Some(Self { headers, rows })
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
