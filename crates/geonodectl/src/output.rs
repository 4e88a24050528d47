//! Output rendering: pretty JSON and comfy-table tables driven by the
//! per-resource column specs.

use comfy_table::Table;
use geonode_client::Column;
use serde_json::Value;

use crate::error::Result;

/// Prints a value as indented JSON, as it came from the API.
pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints a list of items as a table with the given columns.
pub fn print_list(items: &[Value], columns: &[Column]) {
    let mut table = Table::new();
    table.set_header(columns.iter().map(|c| c.label).collect::<Vec<_>>());
    for item in items {
        table.add_row(
            columns
                .iter()
                .map(|c| format_value(extract(item, c.path)))
                .collect::<Vec<_>>(),
        );
    }
    println!("{table}");
}

/// Prints key/value pairs as a two-column table (upload summaries).
pub fn print_pairs(pairs: &[(&str, String)]) {
    let mut table = Table::new();
    table.set_header(vec!["key", "value"]);
    for (key, value) in pairs {
        table.add_row(vec![(*key).to_string(), value.clone()]);
    }
    println!("{table}");
}

/// Walks a dotted extraction path into an item. A missing segment yields
/// `Null`, so instance-specific columns render empty instead of failing.
fn extract<'a>(item: &'a Value, path: &str) -> &'a Value {
    let mut current = item;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(value) => current = value,
            None => return &Value::Null,
        }
    }
    current
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

/// Pulls a display string out of an item for pair summaries.
pub fn field_string(item: &Value, path: &str) -> String {
    format_value(extract(item, path))
}
