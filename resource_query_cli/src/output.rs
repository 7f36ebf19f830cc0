use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Markdown,
}

// -- Table building --

/// Columns are the top-level keys of object records, in first-seen order.
/// Non-object records get a single `value` column.
fn columns(records: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        match record {
            Value::Object(map) => {
                for key in map.keys() {
                    if !columns.iter().any(|c| c == key) {
                        columns.push(key.clone());
                    }
                }
            }
            _ => {
                if !columns.iter().any(|c| c == "value") {
                    columns.push("value".to_string());
                }
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn build_table(records: &[Value]) -> Table {
    let columns = columns(records);
    let mut builder = Builder::default();
    builder.push_record(columns.clone());
    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| match record {
                Value::Object(map) => cell(map.get(column)),
                other if column == "value" => cell(Some(other)),
                _ => String::new(),
            })
            .collect();
        builder.push_record(row);
    }
    builder.build()
}

// -- Output --

pub fn print_records(records: &[Value], format: &OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Table => println!("{}", build_table(records)),
        OutputFormat::Markdown => {
            let mut table = build_table(records);
            table.with(Style::markdown());
            println!("{}", table);
        }
    }
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
