pub mod csv_out;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("JSON serialization error: {}", e),
        },
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Header row plus data rows for a computation result.
pub struct Rows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Lay out a result envelope as rows.
///
/// - rendered timeline: one row per event (date, event, details)
/// - annual chart: one row per year, one column per series
/// - array of objects (annual summaries): one row per element, no rows when
///   the array is empty
///
/// Returns `None` for empty-state results and anything else.
pub fn tabulate(value: &Value) -> Option<Rows> {
    let result = value.get("result").unwrap_or(value);

    if let Some(Value::Array(items)) = result.get("items") {
        let rows = items
            .iter()
            .map(|item| {
                vec![
                    field(item, "date_label"),
                    format!("{} {}", field(item, "icon"), field(item, "kind_label")),
                    field(item, "text"),
                ]
            })
            .collect();
        return Some(Rows {
            headers: vec!["Date".into(), "Event".into(), "Details".into()],
            rows,
        });
    }

    if let (Some(Value::Array(labels)), Some(Value::Array(datasets))) =
        (result.get("labels"), result.get("datasets"))
    {
        let mut headers = vec!["Year".to_string()];
        headers.extend(datasets.iter().map(|ds| field(ds, "label")));
        let rows = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let mut row = vec![scalar(label)];
                row.extend(datasets.iter().map(|ds| {
                    ds.get("data")
                        .and_then(|d| d.get(i))
                        .map(scalar)
                        .unwrap_or_default()
                }));
                row
            })
            .collect();
        return Some(Rows { headers, rows });
    }

    if let Value::Array(arr) = result {
        if arr.is_empty() {
            return Some(Rows {
                headers: Vec::new(),
                rows: Vec::new(),
            });
        }
        let Some(Value::Object(first)) = arr.first() else {
            return None;
        };
        let headers: Vec<String> = first.keys().cloned().collect();
        let rows = arr
            .iter()
            .map(|item| headers.iter().map(|h| field(item, h)).collect())
            .collect();
        return Some(Rows { headers, rows });
    }

    None
}

/// Empty-state message of a timeline or chart result, if any.
pub fn empty_state_message(value: &Value) -> Option<&str> {
    value
        .get("result")
        .unwrap_or(value)
        .get("message")
        .and_then(Value::as_str)
}

fn field(value: &Value, key: &str) -> String {
    value.get(key).map(scalar).unwrap_or_default()
}

pub fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
