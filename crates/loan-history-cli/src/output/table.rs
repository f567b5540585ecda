use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{empty_state_message, scalar, tabulate};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let result = value.get("result").unwrap_or(value);

    if let Some(Value::String(heading)) = result.get("heading") {
        println!("{}\n", heading);
    }

    if let Some(message) = empty_state_message(value) {
        println!("{}", message);
    } else if let Some(rows) = tabulate(value) {
        if rows.rows.is_empty() {
            println!("(empty)");
        } else {
            let mut builder = Builder::default();
            builder.push_record(rows.headers);
            for row in rows.rows {
                builder.push_record(row);
            }
            println!("{}", Table::from(builder));
        }
    } else {
        println!("{}", scalar(result));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
