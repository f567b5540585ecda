use serde_json::Value;

use super::{empty_state_message, tabulate};

/// Print one line per row, cells separated by ` | `, or the empty-state
/// message.
pub fn print_minimal(value: &Value) {
    if let Some(message) = empty_state_message(value) {
        println!("{}", message);
        return;
    }

    match tabulate(value) {
        Some(rows) => {
            for row in rows.rows {
                println!("{}", row.join(" | "));
            }
        }
        None => println!("{}", value.get("result").unwrap_or(value)),
    }
}
