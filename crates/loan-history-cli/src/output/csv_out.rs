use serde_json::Value;
use std::io;

use super::{empty_state_message, tabulate};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if let Some(rows) = tabulate(value) {
        if !rows.headers.is_empty() {
            let _ = wtr.write_record(&rows.headers);
        }
        for row in &rows.rows {
            let _ = wtr.write_record(row);
        }
    } else if let Some(message) = empty_state_message(value) {
        let _ = wtr.write_record(["message"]);
        let _ = wtr.write_record([message]);
    }

    let _ = wtr.flush();
}
