use serde_json::Value;
use std::io::{self, Read};
use tracing::debug;

/// JSON piped on stdin, or `None` when stdin is a terminal or empty.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    debug!(bytes = trimmed.len(), "read input from stdin");

    let value: Value = serde_json::from_str(trimmed)
        .map_err(|e| format!("Invalid JSON on stdin: {}", e))?;
    Ok(Some(value))
}
