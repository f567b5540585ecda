use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read a loan / schedule / summary JSON file into a typed input.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let resolved = resolve_input_path(path)?;
    debug!(path = %resolved.display(), "reading input file");
    let contents = fs::read_to_string(&resolved)
        .map_err(|e| format!("Failed to read '{}': {}", resolved.display(), e))?;
    serde_json::from_str(&contents)
        .map_err(|e| format!("Invalid input in '{}': {}", resolved.display(), e).into())
}

/// Resolve relative paths against the working directory and require a regular
/// file.
fn resolve_input_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let resolved = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    match fs::metadata(&resolved) {
        Ok(meta) if meta.is_file() => Ok(resolved),
        Ok(_) => Err(format!("Not a file: {}", resolved.display()).into()),
        Err(_) => Err(format!("File not found: {}", resolved.display()).into()),
    }
}
