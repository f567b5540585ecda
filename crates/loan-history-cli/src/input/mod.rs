pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Load typed input from `--input <file>` or, failing that, piped stdin.
pub fn load<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        file::read_json(path)
    } else if let Some(data) = stdin::read_stdin()? {
        Ok(serde_json::from_value(data)?)
    } else {
        Err(format!("--input <file.json> or stdin required for {}", what).into())
    }
}
