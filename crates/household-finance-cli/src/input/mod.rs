pub mod config;
pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// Typed input from `--input` if given, else from piped stdin.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_document(path).map(Some),
        None => stdin::read_piped(),
    }
}

/// Like [`read_input`], for commands that have no flag-based fallback.
pub fn require_input<T: DeserializeOwned>(
    path: Option<&str>,
    what: &str,
) -> Result<T, Box<dyn std::error::Error>> {
    match read_input(path)? {
        Some(value) => Ok(value),
        None => Err(format!("--input file (or JSON on stdin) is required for {what}").into()),
    }
}
