//! Result set writers.
//!
//! The same document is written twice: as plain JSON, and as a script
//! assigning it to `itemgroups` so a static map page can load it with a
//! `<script>` tag.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::domain::ResultSet;

/// Variable the JS output assigns the document to.
const JS_VARIABLE: &str = "itemgroups";

/// Errors writing output files.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize with four-space indentation, keeping non-ASCII text as is.
pub fn to_json_string(results: &ResultSet) -> Result<String, OutputError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    results.serialize(&mut serializer)?;

    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Wrap the JSON document in a variable assignment.
pub fn to_js_string(results: &ResultSet) -> Result<String, OutputError> {
    Ok(format!("var {JS_VARIABLE} ={};", to_json_string(results)?))
}

/// Write the result set as JSON.
pub fn write_json(results: &ResultSet, path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_file(path.as_ref(), &to_json_string(results)?)
}

/// Write the result set as a JS assignment.
pub fn write_js(results: &ResultSet, path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_file(path.as_ref(), &to_js_string(results)?)
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }

    std::fs::write(path, contents).map_err(io_err)
}
