//! TOML files as a value layer.
//!
//! Files are read into a flat [`MapSource`]. Nested tables are flattened by
//! joining keys with `-`, matching the prefix convention of nested records:
//!
//! ```toml
//! name = "my-app"
//!
//! [db]
//! host = "db.example.com"   # stored as db-host
//! ```
//!
//! Missing optional files are skipped. Only real I/O errors and parse errors
//! are reported.

use std::io::ErrorKind;
use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use crate::error::ClixError;
use crate::map::MapSource;

/// Parse TOML `content` into a flat source. `path` is only used in errors.
pub fn parse_toml(content: &str, path: &Path) -> Result<MapSource, ClixError> {
    let table: Table = toml::from_str(content).map_err(|e| ClixError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut source = MapSource::new();
    flatten_into(&mut source, "", table);
    Ok(source)
}

/// Read and parse the TOML file at `path`.
pub fn load_toml(path: &Path) -> Result<MapSource, ClixError> {
    parse_toml(&read_file(path)?, path)
}

/// Like [`load_toml`], but a missing file yields `Ok(None)`.
pub fn load_optional_toml(path: &Path) -> Result<Option<MapSource>, ClixError> {
    read_optional_file(path)?
        .map(|content| parse_toml(&content, path))
        .transpose()
}

/// Read `path` to a string, reporting failures with the path attached.
pub(crate) fn read_file(path: &Path) -> Result<String, ClixError> {
    std::fs::read_to_string(path).map_err(|e| ClixError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Like [`read_file`], but a missing file is `Ok(None)`.
pub(crate) fn read_optional_file(path: &Path) -> Result<Option<String>, ClixError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "optional file not found");
            Ok(None)
        }
        Err(e) => Err(ClixError::IoError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn flatten_into(source: &mut MapSource, prefix: &str, table: Table) {
    for (key, value) in table {
        let full_key = format!("{prefix}{key}");
        match value {
            Value::Table(inner) => flatten_into(source, &format!("{full_key}-"), inner),
            other => {
                source.insert(full_key, other);
            }
        }
    }
}
