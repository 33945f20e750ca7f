use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TableFileError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path:?} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path:?} must hold a JSON array of rows")]
    NotArray { path: PathBuf },
}

/// Reads a table file: one JSON array whose elements are the raw rows.
pub fn read_table(path: &Path) -> Result<Vec<Value>, TableFileError> {
    let raw = fs::read_to_string(path).map_err(|source| TableFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match serde_json::from_str(&raw) {
        Ok(Value::Array(rows)) => Ok(rows),
        Ok(_) => Err(TableFileError::NotArray {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(TableFileError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}
