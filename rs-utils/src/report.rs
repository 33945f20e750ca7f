use std::fmt;

use tracing::{info, warn};

use crate::atlas::TextureCoord;
use crate::error::{DataError, ItemKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Catalog,
    EntityModels,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TableKind::Catalog => "item catalog",
            TableKind::EntityModels => "entity models",
        })
    }
}

/// Data-quality findings that do not prevent a row from loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    PlaceholderTexture {
        row: usize,
        key: ItemKey,
        coord: TextureCoord,
    },
    SharedTexture {
        row: usize,
        key: ItemKey,
        coord: TextureCoord,
        first: ItemKey,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::PlaceholderTexture { row, key, coord } => {
                write!(f, "row {row}: {key} uses placeholder texture {coord}")
            }
            LoadWarning::SharedTexture {
                row,
                key,
                coord,
                first,
            } => write!(
                f,
                "row {row}: {key} reuses texture {coord} already used by {first}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub row: usize,
    pub error: DataError,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

/// Outcome of loading one table. Every rejected row is listed; the caller
/// decides whether any of it is fatal.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub table: TableKind,
    pub rows_seen: usize,
    pub rows_loaded: usize,
    pub errors: Vec<RowError>,
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    pub fn new(table: TableKind) -> Self {
        Self {
            table,
            rows_seen: 0,
            rows_loaded: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_error(&mut self, row: usize, error: DataError) {
        warn!(table = %self.table, row, "{error}");
        self.errors.push(RowError { row, error });
    }

    pub fn push_errors(&mut self, row: usize, errors: impl IntoIterator<Item = DataError>) {
        for error in errors {
            self.push_error(row, error);
        }
    }

    pub fn push_warning(&mut self, warning: LoadWarning) {
        warn!(table = %self.table, "{warning}");
        self.warnings.push(warning);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No errors and no warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Rows that produced at least one error.
    pub fn rejected_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.errors.iter().map(|e| e.row).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }

    pub fn first_error(&self) -> Option<&DataError> {
        self.errors.first().map(|e| &e.error)
    }

    /// Turns the report into an error when any row failed, for fail-fast callers.
    pub fn into_result(self) -> Result<LoadReport, LoadReport> {
        if self.has_errors() { Err(self) } else { Ok(self) }
    }

    pub fn log_summary(&self) {
        info!(
            table = %self.table,
            seen = self.rows_seen,
            loaded = self.rows_loaded,
            errors = self.errors.len(),
            warnings = self.warnings.len(),
            "table loaded"
        );
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} rows loaded, {} error(s), {} warning(s)",
            self.table,
            self.rows_loaded,
            self.rows_seen,
            self.errors.len(),
            self.warnings.len()
        )
    }
}
