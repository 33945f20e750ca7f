use std::fmt;
use std::path::PathBuf;

/// Composite key of a catalog entry: item id plus variant state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub id: u32,
    pub state: u16,
}

impl ItemKey {
    pub const fn new(id: u32, state: u16) -> Self {
        Self { id, state }
    }

    /// Key of the default (state 0) variant.
    pub const fn base(id: u32) -> Self {
        Self { id, state: 0 }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item {}:{}", self.id, self.state)
    }
}

/// Key of an entity model: kind, optional variant label and the filled-map flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelKey {
    pub id: String,
    pub name: Option<String>,
    pub full: bool,
}

impl ModelKey {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            full: false,
        }
    }

    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            full: false,
        }
    }

    pub fn with_full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity model {}", self.id)?;
        if let Some(name) = &self.name {
            write!(f, "/{name}")?;
        }
        if self.full {
            f.write_str(" (full)")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Item(ItemKey),
    Model(ModelKey),
    /// Item looked up by name rather than by id.
    Name(String),
}

impl From<ItemKey> for RecordKey {
    fn from(key: ItemKey) -> Self {
        RecordKey::Item(key)
    }
}

impl From<ModelKey> for RecordKey {
    fn from(key: ModelKey) -> Self {
        RecordKey::Model(key)
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Item(key) => key.fmt(f),
            RecordKey::Model(key) => key.fmt(f),
            RecordKey::Name(name) => write!(f, "item named '{name}'"),
        }
    }
}

/// Everything that can go wrong while validating, decoding or querying game data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("row {row}: field `{field}` {reason}")]
    Schema {
        row: usize,
        field: String,
        reason: String,
    },

    #[error("duplicate {key}: first defined on row {first_row}, redefined on row {row}")]
    DuplicateKey {
        key: RecordKey,
        first_row: usize,
        row: usize,
    },

    #[error("{key} not found")]
    NotFound { key: RecordKey },

    #[error("malformed opcode stream at token {offset}: {reason}")]
    MalformedOpcodeStream { offset: usize, reason: String },

    #[error("invalid rotation {angle} at token {offset}: expected 0, 90, 180 or 270")]
    InvalidRotation { offset: usize, angle: f32 },
}

impl DataError {
    pub fn schema(row: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        DataError::Schema {
            row,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        DataError::MalformedOpcodeStream {
            offset,
            reason: reason.into(),
        }
    }

    pub fn not_found(key: impl Into<RecordKey>) -> Self {
        DataError::NotFound { key: key.into() }
    }
}

pub type DataResult<T> = Result<T, DataError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid load options: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid load options: {0}")]
    Invalid(String),
}
