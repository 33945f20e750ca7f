use std::path::{Path, PathBuf};

pub mod atlas;
pub mod error;
pub mod options;
pub mod report;
pub mod row;
pub mod table;

pub use atlas::{DEFAULT_ITEM_GRID, ENTITIES_ATLAS, StaticAtlas, TextureAtlas, TextureCoord};
pub use error::{ConfigError, DataError, DataResult, ItemKey, ModelKey, RecordKey};
pub use options::{FIRST_ITEM_ID, LoadOptions, MAX_STACK_SIZE};
pub use report::{LoadReport, LoadWarning, RowError, TableKind};
pub use row::RowReader;
pub use table::{ByCategory, Categorized, TableBuilder, TableIndex, TableRecord};

pub const RUSTSTONE_TABLES_ROOT_ENV: &str = "RUSTSTONE_TABLES_ROOT";

pub const ITEMS_TABLE_FILE: &str = "items.json";
pub const ENTITIES_TABLE_FILE: &str = "entities.json";

/// Directory holding the JSON item and entity tables.
pub fn tables_root() -> PathBuf {
    if let Ok(explicit) = std::env::var(RUSTSTONE_TABLES_ROOT_ENV) {
        let path = PathBuf::from(explicit);
        if path.exists() {
            return path;
        }
    }

    if let Ok(exe) = std::env::current_exe()
        && let Some(exe_dir) = exe.parent()
    {
        let sibling_tables = exe_dir.join("assets/tables");
        if sibling_tables.exists() {
            return sibling_tables;
        }
    }

    let repo_tables = Path::new(env!("CARGO_MANIFEST_DIR")).join("../rs-client/assets/tables");
    if repo_tables.exists() {
        return repo_tables;
    }

    PathBuf::from("assets/tables")
}
