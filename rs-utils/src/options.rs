use std::path::Path;

use serde::Deserialize;

use crate::atlas::TextureCoord;
use crate::error::ConfigError;

/// Item ids below this value are block ids and never appear in the item catalog.
pub const FIRST_ITEM_ID: u32 = 256;
pub const MAX_STACK_SIZE: u8 = 64;

/// Knobs for table loading, usually read from a TOML file.
///
/// ```toml
/// min_item_id = 256
/// max_stack_size = 64
/// strict_properties = true
/// placeholder_texture = [0, 0]
/// warn_placeholder_texture = true
/// warn_shared_textures = false
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadOptions {
    pub min_item_id: u32,
    pub max_stack_size: u8,
    /// Reject rows carrying properties the loader does not know (typos included).
    pub strict_properties: bool,
    /// Coordinate used by unfinished rows; entries pointing at it get a warning.
    pub placeholder_texture: Option<[u16; 2]>,
    /// Turns the placeholder warning off; TOML has no way to unset the coordinate.
    pub warn_placeholder_texture: bool,
    /// Warn when two catalog entries point at the same texture cell.
    pub warn_shared_textures: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            min_item_id: FIRST_ITEM_ID,
            max_stack_size: MAX_STACK_SIZE,
            strict_properties: true,
            placeholder_texture: Some([0, 0]),
            warn_placeholder_texture: true,
            warn_shared_textures: false,
        }
    }
}

impl LoadOptions {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let options: LoadOptions = toml::from_str(raw)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_stack_size == 0 {
            return Err(ConfigError::Invalid(
                "max_stack_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Placeholder coordinate to warn about, if that warning is on.
    pub fn placeholder(&self) -> Option<TextureCoord> {
        if !self.warn_placeholder_texture {
            return None;
        }
        self.placeholder_texture.map(TextureCoord::from)
    }
}
