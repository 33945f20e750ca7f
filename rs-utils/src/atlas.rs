use std::fmt;

/// Cell of the item texture grid (column, row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureCoord {
    pub u: u16,
    pub v: u16,
}

impl TextureCoord {
    pub const fn new(u: u16, v: u16) -> Self {
        Self { u, v }
    }
}

impl From<[u16; 2]> for TextureCoord {
    fn from([u, v]: [u16; 2]) -> Self {
        Self { u, v }
    }
}

impl fmt::Display for TextureCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.u, self.v)
    }
}

/// Read-only view of the texture atlases owned by the renderer.
///
/// Loading only needs to know which atlas names exist and how large the item
/// grid is; the atlas contents never cross this boundary.
pub trait TextureAtlas: Send + Sync {
    /// Whether an entity model may reference the atlas called `name`.
    fn has_atlas(&self, name: &str) -> bool;

    /// Item grid size in cells (columns, rows).
    fn item_grid(&self) -> (u16, u16);

    fn contains_item_cell(&self, coord: TextureCoord) -> bool {
        let (columns, rows) = self.item_grid();
        coord.u < columns && coord.v < rows
    }
}

/// Fixed atlas description, enough for loading tables without a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAtlas {
    names: Vec<String>,
    item_grid: (u16, u16),
}

pub const DEFAULT_ITEM_GRID: (u16, u16) = (16, 16);
pub const ENTITIES_ATLAS: &str = "ENTITIES";

impl StaticAtlas {
    pub fn new(item_grid: (u16, u16)) -> Self {
        Self {
            names: Vec::new(),
            item_grid,
        }
    }

    pub fn with_atlas(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        self
    }
}

impl Default for StaticAtlas {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_GRID).with_atlas(ENTITIES_ATLAS)
    }
}

impl TextureAtlas for StaticAtlas {
    fn has_atlas(&self, name: &str) -> bool {
        self.names.iter().any(|known| known == name)
    }

    fn item_grid(&self) -> (u16, u16) {
        self.item_grid
    }
}
