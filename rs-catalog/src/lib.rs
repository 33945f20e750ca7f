//! Item catalog: validated item rows keyed by `(id, state)`.

pub mod catalog;
pub mod item;
pub mod parse;

pub use catalog::Catalog;
pub use item::{CatalogEntry, Durability, ItemCategory, ToolTier};
pub use parse::{ITEM_PROPERTIES, parse_item_row};
