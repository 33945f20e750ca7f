//! Loads the item and entity tables and serves read-only queries over them.

pub mod game_data;
pub mod loader;

pub use game_data::{GameData, SharedGameData};
pub use loader::{GameDataLoader, load_game_data};
