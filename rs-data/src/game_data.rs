use std::sync::Arc;

use arc_swap::ArcSwap;
use bevy_ecs::prelude::Resource;
use rs_catalog::{Catalog, CatalogEntry, ItemCategory};
use rs_entity::{EntityModel, FaceGroup, ModelTable};
use rs_utils::{ByCategory, DataError, ModelKey, TextureAtlas};

/// Loaded, immutable game data. Safe to query from any thread.
pub struct GameData {
    catalog: Catalog,
    models: ModelTable,
    atlas: Arc<dyn TextureAtlas>,
}

impl GameData {
    pub(crate) fn new(catalog: Catalog, models: ModelTable, atlas: Arc<dyn TextureAtlas>) -> Self {
        Self {
            catalog,
            models,
            atlas,
        }
    }

    pub fn get_item(&self, id: u32, state: u16) -> Result<&CatalogEntry, DataError> {
        self.catalog.lookup(id, state)
    }

    pub fn items_by_category(&self, category: ItemCategory) -> ByCategory<'_, CatalogEntry> {
        self.catalog.filter_by_category(category)
    }

    pub fn get_entity_model(
        &self,
        id: &str,
        name: Option<&str>,
    ) -> Result<&EntityModel, DataError> {
        self.models.get(id, name)
    }

    pub fn get_entity_model_variant(&self, key: &ModelKey) -> Result<&EntityModel, DataError> {
        self.models.variant(key)
    }

    /// Decoded at load time; this never decodes again.
    pub fn face_groups<'a>(&self, model: &'a EntityModel) -> &'a [FaceGroup] {
        &model.face_groups
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn models(&self) -> &ModelTable {
        &self.models
    }

    pub fn atlas(&self) -> &dyn TextureAtlas {
        self.atlas.as_ref()
    }
}

/// Hot-reloadable handle to the current [`GameData`].
///
/// Readers take a snapshot with [`SharedGameData::current`] and keep it as
/// long as they need; [`SharedGameData::replace`] never touches it.
#[derive(Resource)]
pub struct SharedGameData {
    current: ArcSwap<GameData>,
}

impl SharedGameData {
    pub fn new(data: GameData) -> Self {
        Self {
            current: ArcSwap::from_pointee(data),
        }
    }

    pub fn current(&self) -> Arc<GameData> {
        self.current.load_full()
    }

    /// Swaps in `data` and returns the previous snapshot.
    pub fn replace(&self, data: GameData) -> Arc<GameData> {
        self.current.swap(Arc::new(data))
    }
}
