use std::sync::Arc;

use rs_catalog::Catalog;
use rs_entity::{DecodeContext, ModelTable};
use rs_utils::{LoadOptions, LoadReport, TextureAtlas};
use serde_json::Value;
use tracing::info;

use crate::game_data::GameData;

/// Builds a [`GameData`] table by table. Every load keeps the valid rows and
/// hands back the full report; the caller decides what is fatal.
pub struct GameDataLoader {
    atlas: Arc<dyn TextureAtlas>,
    options: LoadOptions,
    context: DecodeContext,
    catalog: Catalog,
    models: ModelTable,
}

impl GameDataLoader {
    pub fn new(atlas: Arc<dyn TextureAtlas>, options: LoadOptions) -> Self {
        Self {
            atlas,
            options,
            context: DecodeContext::default(),
            catalog: Catalog::default(),
            models: ModelTable::default(),
        }
    }

    pub fn with_decode_context(mut self, context: DecodeContext) -> Self {
        self.context = context;
        self
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Replaces the item catalog with the valid rows of `rows`.
    pub fn load_catalog(&mut self, rows: &[Value]) -> LoadReport {
        let (catalog, report) = Catalog::load(rows, self.atlas.as_ref(), &self.options);
        self.catalog = catalog;
        report
    }

    /// Replaces the entity models with the valid records of `records`.
    pub fn load_entity_models(&mut self, records: &[Value]) -> LoadReport {
        let (models, report) = ModelTable::load_with_context(
            records,
            self.atlas.as_ref(),
            &self.options,
            &self.context,
        );
        self.models = models;
        report
    }

    pub fn finish(self) -> GameData {
        info!(
            items = self.catalog.len(),
            models = self.models.len(),
            "game data ready"
        );
        GameData::new(self.catalog, self.models, self.atlas)
    }
}

/// Loads both tables in one go.
pub fn load_game_data(
    atlas: Arc<dyn TextureAtlas>,
    options: LoadOptions,
    items: &[Value],
    entities: &[Value],
) -> (GameData, [LoadReport; 2]) {
    let mut loader = GameDataLoader::new(atlas, options);
    let catalog = loader.load_catalog(items);
    let models = loader.load_entity_models(entities);
    (loader.finish(), [catalog, models])
}
