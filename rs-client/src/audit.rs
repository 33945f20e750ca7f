use std::fmt::Write as _;

use rs_catalog::{CatalogEntry, ItemCategory};
use rs_data::GameData;
use rs_entity::EntityModel;
use rs_utils::{DataError, LoadReport, ModelKey};

/// Whether the reports should fail the run.
pub fn failed(reports: &[LoadReport], deny_warnings: bool) -> bool {
    reports
        .iter()
        .any(|r| r.has_errors() || (deny_warnings && !r.warnings.is_empty()))
}

/// `ID`, `ID/NAME`, or `ID!` for the filled-map variant.
pub fn parse_model_key(raw: &str) -> ModelKey {
    let (rest, full) = match raw.strip_suffix('!') {
        Some(rest) => (rest, true),
        None => (raw, false),
    };
    let key = match rest.split_once('/') {
        Some((id, name)) => ModelKey::named(id, name),
        None => ModelKey::new(rest),
    };
    key.with_full(full)
}

pub fn describe_item(data: &GameData, entry: &CatalogEntry) -> String {
    let mut out = format!(
        "{} {} \"{}\" stack={} cat={} tex={}",
        entry.key(),
        data.catalog()
            .qualified_name(entry.key(), true)
            .unwrap_or_default(),
        entry.name,
        entry.stack_size,
        entry.category,
        entry.texture,
    );
    if let Some(max) = entry.max_durability() {
        let _ = write!(out, " durability={max}");
    }
    if let Some(block) = &entry.creates_block {
        let _ = write!(out, " block={block}");
    }
    if let Some(tile) = &entry.creates_tile_entity {
        let _ = write!(out, " tile={tile}");
    }
    out
}

pub fn describe_model(model: &EntityModel) -> String {
    let mut out = format!(
        "{} groups={} vertices={}",
        model.key(),
        model.face_groups.len(),
        model.vertex_count()
    );
    if let Some(atlas) = &model.texture_atlas {
        let _ = write!(out, " atlas={atlas}");
    }
    for group in &model.face_groups {
        let _ = write!(
            out,
            "\n  @{} faces={:?} size={} tr={} textures={:?}",
            group.offset,
            group.faces,
            group.size,
            group.translation,
            group.texture_indices
        );
    }
    out
}

pub fn show_item(data: &GameData, query: &str) -> Result<String, DataError> {
    data.catalog()
        .find_by_name(query)
        .map(|entry| describe_item(data, entry))
}

pub fn show_model(data: &GameData, query: &str) -> Result<String, DataError> {
    data.get_entity_model_variant(&parse_model_key(query))
        .map(describe_model)
}

pub fn show_category(data: &GameData, category: ItemCategory) -> Vec<String> {
    data.items_by_category(category)
        .map(|entry| describe_item(data, entry))
        .collect()
}
