use std::path::{Path, PathBuf};
use std::sync::Arc;

use rs_catalog::ItemCategory;
use rs_data::{GameData, load_game_data};
use rs_utils::{
    DataError, ENTITIES_TABLE_FILE, ITEMS_TABLE_FILE, LoadOptions, LoadReport, LoadWarning,
    ModelKey, RecordKey, StaticAtlas,
};

use crate::audit;
use crate::tables::{TableFileError, read_table};

fn bundled_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/tables")
}

fn bundled(options: LoadOptions) -> (GameData, [LoadReport; 2]) {
    let root = bundled_root();
    let items = read_table(&root.join(ITEMS_TABLE_FILE)).unwrap();
    let entities = read_table(&root.join(ENTITIES_TABLE_FILE)).unwrap();
    load_game_data(Arc::new(StaticAtlas::default()), options, &items, &entities)
}

#[test]
fn bundled_items_all_load() {
    let (data, [items, _]) = bundled(LoadOptions::default());
    assert_eq!(items.rows_seen, 223);
    assert_eq!(items.rows_loaded, 223);
    assert!(!items.has_errors());
    assert_eq!(data.catalog().len(), 223);

    // These rows spell the property `createblock`.
    assert_eq!(data.catalog().item_creating_block("cake").map(|e| e.id), Some(354));
    assert_eq!(data.catalog().item_creating_block("bed").map(|e| e.id), Some(355));
    assert_eq!(
        data.catalog()
            .item_creating_block("unpowered_repeater")
            .map(|e| e.id),
        Some(356)
    );

    let placeholders = items
        .warnings
        .iter()
        .filter(|w| matches!(w, LoadWarning::PlaceholderTexture { .. }))
        .count();
    assert_eq!(placeholders, 15);
}

#[test]
fn bundled_models_all_decode() {
    let (data, [_, models]) = bundled(LoadOptions::default());
    assert!(models.is_clean());
    assert_eq!(data.models().len(), 30);
    assert_eq!(data.models().painting_names().len(), 26);
    assert_eq!(data.models().painting_names()[0], "Alban");

    let groups: usize = data.models().all().map(|m| m.face_groups.len()).sum();
    assert_eq!(groups, 41);

    let minecart = data.get_entity_model("minecart", None).unwrap();
    assert_eq!(minecart.face_groups[0].rotation.quarter_turns, 3);
    let wheel = &data.face_groups(minecart)[2];
    assert_eq!(wheel.texture_indices, vec![18, 2, 1028, 1044]);

    let full = data
        .get_entity_model_variant(&ModelKey::new("item_frame").with_full(true))
        .unwrap();
    assert_eq!(full.face_groups.len(), 1);
}

#[test]
fn bundled_apple_and_charcoal() {
    let (data, _) = bundled(LoadOptions::default());
    let apple = data.get_item(260, 0).unwrap();
    assert_eq!(apple.stack_size, 64);
    assert_eq!(apple.category, ItemCategory::Crops);
    assert_eq!(apple.durability, None);

    let charcoal = audit::show_item(&data, "minecraft:coal:1").unwrap();
    assert!(charcoal.contains("\"Charcoal\""));
    assert!(charcoal.contains("minecraft:charcoal:1"));
    assert_eq!(
        audit::show_item(&data, "minecraft:unobtainium").unwrap_err(),
        DataError::NotFound {
            key: RecordKey::Name("minecraft:unobtainium".to_string())
        }
    );
}

#[test]
fn audit_fails_on_errors_or_denied_warnings() {
    let (_, reports) = bundled(LoadOptions::default());
    assert!(!audit::failed(&reports, false));
    assert!(audit::failed(&reports, true));

    let quiet = LoadOptions {
        warn_placeholder_texture: false,
        ..LoadOptions::default()
    };
    let (_, reports) = bundled(quiet);
    assert!(!audit::failed(&reports, true));

    let strict_ids = LoadOptions {
        min_item_id: 300,
        ..LoadOptions::default()
    };
    let (_, reports) = bundled(strict_ids);
    assert!(audit::failed(&reports, false));
}

#[test]
fn model_keys_from_arguments() {
    assert_eq!(audit::parse_model_key("creeper"), ModelKey::new("creeper"));
    assert_eq!(
        audit::parse_model_key("painting/Kebab"),
        ModelKey::named("painting", "Kebab")
    );
    assert_eq!(
        audit::parse_model_key("item_frame!"),
        ModelKey::new("item_frame").with_full(true)
    );

    let (data, _) = bundled(LoadOptions::default());
    let text = audit::show_model(&data, "painting/Kebab").unwrap();
    assert!(text.starts_with("entity model painting/Kebab groups=1 vertices=36"));
}

#[test]
fn category_listing_keeps_table_order() {
    let (data, _) = bundled(LoadOptions::default());
    let rails = audit::show_category(&data, ItemCategory::Rails);
    let again = audit::show_category(&data, ItemCategory::Rails);
    assert!(!rails.is_empty());
    assert_eq!(rails, again);
}

#[test]
fn table_files_must_be_arrays() {
    let missing = bundled_root().join("missing.json");
    assert!(matches!(read_table(&missing), Err(TableFileError::Io { .. })));

    let dir = std::env::temp_dir().join(format!("rs-client-tables-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let object = dir.join("object.json");
    std::fs::write(&object, "{\"id\": 256}").unwrap();
    assert!(matches!(read_table(&object), Err(TableFileError::NotArray { .. })));
    let broken = dir.join("broken.json");
    std::fs::write(&broken, "[{\"id\": 256,").unwrap();
    assert!(matches!(read_table(&broken), Err(TableFileError::Json { .. })));
    std::fs::remove_dir_all(&dir).unwrap();
}
