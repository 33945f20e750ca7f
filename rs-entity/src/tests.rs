use bevy_math::Vec3;
use rs_utils::{DataError, LoadOptions, ModelKey, RecordKey, StaticAtlas};
use serde_json::{Value, json};

use super::*;

const FACES: f32 = 1.0;
const TEX_CUBEMAP: f32 = 2.0;
const TEX_DETAIL: f32 = 3.0;
const SIZE: f32 = 5.0;
const TR: f32 = 6.0;
const ROT: f32 = 7.0;
const REF: f32 = 9.0;
const ROT90: f32 = 10.0;
const TEX: f32 = 11.0;
const INVERT: f32 = 12.0;

fn decode_default(stream: &[f32]) -> Result<Vec<FaceGroup>, DataError> {
    decode(stream, &DecodeContext::default())
}

fn full_cube(indices: usize) -> Vec<f32> {
    let mut stream = vec![FACES, 63.0, SIZE, 16.0, 16.0, 16.0, TEX];
    stream.extend((0..indices).map(|i| i as f32));
    stream
}

fn assert_malformed(result: Result<Vec<FaceGroup>, DataError>, offset: usize) {
    match result {
        Err(DataError::MalformedOpcodeStream { offset: at, .. }) => assert_eq!(at, offset),
        other => panic!("expected a malformed stream error, got {other:?}"),
    }
}

#[test]
fn opcode_table_is_indexed_by_value() {
    for (i, info) in OPCODES.iter().enumerate() {
        assert_eq!(info.opcode as usize, i + 1);
        assert_eq!(Opcode::from_value((i + 1) as f32), Some(info.opcode));
        assert_eq!(Opcode::from_name(info.name), Some(info.opcode));
    }
    assert_eq!(Opcode::from_value(0.0), None);
    assert_eq!(Opcode::from_value(16.0), None);
    assert_eq!(Opcode::from_value(3.5), None);
    assert_eq!(Opcode::Tex.operand_count(6), 24);
    assert_eq!(Opcode::Rot90.operand_count(6), 1);
}

#[test]
fn full_mask_needs_exactly_24_indices() {
    let groups = decode_default(&full_cube(24)).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].texture_indices.len(), 24);
    assert_eq!(groups[0].vertex_count(), 36);

    assert_malformed(decode_default(&full_cube(23)), 6);
    // The surplus index is where a new run should have started.
    assert_malformed(decode_default(&full_cube(25)), 31);
}

#[test]
fn minecart_wheel_run() {
    let stream = [
        FACES, 16.0, TEX_DETAIL, SIZE, 2.0, 0.0, 16.0, TR, 0.0, 10.0, 0.0, TEX, 18.0, 2.0, 1028.0,
        1044.0,
    ];
    let groups = decode_default(&stream).unwrap();
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    assert_eq!(group.faces, FaceMask::TOP);
    assert_eq!(group.detail, DetailFlags::TEX_DETAIL);
    assert_eq!(group.size, Vec3::new(2.0, 0.0, 16.0));
    assert_eq!(group.translation, Vec3::new(0.0, 10.0, 0.0));
    assert!(group.rotation.is_identity());
    assert_eq!(group.texture_indices, vec![18, 2, 1028, 1044]);

    let mut two_faces = stream;
    two_faces[1] = 17.0;
    assert_malformed(decode_default(&two_faces), 11);
}

#[test]
fn rot90_accepts_quarter_turns_only() {
    let stream = |angle: f32| {
        vec![FACES, 1.0, ROT90, angle, TEX, 1.0, 2.0, 3.0, 4.0]
    };
    let groups = decode_default(&stream(270.0)).unwrap();
    assert_eq!(groups[0].rotation.quarter_turns, 3);
    assert_eq!(decode_default(&stream(0.0)).unwrap()[0].rotation.quarter_turns, 0);

    for angle in [45.0, 360.0, -90.0, 90.5] {
        assert_eq!(
            decode_default(&stream(angle)).unwrap_err(),
            DataError::InvalidRotation { offset: 3, angle }
        );
    }
}

#[test]
fn runs_keep_order_and_reset_defaults() {
    let stream = [
        FACES, 63.0, INVERT, SIZE, 12.0, 8.0, 16.0, ROT, 0.0, 180.0, 0.0, REF, 8.0, 0.0, 8.0, TEX,
        0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0,
        17.0, 18.0, 19.0, 20.0, 21.0, 22.0, 23.0, FACES, 32.0, TEX, 99.0, 98.0, 97.0, 96.0,
    ];
    let groups = decode_default(&stream).unwrap();
    assert_eq!(groups.len(), 2);

    let first = &groups[0];
    assert_eq!(first.offset, 0);
    assert_eq!(first.detail, DetailFlags::INVERT);
    assert_eq!(first.rotation.angles, Vec3::new(0.0, 180.0, 0.0));
    assert_eq!(first.pivot, Some(Vec3::new(8.0, 0.0, 8.0)));

    let second = &groups[1];
    assert_eq!(second.offset, 40);
    assert_eq!(second.faces, FaceMask::BOTTOM);
    assert_eq!(second.detail, DetailFlags::empty());
    assert_eq!(second.size, Vec3::ZERO);
    assert!(second.rotation.is_identity());
    assert_eq!(second.pivot, None);
    let faces: Vec<_> = second.face_textures().collect();
    assert_eq!(faces, vec![(FaceMask::BOTTOM, &[99u32, 98, 97, 96][..])]);
}

#[test]
fn starting_context_seeds_every_run() {
    let context = DecodeContext {
        size: Vec3::splat(16.0),
        detail: DetailFlags::TEX_DETAIL,
        ..DecodeContext::default()
    };
    let stream = [
        FACES, 1.0, TEX, 1.0, 2.0, 3.0, 4.0, FACES, 2.0, SIZE, 1.0, 1.0, 1.0, TEX, 5.0, 6.0, 7.0,
        8.0,
    ];
    let groups = decode(&stream, &context).unwrap();
    assert_eq!(groups[0].size, Vec3::splat(16.0));
    assert_eq!(groups[1].size, Vec3::ONE);
    assert!(groups.iter().all(|g| g.detail == DetailFlags::TEX_DETAIL));
}

#[test]
fn decoding_is_repeatable() {
    let stream = full_cube(24);
    assert_eq!(decode_default(&stream).unwrap(), decode_default(&stream).unwrap());
}

#[test]
fn malformed_streams_report_offsets() {
    assert_malformed(decode_default(&[SIZE, 1.0, 1.0, 1.0]), 0);
    assert_malformed(decode_default(&[FACES, 64.0, TEX]), 1);
    assert_malformed(decode_default(&[FACES, 1.5, TEX]), 1);
    assert_malformed(decode_default(&[FACES, 1.0, 42.0]), 2);
    assert_malformed(decode_default(&[FACES, 1.0, TEX_CUBEMAP]), 2);
    assert_malformed(decode_default(&[FACES, 1.0, SIZE, 1.0]), 2);
    assert_malformed(decode_default(&[FACES, 1.0, TEX_DETAIL]), 3);
    assert_malformed(decode_default(&[FACES, 1.0, FACES, 1.0]), 2);
    assert_malformed(decode_default(&[FACES, 1.0, TEX, 1.0, -2.0, 3.0, 4.0]), 4);
    assert_malformed(decode_default(&[FACES, 1.0, TR, f32::NAN, 0.0, 0.0]), 3);
    assert_eq!(decode_default(&[]).unwrap(), vec![]);
}

#[test]
fn empty_mask_has_no_textures() {
    let groups = decode_default(&[FACES, 0.0, TEX]).unwrap();
    assert_eq!(groups[0].face_count(), 0);
    assert!(groups[0].texture_indices.is_empty());
}

#[test]
fn model_stream_converts_token_names() {
    let values = json!(["FACES", 16, "TR", 0, 10.5, 0, "TEX", 1, 2, 3, 4]);
    let stream = model_stream(values.as_array().unwrap()).unwrap();
    assert_eq!(stream[0], FACES);
    assert_eq!(stream[4], 10.5);
    assert_eq!(stream[6], TEX);

    let bad = json!(["FACES", 1, "SPIN", 3]);
    assert_eq!(
        model_stream(bad.as_array().unwrap()).unwrap_err(),
        DataError::malformed(2, "unknown token 'SPIN'")
    );
}

fn records() -> Vec<Value> {
    let frame = json!(["FACES", 62, "TEX_DETAIL", "SIZE", 16, 16, 1,
        "TEX", 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20]);
    vec![
        json!({"id": "painting", "name": "Kebab", "model": ["FACES", 32, "SIZE", 16, 16, 1, "TEX", 1, 2, 3, 4]}),
        json!({"id": "painting", "name": "Aztec", "model": ["FACES", 32, "SIZE", 16, 16, 1, "TEX", 5, 6, 7, 8]}),
        json!({"id": "item_frame", "model": frame}),
        json!({"id": "item_frame", "full": 1, "model": frame}),
        json!({"id": "minecart", "texAtlas": "ENTITIES", "model": ["FACES", 47, "ROT90", 270, "TEX",
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20]}),
    ]
}

#[test]
fn model_table_keys_include_variants() {
    let models =
        ModelTable::build(&records(), &StaticAtlas::default(), &LoadOptions::default()).unwrap();
    assert_eq!(models.len(), 5);
    assert_eq!(models.painting_names(), vec!["Kebab", "Aztec"]);

    let frame = models.get("item_frame", None).unwrap();
    assert!(!frame.full);
    let full = models
        .variant(&ModelKey::new("item_frame").with_full(true))
        .unwrap();
    assert!(full.full);
    assert_eq!(full.vertex_count(), 30);

    let minecart = models.get("minecart", None).unwrap();
    assert_eq!(minecart.texture_atlas.as_deref(), Some("ENTITIES"));
    assert_eq!(minecart.face_groups[0].rotation.quarter_turns, 3);

    assert_eq!(
        models.get("painting", Some("Sunset")).unwrap_err(),
        DataError::NotFound {
            key: RecordKey::Model(ModelKey::named("painting", "Sunset"))
        }
    );
    assert_eq!(models.variants("item_frame").count(), 2);
}

#[test]
fn duplicate_models_are_reported() {
    let mut records = records();
    records.push(json!({"id": "painting", "name": "Kebab", "model": ["FACES", 0, "TEX"]}));
    let (models, report) =
        ModelTable::load(&records, &StaticAtlas::default(), &LoadOptions::default());
    assert_eq!(models.len(), 5);
    assert_eq!(report.rows_seen, 6);
    assert_eq!(report.rows_loaded, 5);
    assert_eq!(
        report.first_error(),
        Some(&DataError::DuplicateKey {
            key: RecordKey::Model(ModelKey::named("painting", "Kebab")),
            first_row: 0,
            row: 5,
        })
    );
}

#[test]
fn invalid_records_collect_all_errors() {
    let records = vec![
        json!({"id": "boat", "texAtlas": "VEHICLES", "model": []}),
        json!({"id": "creeper", "model": ["FACES", 63, "TEX", 1, 2]}),
        json!({"model": ["FACES", 0, "TEX"], "scale": 2}),
        json!("creeper"),
    ];
    let (models, report) =
        ModelTable::load(&records, &StaticAtlas::default(), &LoadOptions::default());
    assert!(models.is_empty());
    assert_eq!(report.rejected_rows(), vec![0, 1, 2, 3]);
    assert_eq!(report.errors.iter().filter(|e| e.row == 0).count(), 2);
    assert!(matches!(
        report.errors.iter().find(|e| e.row == 1).map(|e| &e.error),
        Some(DataError::MalformedOpcodeStream { offset: 2, .. })
    ));
    assert_eq!(report.errors.iter().filter(|e| e.row == 2).count(), 2);
}
