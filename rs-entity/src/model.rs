use rs_utils::{
    DataError, LoadOptions, LoadReport, ModelKey, RowReader, TableIndex, TableKind, TableRecord,
    TextureAtlas,
};
use serde_json::Value;
use tracing::debug;

use crate::decoder::decode;
use crate::face::{DecodeContext, FaceGroup};
use crate::opcode::Opcode;

/// Properties a model record may carry.
pub const MODEL_PROPERTIES: [&str; 5] = ["id", "name", "texAtlas", "full", "model"];

pub const PAINTING: &str = "painting";

/// An entity kind (or one of its variants) with its decoded geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityModel {
    pub id: String,
    pub name: Option<String>,
    /// Filled-map variant of an item frame.
    pub full: bool,
    pub texture_atlas: Option<String>,
    pub face_groups: Vec<FaceGroup>,
}

impl EntityModel {
    pub fn key(&self) -> ModelKey {
        ModelKey {
            id: self.id.clone(),
            name: self.name.clone(),
            full: self.full,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.face_groups.iter().map(FaceGroup::vertex_count).sum()
    }
}

impl TableRecord for EntityModel {
    type Key = ModelKey;

    fn key(&self) -> ModelKey {
        EntityModel::key(self)
    }
}

/// Turns the raw `model` array into the numeric stream: token names become
/// their values, numbers pass through.
pub fn model_stream(values: &[Value]) -> Result<Vec<f32>, DataError> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| match value {
            Value::Number(n) => n
                .as_f64()
                .map(|n| n as f32)
                .ok_or_else(|| DataError::malformed(i, format!("unrepresentable number {n}"))),
            Value::String(token) => Opcode::from_name(token)
                .map(Opcode::value)
                .ok_or_else(|| DataError::malformed(i, format!("unknown token '{token}'"))),
            other => Err(DataError::malformed(
                i,
                format!("expected a token name or a number, found {other}"),
            )),
        })
        .collect()
}

/// Validates one raw model record and decodes its opcode stream.
pub fn parse_model_record(
    row: usize,
    value: &Value,
    atlas: &dyn TextureAtlas,
    options: &LoadOptions,
    context: &DecodeContext,
) -> Result<EntityModel, Vec<DataError>> {
    let mut reader = RowReader::new(row, value).map_err(|e| vec![e])?;

    let id = reader.required_str("id");
    let name = reader.optional_str("name");
    let texture_atlas = reader.optional_str("texAtlas");
    if let Some(atlas_name) = texture_atlas
        && !atlas.has_atlas(atlas_name)
    {
        reader.reject("texAtlas", format!("unknown texture atlas '{atlas_name}'"));
    }
    let full = reader.optional_flag("full");
    let model = reader.required_array("model");
    if model.is_some_and(<[Value]>::is_empty) {
        reader.reject("model", "must not be empty");
    }
    if options.strict_properties {
        reader.check_known_keys(&MODEL_PROPERTIES);
    }

    let face_groups = match model {
        Some(values) if !values.is_empty() => model_stream(values)
            .and_then(|stream| decode(&stream, context))
            .map(Some),
        _ => Ok(None),
    };

    match (id, full, face_groups) {
        (Some(id), Some(full), Ok(Some(face_groups))) if !reader.has_errors() => Ok(EntityModel {
            id: id.to_string(),
            name: name.map(str::to_string),
            full,
            texture_atlas: texture_atlas.map(str::to_string),
            face_groups,
        }),
        (_, _, Err(err)) => {
            let mut errors = reader.into_errors();
            errors.push(err);
            Err(errors)
        }
        _ => Err(reader.into_errors()),
    }
}

/// Entity models keyed by (id, name, full), in load order.
#[derive(Default)]
pub struct ModelTable {
    table: TableIndex<EntityModel>,
}

impl ModelTable {
    /// Strict build: any invalid or duplicate record fails the whole table.
    pub fn build(
        records: &[Value],
        atlas: &dyn TextureAtlas,
        options: &LoadOptions,
    ) -> Result<Self, Vec<DataError>> {
        let (models, report) = Self::load(records, atlas, options);
        if report.has_errors() {
            return Err(report.errors.into_iter().map(|e| e.error).collect());
        }
        Ok(models)
    }

    pub fn load(
        records: &[Value],
        atlas: &dyn TextureAtlas,
        options: &LoadOptions,
    ) -> (Self, LoadReport) {
        Self::load_with_context(records, atlas, options, &DecodeContext::default())
    }

    /// Like [`ModelTable::load`], starting every run from `context`.
    pub fn load_with_context(
        records: &[Value],
        atlas: &dyn TextureAtlas,
        options: &LoadOptions,
        context: &DecodeContext,
    ) -> (Self, LoadReport) {
        let mut report = LoadReport::new(TableKind::EntityModels);
        let mut builder = TableIndex::builder();

        for (row, value) in records.iter().enumerate() {
            report.rows_seen += 1;
            match parse_model_record(row, value, atlas, options, context) {
                Ok(model) => match builder.insert(row, model) {
                    Ok(()) => report.rows_loaded += 1,
                    Err(err) => report.push_error(row, err),
                },
                Err(errors) => report.push_errors(row, errors),
            }
        }

        let table = builder.finish();
        debug!(
            models = table.len(),
            groups = table.all().map(|m| m.face_groups.len()).sum::<usize>(),
            "entity models decoded"
        );
        report.log_summary();
        (Self { table }, report)
    }

    /// Model of kind `id`, or its variant `name`. The filled-map variant is
    /// only reachable through [`ModelTable::variant`].
    pub fn get(&self, id: &str, name: Option<&str>) -> Result<&EntityModel, DataError> {
        let key = match name {
            Some(name) => ModelKey::named(id, name),
            None => ModelKey::new(id),
        };
        self.table.lookup(&key)
    }

    pub fn variant(&self, key: &ModelKey) -> Result<&EntityModel, DataError> {
        self.table.lookup(key)
    }

    /// Every variant of kind `id`, in load order.
    pub fn variants<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a EntityModel> + Clone {
        self.table.filter(move |m| m.id == id)
    }

    pub fn painting_names(&self) -> Vec<&str> {
        self.variants(PAINTING)
            .filter_map(|m| m.name.as_deref())
            .collect()
    }

    pub fn all(&self) -> std::slice::Iter<'_, EntityModel> {
        self.table.all()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &TableIndex<EntityModel> {
        &self.table
    }
}
