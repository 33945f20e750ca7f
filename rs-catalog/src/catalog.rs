use rs_utils::{
    ByCategory, DataError, ItemKey, LoadOptions, LoadReport, LoadWarning, RecordKey, TableIndex,
    TableKind, TextureAtlas, TextureCoord,
};
use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::debug;

use crate::item::{CatalogEntry, ItemCategory};
use crate::parse::parse_item_row;

const NAMESPACE: &str = "minecraft:";

/// The item table, indexed by (id, state) and by technical name.
#[derive(Default)]
pub struct Catalog {
    table: TableIndex<CatalogEntry>,
    /// Technical names of state 0 entries, lower case.
    by_tech: FxHashMap<String, u32>,
}

impl Catalog {
    /// Strict build: any invalid or duplicate row fails the whole table.
    pub fn build(
        rows: &[Value],
        atlas: &dyn TextureAtlas,
        options: &LoadOptions,
    ) -> Result<Self, Vec<DataError>> {
        let (catalog, report) = Self::load(rows, atlas, options);
        if report.has_errors() {
            return Err(report.errors.into_iter().map(|e| e.error).collect());
        }
        Ok(catalog)
    }

    /// Best-effort load: keeps every valid row and reports the rest.
    pub fn load(
        rows: &[Value],
        atlas: &dyn TextureAtlas,
        options: &LoadOptions,
    ) -> (Self, LoadReport) {
        let mut report = LoadReport::new(TableKind::Catalog);
        let mut builder = TableIndex::builder();
        let mut texture_owners: FxHashMap<TextureCoord, ItemKey> = FxHashMap::default();
        let placeholder = options.placeholder();

        for (row, value) in rows.iter().enumerate() {
            report.rows_seen += 1;
            let entry = match parse_item_row(row, value, atlas, options) {
                Ok(entry) => entry,
                Err(errors) => {
                    report.push_errors(row, errors);
                    continue;
                }
            };
            let key = entry.key();
            let texture = entry.texture;
            if let Err(err) = builder.insert(row, entry) {
                report.push_error(row, err);
                continue;
            }
            report.rows_loaded += 1;

            if placeholder == Some(texture) {
                report.push_warning(LoadWarning::PlaceholderTexture {
                    row,
                    key,
                    coord: texture,
                });
            } else if let Some(&first) = texture_owners.get(&texture) {
                if options.warn_shared_textures {
                    report.push_warning(LoadWarning::SharedTexture {
                        row,
                        key,
                        coord: texture,
                        first,
                    });
                }
            } else {
                texture_owners.insert(texture, key);
            }
        }

        let table = builder.finish();
        let mut by_tech = FxHashMap::default();
        for entry in table.all().filter(|e| e.state == 0) {
            by_tech
                .entry(entry.tech_name().to_lowercase())
                .or_insert(entry.id);
        }
        debug!(
            items = table.len(),
            names = by_tech.len(),
            "item catalog indexed"
        );
        report.log_summary();
        (Self { table, by_tech }, report)
    }

    pub fn lookup(&self, id: u32, state: u16) -> Result<&CatalogEntry, DataError> {
        self.table.lookup(&ItemKey::new(id, state))
    }

    pub fn get(&self, key: ItemKey) -> Option<&CatalogEntry> {
        self.table.get(&key)
    }

    pub fn filter_by_category(&self, category: ItemCategory) -> ByCategory<'_, CatalogEntry> {
        self.table.filter_by_category(category)
    }

    pub fn all(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.table.all()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &TableIndex<CatalogEntry> {
        &self.table
    }

    /// Resolves `coal`, `minecraft:coal`, `Minecraft:COAL:1` or a bare
    /// numeric id such as `263`.
    pub fn find_by_name(&self, name: &str) -> Result<&CatalogEntry, DataError> {
        let not_found = || DataError::not_found(RecordKey::Name(name.to_string()));
        let trimmed = name.trim();
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            let id = trimmed.parse::<u32>().map_err(|_| not_found())?;
            return self.lookup(id, 0);
        }

        let lowered = trimmed.to_ascii_lowercase();
        let unqualified = lowered.strip_prefix(NAMESPACE).unwrap_or(&lowered);
        let (tech, state) = match unqualified.split_once(':') {
            Some((tech, meta)) => (tech, meta.parse::<u16>().map_err(|_| not_found())?),
            None => (unqualified, 0),
        };
        let id = *self.by_tech.get(tech).ok_or_else(not_found)?;
        self.lookup(id, state)
    }

    /// `minecraft:<tech>`. With `with_state` a variant is named by its own
    /// technical name plus `:<state>`; otherwise by its base item.
    pub fn qualified_name(&self, key: ItemKey, with_state: bool) -> Result<String, DataError> {
        let entry = self.table.lookup(&key)?;
        if with_state {
            let mut name = format!("{NAMESPACE}{}", entry.tech_name());
            if key.state != 0 {
                name.push(':');
                name.push_str(&key.state.to_string());
            }
            return Ok(name);
        }
        let base = self.get(ItemKey::base(key.id)).unwrap_or(entry);
        Ok(format!("{NAMESPACE}{}", base.tech_name()))
    }

    /// First item that places the block with technical name `block`.
    pub fn item_creating_block(&self, block: &str) -> Option<&CatalogEntry> {
        self.table
            .all()
            .find(|e| e.creates_block.as_deref() == Some(block))
    }
}
