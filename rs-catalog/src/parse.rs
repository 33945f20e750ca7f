use rs_utils::{DataError, LoadOptions, RowReader, TextureAtlas, TextureCoord};
use serde_json::Value;

use crate::item::{CatalogEntry, Durability, ItemCategory, ToolTier};

/// Properties an item row may carry.
pub const ITEM_PROPERTIES: [&str; 10] = [
    "id",
    "state",
    "name",
    "tex",
    "cat",
    "stack",
    "durability",
    "tech",
    "createBlock",
    "createTileEntity",
];

/// Validates one raw item row. All problems of the row are returned together.
pub fn parse_item_row(
    row: usize,
    value: &Value,
    atlas: &dyn TextureAtlas,
    options: &LoadOptions,
) -> Result<CatalogEntry, Vec<DataError>> {
    let mut reader = RowReader::new(row, value).map_err(|e| vec![e])?;

    let id = reader.required_u32("id").and_then(|id| {
        if id < options.min_item_id {
            reader.reject(
                "id",
                format!("must be at least {}, found {id}", options.min_item_id),
            );
            None
        } else {
            Some(id)
        }
    });

    let state = match reader.optional_u32("state") {
        Some(state) => match u16::try_from(state) {
            Ok(state) => Some(state),
            Err(_) => {
                reader.reject("state", format!("is out of range: {state}"));
                None
            }
        },
        None => Some(0),
    };

    let name = reader.required_str("name");

    let stack = reader.required_u32("stack").and_then(|stack| {
        if (1..=u32::from(options.max_stack_size)).contains(&stack) {
            Some(stack as u8)
        } else {
            reader.reject(
                "stack",
                format!("must be in [1, {}], found {stack}", options.max_stack_size),
            );
            None
        }
    });

    let category = reader.required_str("cat").and_then(|cat| {
        let parsed = ItemCategory::from_name(cat);
        if parsed.is_none() {
            reader.reject("cat", format!("unknown item category '{cat}'"));
        }
        parsed
    });

    let texture = reader.required_pair("tex").and_then(|[u, v]| {
        let coord = match (u16::try_from(u), u16::try_from(v)) {
            (Ok(u), Ok(v)) => Some(TextureCoord::new(u, v)),
            _ => None,
        };
        match coord {
            Some(coord) if atlas.contains_item_cell(coord) => Some(coord),
            _ => {
                let (columns, rows) = atlas.item_grid();
                reader.reject(
                    "tex",
                    format!("[{u}, {v}] is outside the {columns}x{rows} item grid"),
                );
                None
            }
        }
    });

    let durability = parse_durability(&mut reader);
    let tech = reader.optional_str("tech").map(str::to_string);
    let creates_block = reader.optional_str("createBlock").map(str::to_string);
    let creates_tile_entity = reader.optional_str("createTileEntity").map(str::to_string);

    if options.strict_properties {
        reader.check_known_keys(&ITEM_PROPERTIES);
    }

    match (id, state, name, stack, category, texture) {
        (Some(id), Some(state), Some(name), Some(stack_size), Some(category), Some(texture))
            if !reader.has_errors() =>
        {
            Ok(CatalogEntry {
                id,
                state,
                name: name.to_string(),
                stack_size,
                category,
                texture,
                durability,
                creates_block,
                creates_tile_entity,
                tech,
            })
        }
        _ => Err(reader.into_errors()),
    }
}

fn parse_durability(reader: &mut RowReader<'_>) -> Option<Durability> {
    match reader.raw("durability")? {
        Value::String(tier) => match ToolTier::from_name(tier) {
            Some(tier) => Some(Durability::Tier(tier)),
            None => {
                reader.reject("durability", format!("unknown tier '{tier}'"));
                None
            }
        },
        _ => match reader.optional_u32("durability")? {
            0 => {
                reader.reject("durability", "must be positive");
                None
            }
            uses => Some(Durability::Uses(uses)),
        },
    }
}
