mod audit;
mod tables;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use rs_catalog::ItemCategory;
use rs_data::load_game_data;
use rs_utils::{ENTITIES_TABLE_FILE, ITEMS_TABLE_FILE, LoadOptions, StaticAtlas, tables_root};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rs-client", about = "Check the item and entity tables")]
struct Cli {
    /// Directory holding items.json and entities.json
    #[arg(long)]
    tables: Option<PathBuf>,
    /// TOML file with load options
    #[arg(long, short)]
    config: Option<PathBuf>,
    /// Treat data-quality warnings as failures
    #[arg(long)]
    deny_warnings: bool,
    /// Print an item by name or id, e.g. minecraft:coal:1
    #[arg(long)]
    item: Vec<String>,
    /// Print an entity model as ID, ID/NAME or ID! (filled variant)
    #[arg(long)]
    model: Vec<String>,
    /// Print every item of a creative category
    #[arg(long)]
    category: Option<ItemCategory>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    info!("Starting ruststone table check");

    let options = match &cli.config {
        Some(path) => match LoadOptions::from_file(path) {
            Ok(options) => options,
            Err(err) => {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => LoadOptions::default(),
    };

    let root = cli.tables.clone().unwrap_or_else(tables_root);
    let (items, entities) = match (
        tables::read_table(&root.join(ITEMS_TABLE_FILE)),
        tables::read_table(&root.join(ENTITIES_TABLE_FILE)),
    ) {
        (Ok(items), Ok(entities)) => (items, entities),
        (Err(err), _) | (_, Err(err)) => {
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    info!(root = %root.display(), "tables read");

    let (data, reports) = load_game_data(
        Arc::new(StaticAtlas::default()),
        options,
        &items,
        &entities,
    );
    for report in &reports {
        info!("{report}");
    }

    for query in &cli.item {
        match audit::show_item(&data, query) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!(query = %query, "{err}"),
        }
    }
    for query in &cli.model {
        match audit::show_model(&data, query) {
            Ok(text) => println!("{text}"),
            Err(err) => warn!(query = %query, "{err}"),
        }
    }
    if let Some(category) = cli.category {
        for line in audit::show_category(&data, category) {
            println!("{line}");
        }
    }

    if audit::failed(&reports, cli.deny_warnings) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests;
