pub mod cli;
pub mod core;
pub mod rates;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::record::{NewEntry, RecordKind, RecordPatch};
use crate::rates::{ExchangeRateApiProvider, RateService};
use crate::store::{BlobStore, FjallStore, RecordStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Add(NewEntry),
    Income(NewEntry),
    List { category: Option<String> },
    Balance,
    Edit { id: String, patch: RecordPatch },
    Delete { id: String },
    Rates { refresh: bool },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Billfold starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store: Arc<dyn BlobStore> = Arc::new(FjallStore::open(&config.default_data_path()?)?);
    let mut records = RecordStore::load(Arc::clone(&store))?;

    let provider = ExchangeRateApiProvider::new(&config.rates.base_url, &config.rates.api_key);
    let rate_service = RateService::new(provider, Arc::clone(&store));

    match command {
        AppCommand::Add(entry) => cli::add::run(&mut records, entry, RecordKind::Expense, &config),
        AppCommand::Income(entry) => {
            cli::add::run(&mut records, entry, RecordKind::Income, &config)
        }
        AppCommand::List { category } => cli::list::run(records.records(), category.as_deref()),
        AppCommand::Balance => {
            cli::balance::run(records.records(), &rate_service, &config.currency).await
        }
        AppCommand::Edit { id, patch } => cli::edit::run(&mut records, &id, patch),
        AppCommand::Delete { id } => cli::delete::run(&mut records, &id),
        AppCommand::Rates { refresh } => cli::rates::run(&rate_service, refresh).await,
    }
}
