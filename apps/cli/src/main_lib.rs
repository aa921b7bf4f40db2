use std::path::Path;
use std::sync::Arc;

use anyhow::bail;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use stockfetch_core::fetch::FetchService;
use stockfetch_core::progress::{ProgressTracker, RunStatusReader};
use stockfetch_core::status::{StatusObserver, StatusReport, StatusReporter};
use stockfetch_market_data::{HttpSymbolCatalog, YahooProvider};
use stockfetch_storage_sqlite::{db, PriceRepository, RunStatusRepository, RunStatusView};

use crate::config::Config;

pub fn init_tracing() {
    let log_format = std::env::var("SF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Opened database: repositories sharing one pool and one writer actor.
pub struct Store {
    pub prices: Arc<PriceRepository>,
    pub run_status: Arc<RunStatusRepository>,
}

/// Initialize the database file, apply migrations and start the writer.
pub fn open_store(config: &Config) -> anyhow::Result<Store> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone())?;

    Ok(Store {
        prices: Arc::new(PriceRepository::new(pool.clone(), writer.clone())),
        run_status: Arc::new(RunStatusRepository::new(pool, writer)),
    })
}

pub fn build_fetch_service(config: &Config, store: &Store) -> anyhow::Result<FetchService> {
    let catalog = HttpSymbolCatalog::new(config.catalog_url.clone(), config.http_timeout)?;
    tracing::info!("Symbol catalog: {}", catalog.url());
    let provider = YahooProvider::new()?;

    let service = FetchService::new(
        Arc::new(catalog),
        Arc::new(provider),
        store.prices.clone(),
        ProgressTracker::new(store.run_status.clone()),
    )
    .with_batch_size(config.batch_size);
    Ok(service)
}

/// Read-only handle on the status row. Never migrates and starts no writer.
pub fn open_status_view(config: &Config) -> anyhow::Result<Arc<RunStatusView>> {
    if let Some(dir) = Path::new(&config.db_path).parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            bail!("Database directory {} does not exist", dir.display());
        }
    }
    let pool = db::create_read_only_pool(&config.db_path)?;
    tracing::debug!("Observing run status in {}", config.db_path);
    Ok(Arc::new(RunStatusView::new(pool)))
}

pub fn build_status_observer(config: &Config, reader: Arc<dyn RunStatusReader>) -> StatusObserver {
    StatusObserver::new(reader).with_interval(config.status_interval)
}

/// Prints each report on its own line to stdout.
pub struct StdoutReporter;

impl StatusReporter for StdoutReporter {
    fn report(&self, report: &StatusReport) {
        println!("{}", report);
    }
}
