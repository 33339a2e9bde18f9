mod analytics;
mod cli;
mod error;
mod export;
mod models;
mod money;
mod store;

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use store::{SqliteBackend, TransactionStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut store = open_store();
    cli::run(&args[1..], &mut store)
}

/// Open the on-disk store. An unusable backend degrades to the
/// unavailable store (empty reads, no-op writes) instead of aborting.
fn open_store() -> TransactionStore<SqliteBackend> {
    let backend = store_path().and_then(|path| SqliteBackend::open(&path));
    match backend {
        Ok(backend) => TransactionStore::new(backend),
        Err(e) => {
            warn!("persistence unavailable, changes will not be saved: {e:#}");
            TransactionStore::unavailable()
        }
    }
}

fn store_path() -> Result<std::path::PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "moneydiary", "MoneyDiary")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("money-diary.db"))
}
