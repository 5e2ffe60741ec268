//! `seed` binary: load a CSV of guest bookings into the SQLite store.

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context as _;
use clap::Parser;
use lateshow_store_sqlite::SqliteStore;
use rand_core::OsRng;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Seed the Late Show store from a CSV file")]
struct Cli {
  /// Path to the SQLite store.
  #[arg(short, long, default_value = "lateshow.db")]
  store: PathBuf,

  /// CSV file to load.
  #[arg(long, default_value = "seed.csv")]
  csv: PathBuf,

  /// Keep existing episodes, guests and appearances instead of clearing them.
  #[arg(long)]
  keep_existing: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let store = SqliteStore::open(&cli.store)
    .await
    .with_context(|| format!("failed to open store at {:?}", cli.store))?;

  let file = File::open(&cli.csv)
    .with_context(|| format!("failed to open {:?}", cli.csv))?;

  tracing::info!(csv = ?cli.csv, "seeding episodes and guests");
  let report = lateshow_seed::seed(
    &store,
    BufReader::new(file),
    &mut OsRng,
    !cli.keep_existing,
  )
  .await
  .context("seeding failed")?;

  tracing::info!(
    "Seeding complete. Added {} episodes, {} guests, and {} appearances ({} rows skipped).",
    report.episodes,
    report.guests,
    report.appearances,
    report.skipped,
  );
  Ok(())
}
