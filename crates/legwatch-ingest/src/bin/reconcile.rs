//! Reconciliation batch binary.
//!
//! Reads `config.toml` (or the path specified with `--config`) plus a
//! scrape feed of newline-delimited JSON items, upserts the items into the
//! SQLite record store, and merges split hansards.

use std::{
  fs::File,
  io::{BufRead, BufReader},
  path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::Utc;
use clap::Parser;
use legwatch_ingest::{
  HansardReconciler, ReconcileConfig, item::ScrapedItem, merge::CommandMerger,
};
use legwatch_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Legwatch record reconciler")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Scrape feed: one JSON item per line.
  items: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LEGWATCH"))
    .build()
    .context("failed to read config file")?;

  let cfg: ReconcileConfig = settings
    .try_deserialize()
    .context("failed to deserialise ReconcileConfig")?;

  // Open SQLite store.
  let store_path = expand_tilde(&cfg.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let merger = CommandMerger::from_command(&cfg.merge_command)
    .context("merge_command must name a converter program")?;

  // Read the feed up front; a malformed line is the spider's bug, not a
  // reason to abandon the rest of the batch.
  let feed = File::open(&cli.items)
    .with_context(|| format!("failed to open feed {:?}", cli.items))?;
  let mut items = Vec::new();
  for (number, line) in BufReader::new(feed).lines().enumerate() {
    let line = line.context("failed to read feed")?;
    if line.trim().is_empty() {
      continue;
    }
    match serde_json::from_str::<ScrapedItem>(&line) {
      Ok(item) => items.push(item),
      Err(e) => {
        tracing::warn!(line = number + 1, error = %e, "skipping malformed feed line");
      }
    }
  }

  let reconciler =
    HansardReconciler::new(store, merger, expand_tilde(&cfg.storage_root))
      .with_crawled_at(Utc::now());

  reconciler.run(items).await?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
