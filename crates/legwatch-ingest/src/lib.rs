//! Reconciliation layer for legwatch.
//!
//! Consumes streams of scraped items (produced by the crawling spiders,
//! which are external to this workspace), upserts them into a
//! [`legwatch_core::store::RecordStore`], and merges hansards that were
//! delivered split into part files. Free-text member names are resolved
//! against a canonical roster via [`roster::MemberRoster`].

pub mod error;
pub mod hansard;
pub mod item;
pub mod merge;
pub mod roster;

pub use error::Error;
pub use hansard::HansardReconciler;

use std::path::PathBuf;

use serde::Deserialize;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration for the `reconcile` binary, deserialised from
/// `config.toml` (overridable via `LEGWATCH_*` environment variables).
#[derive(Deserialize, Clone)]
pub struct ReconcileConfig {
  /// SQLite database file holding the record store.
  pub store_path:    PathBuf,
  /// Directory the spiders downloaded files into; `local_filename` columns
  /// are relative to it.
  pub storage_root:  PathBuf,
  /// External document converter: program followed by fixed arguments.
  /// Part file paths and the output path are appended per invocation.
  pub merge_command: Vec<String>,
}
