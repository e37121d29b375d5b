//! The `RecordStore` trait and supporting lookup types.
//!
//! The trait is implemented by storage backends (e.g.
//! `legwatch-store-sqlite`). The reconciliation layer depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{HansardRecord, NewHansardRecord};

// ─── Lookup result ───────────────────────────────────────────────────────────

/// Outcome of a uid lookup. Uids are intentionally non-unique, so a lookup
/// can legitimately match several records; callers pattern-match instead of
/// relying on a thrown multiple-objects error.
#[derive(Debug, Clone)]
pub enum UidLookup {
  Found(HansardRecord),
  NotFound,
  Ambiguous(Vec<HansardRecord>),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a legwatch record store backend.
///
/// A single reconciliation run owns the store exclusively; concurrent runs
/// are serialized by an external scheduler. All methods return `Send`
/// futures so the trait can be used in multi-threaded async runtimes.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Find the record with exactly this scraped title, the true per-file
  /// uniqueness key. Returns `None` if not found.
  fn find_by_title(
    &self,
    title: &str,
  ) -> impl Future<Output = Result<Option<HansardRecord>, Self::Error>> + Send;

  /// Look up records by uid. Part files share a uid, so the result is an
  /// explicit [`UidLookup`] variant rather than a single record.
  fn find_by_uid(
    &self,
    uid: &str,
  ) -> impl Future<Output = Result<UidLookup, Self::Error>> + Send;

  /// Return every record sharing `uid`, ordered by (uid, title) so that
  /// "Part 1" sorts before "Part 2".
  fn find_parts(
    &self,
    uid: &str,
  ) -> impl Future<Output = Result<Vec<HansardRecord>, Self::Error>> + Send;

  /// Insert a new record and return it with its store-assigned id.
  fn insert(
    &self,
    record: NewHansardRecord,
  ) -> impl Future<Output = Result<HansardRecord, Self::Error>> + Send;

  /// Persist every field of an existing record.
  fn update(
    &self,
    record: &HansardRecord,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send;

  /// All records in the store.
  fn all(
    &self,
  ) -> impl Future<Output = Result<Vec<HansardRecord>, Self::Error>> + Send;

  /// Uids held by more than one record — the candidates for part merging.
  fn duplicate_uids(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;
}
