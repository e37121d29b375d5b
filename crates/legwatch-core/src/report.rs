//! Run summary counters.

use serde::{Deserialize, Serialize};

/// Counts accumulated over one reconciliation run.
///
/// Threaded explicitly through each processing step and returned to the
/// caller; there is no ambient mutable state.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct RunReport {
  /// Records newly inserted during the ingestion pass.
  pub created:  u32,
  /// Records found by title and refreshed (or deliberately left as-is for
  /// floor recordings).
  pub updated:  u32,
  /// Non-fatal anomalies: unrecognised link labels, missing downloads,
  /// underivable uids.
  pub warnings: u32,
  /// Part groups successfully merged into a canonical record.
  pub merged:   u32,
}
