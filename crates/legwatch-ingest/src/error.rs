//! Error type for `legwatch-ingest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A record store operation failed. Store failures are genuine errors
  /// and abort the run, unlike per-link anomalies which only count as
  /// warnings.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
