//! Error types for `legwatch-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown language code: {0:?}")]
  UnknownLanguageCode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
