//! Conversions between domain types and their TEXT column encodings.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use legwatch_core::record::{HansardRecord, Language};

use crate::{Error, Result};

pub fn encode_uuid(id: Uuid) -> String {
  id.to_string()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

pub fn encode_language(lang: Language) -> &'static str {
  lang.as_str()
}

/// Newline-joined `merged_parts` column value; `None` for an empty set.
/// Filenames are spider-generated relative paths and never contain
/// newlines.
pub fn encode_parts(parts: &[String]) -> Option<String> {
  (!parts.is_empty()).then(|| parts.join("\n"))
}

/// A `hansard_records` row as it comes off the wire, before decoding.
/// Field order matches the SELECT column lists in `store.rs`.
pub struct RawRecord {
  pub record_id:        String,
  pub uid:              String,
  pub title:            String,
  pub raw_date:         Option<String>,
  pub language:         String,
  pub url:              Option<String>,
  pub local_filename:   Option<String>,
  pub crawled_from:     Option<String>,
  pub last_parsed:      Option<String>,
  pub last_crawled:     Option<String>,
  pub created_by_parts: bool,
  pub merged_parts:     Option<String>,
}

impl RawRecord {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawRecord {
      record_id:        row.get(0)?,
      uid:              row.get(1)?,
      title:            row.get(2)?,
      raw_date:         row.get(3)?,
      language:         row.get(4)?,
      url:              row.get(5)?,
      local_filename:   row.get(6)?,
      crawled_from:     row.get(7)?,
      last_parsed:      row.get(8)?,
      last_crawled:     row.get(9)?,
      created_by_parts: row.get(10)?,
      merged_parts:     row.get(11)?,
    })
  }

  pub fn into_record(self) -> Result<HansardRecord> {
    Ok(HansardRecord {
      record_id:        Uuid::parse_str(&self.record_id)?,
      uid:              self.uid,
      title:            self.title,
      raw_date:         self.raw_date,
      language:         Language::from_str(&self.language)
        .map_err(Error::Core)?,
      url:              self.url,
      local_filename:   self.local_filename,
      crawled_from:     self.crawled_from,
      last_parsed:      self.last_parsed.as_deref().map(decode_dt).transpose()?,
      last_crawled:     self
        .last_crawled
        .as_deref()
        .map(decode_dt)
        .transpose()?,
      created_by_parts: self.created_by_parts,
      merged_parts:     self
        .merged_parts
        .map(|s| s.split('\n').map(str::to_string).collect())
        .unwrap_or_default(),
    })
  }
}
