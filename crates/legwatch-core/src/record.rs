//! Hansard record types and uid derivation.
//!
//! A hansard (the official transcript of a council meeting) is scraped as
//! one physical file per language variant. Oversized meetings are delivered
//! split into several "part" files; those parts deliberately share one uid
//! so the merge pass can find them again.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

// ─── Language ────────────────────────────────────────────────────────────────

/// The language variant of a scraped hansard file.
///
/// `Both` is the bilingual as-spoken "floor" transcript, as opposed to the
/// separately translated English/Chinese formal records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  En,
  Cn,
  Both,
}

impl Language {
  /// Single-character code used inside hansard uids.
  pub fn code(self) -> char {
    match self {
      Self::En => 'e',
      Self::Cn => 'c',
      Self::Both => 'b',
    }
  }

  /// The string stored in the `language` database column.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::En => "en",
      Self::Cn => "cn",
      Self::Both => "both",
    }
  }

  pub fn from_str(s: &str) -> Result<Self, Error> {
    match s {
      "en" => Ok(Self::En),
      "cn" => Ok(Self::Cn),
      "both" => Ok(Self::Both),
      other => Err(Error::UnknownLanguageCode(other.to_string())),
    }
  }
}

// ─── Uid derivation ──────────────────────────────────────────────────────────

/// A part file's link label runs long ("H20150325 Part 1 (Floor Version)"),
/// while a whole document's stays short ("H20150325 (Floor Version)").
/// Chinese labels pack the same information into fewer characters.
const TITLE_LEN_MAX_CN: usize = 16;
const TITLE_LEN_MAX: usize = 28;

/// Derive the uid for a scraped hansard file:
/// `council_hansard-<date:YYYYMMDD>[p]-<lang>`, where `p` marks a file that
/// is one part of a split document.
///
/// Parts of the same document intentionally collide on this key; the raw
/// link label (`title`) is the per-file uniqueness key instead. Returns
/// `None` when no date could be derived from the item.
pub fn hansard_uid(title: &str, date: &str, lang: Language) -> Option<String> {
  if date.is_empty() {
    return None;
  }
  let max = if lang == Language::Cn {
    TITLE_LEN_MAX_CN
  } else {
    TITLE_LEN_MAX
  };
  if title.trim().chars().count() > max {
    Some(format!("council_hansard-{date}p-{}", lang.code()))
  } else {
    Some(format!("council_hansard-{date}-{}", lang.code()))
  }
}

/// Strip the part marker from a uid, yielding the uid the merged canonical
/// record lives under. No-op for uids that carry no marker.
pub fn normal_uid(uid: &str) -> String {
  uid.replace('p', "")
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A scraped hansard file (or a canonical record synthesized from parts).
///
/// Keyed by `record_id` in storage; `uid` is intentionally non-unique across
/// parts and `title` is the true per-file uniqueness key during upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HansardRecord {
  pub record_id:        Uuid,
  pub uid:              String,
  pub title:            String,
  /// Meeting date as YYYYMMDD, as derived from the scraped long title.
  pub raw_date:         Option<String>,
  pub language:         Language,
  pub url:              Option<String>,
  /// Path of the downloaded file, relative to the storage root.
  pub local_filename:   Option<String>,
  pub crawled_from:     Option<String>,
  pub last_parsed:      Option<DateTime<Utc>>,
  pub last_crawled:     Option<DateTime<Utc>>,
  /// True on records the merge pass synthesized from part files.
  pub created_by_parts: bool,
  /// Relative paths of the part files folded into this record, in merge
  /// order. Empty unless `created_by_parts`; a part scraped later changes
  /// this set and forces a re-merge.
  pub merged_parts:     Vec<String>,
}

/// Input to [`crate::store::RecordStore::insert`].
/// `record_id` is always assigned by the store; it is not accepted from
/// callers.
#[derive(Debug, Clone)]
pub struct NewHansardRecord {
  pub uid:              String,
  pub title:            String,
  pub raw_date:         Option<String>,
  pub language:         Language,
  pub url:              Option<String>,
  pub local_filename:   Option<String>,
  pub crawled_from:     Option<String>,
  pub last_parsed:      Option<DateTime<Utc>>,
  pub last_crawled:     Option<DateTime<Utc>>,
  pub created_by_parts: bool,
  pub merged_parts:     Vec<String>,
}

impl NewHansardRecord {
  /// Convenience constructor with all optional fields left empty.
  pub fn new(uid: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      uid: uid.into(),
      title: title.into(),
      raw_date: None,
      language: Language::Both,
      url: None,
      local_filename: None,
      crawled_from: None,
      last_parsed: None,
      last_crawled: None,
      created_by_parts: false,
      merged_parts: Vec::new(),
    }
  }
}
