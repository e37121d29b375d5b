//! The scraped item stream.
//!
//! Spiders emit one JSON object per scraped item, discriminated by a
//! `type` field. Only hansard document items are reconciled here; result
//! pages and unknown types are skipped without so much as a warning.

use serde::Deserialize;

/// One item from the scrape feed.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum ScrapedItem {
  LibraryHansard(HansardItem),
  /// Pagination artifacts of the library search; carry no documents.
  LibraryResultPage,
  #[serde(other)]
  Other,
}

/// A scraped hansard entry: one library search result covering all
/// language variants of a single meeting's record.
#[derive(Debug, Clone, Deserialize)]
pub struct HansardItem {
  /// English long title. By library convention it ends with the meeting
  /// date, so its 11-character tail (dots removed) is YYYYMMDD.
  pub title_en:   String,
  #[serde(default)]
  pub links:      Vec<DocumentLink>,
  #[serde(default)]
  pub files:      Vec<DownloadedFile>,
  /// The page the item was scraped from.
  pub source_url: String,
}

/// A (label, url) pair on the library result page, e.g.
/// `("H20150325 (Floor Version)", …)`.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentLink {
  pub label: String,
  pub url:   String,
}

/// A file the spider actually downloaded, with its path relative to the
/// storage root.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadedFile {
  pub url:  String,
  pub path: String,
}

impl HansardItem {
  /// Meeting date as YYYYMMDD, taken from the long title's 11-character
  /// tail with the `.` separators removed. A brittle but fixed library
  /// convention; rare off-format titles simply produce no usable date.
  pub fn date_str(&self) -> String {
    let chars: Vec<char> = self.title_en.chars().collect();
    let start = chars.len().saturating_sub(11);
    chars[start..].iter().filter(|c| **c != '.').collect()
  }

  /// The local path of the download matching `url`, if the spider managed
  /// to fetch it.
  pub fn local_path_for(&self, url: &str) -> Option<&str> {
    self
      .files
      .iter()
      .find(|f| f.url == url)
      .map(|f| f.path.as_str())
  }
}
