//! [`HansardReconciler`] — upserts scraped hansard files and merges split
//! documents.
//!
//! A run has two strictly ordered passes. The ingestion pass upserts one
//! record per scraped file, keyed by the raw link label (the `title`),
//! while deriving the deliberately part-ambiguous `uid`. The merge pass
//! then reasons over the whole accumulated store: every uid held by more
//! than one record is a split document whose parts get merged into one
//! canonical record.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use legwatch_core::{
  record::{HansardRecord, Language, NewHansardRecord, hansard_uid, normal_uid},
  report::RunReport,
  store::{RecordStore, UidLookup},
};

use crate::{
  error::{Error, Result},
  item::{HansardItem, ScrapedItem},
  merge::DocumentMerger,
};

// ─── Label classification ────────────────────────────────────────────────────

enum LabelKind {
  Lang(Language),
  /// Scanned page images of ancient hansards; not tracked at all.
  Image,
  Unknown,
}

fn classify_label(label: &str) -> LabelKind {
  if label.contains("English") {
    LabelKind::Lang(Language::En)
  } else if label.contains("中文") {
    LabelKind::Lang(Language::Cn)
  } else if label.contains("Floor") {
    LabelKind::Lang(Language::Both)
  } else if label.contains("Image") {
    LabelKind::Image
  } else {
    LabelKind::Unknown
  }
}

// ─── Reconciler ──────────────────────────────────────────────────────────────

/// Reconciles a scraped item stream into a [`RecordStore`].
///
/// Single-run batch model: `process` must complete before `merge_parts`
/// runs, and a run owns the store exclusively. Use [`Self::run`] for the
/// full two-pass sequence.
pub struct HansardReconciler<S, M> {
  store:        S,
  merger:       M,
  /// Directory the `local_filename` columns are relative to.
  storage_root: PathBuf,
  /// Completion time of the crawl job that produced the stream, if known.
  crawled_at:   Option<DateTime<Utc>>,
}

impl<S: RecordStore, M: DocumentMerger> HansardReconciler<S, M> {
  pub fn new(store: S, merger: M, storage_root: impl Into<PathBuf>) -> Self {
    Self {
      store,
      merger,
      storage_root: storage_root.into(),
      crawled_at: None,
    }
  }

  pub fn with_crawled_at(mut self, at: DateTime<Utc>) -> Self {
    self.crawled_at = Some(at);
    self
  }

  /// Full run: ingestion pass, then part merging over the whole store.
  pub async fn run(
    &self,
    items: impl IntoIterator<Item = ScrapedItem>,
  ) -> Result<RunReport> {
    let mut report = self.process(items).await?;
    report.merged = self.merge_parts().await?;
    info!(
      created = report.created,
      updated = report.updated,
      warnings = report.warnings,
      merged = report.merged,
      "reconciliation run complete"
    );
    Ok(report)
  }

  // ── Ingestion pass ──────────────────────────────────────────────────────

  /// Upsert every hansard item in the stream. Non-hansard items are
  /// skipped silently; per-link anomalies count as warnings but never
  /// abort the run.
  pub async fn process(
    &self,
    items: impl IntoIterator<Item = ScrapedItem>,
  ) -> Result<RunReport> {
    let mut report = RunReport::default();
    let mut seen = 0u32;
    for item in items {
      seen += 1;
      if let ScrapedItem::LibraryHansard(item) = item {
        self.process_hansard_item(&item, &mut report).await?;
      }
    }
    info!(items = seen, "ingestion pass complete");
    Ok(report)
  }

  /// One item usually carries a floor record plus EN/CN formal records,
  /// but ancient hansards may have a single English version (or only page
  /// images). The first Chinese hansard appears on 1985.10.30; floor
  /// versions exist since 1995.10.12.
  async fn process_hansard_item(
    &self,
    item: &HansardItem,
    report: &mut RunReport,
  ) -> Result<()> {
    // The date is the same for every file of the item.
    let date_str = item.date_str();

    for link in &item.links {
      let language = match classify_label(&link.label) {
        LabelKind::Lang(language) => language,
        LabelKind::Image => continue,
        LabelKind::Unknown => {
          // Assume a new floor-version labelling; log just in case.
          warn!(label = %link.label, "unrecognised link type, assuming floor record");
          report.warnings += 1;
          Language::Both
        }
      };

      // The label doubles as the record title, e.g.
      // "H20150325 (Floor Version)". Mind the potential "Part n" inside.
      let title = link.label.clone();

      let Some(uid) = hansard_uid(&title, &date_str, language) else {
        warn!(title = %title.trim(), "cannot generate uid for item");
        report.warnings += 1;
        continue;
      };

      let local_filename = item.local_path_for(&link.url);
      if local_filename.is_none() {
        // Downloads fail now and then; keep the record, note the gap.
        warn!(%title, url = %link.url, "no local file for link");
        report.warnings += 1;
      }

      // Parts of a hansard share a uid, so the title is the upsert key;
      // the merge pass will fold the parts into one record later.
      match self
        .store
        .find_by_title(&title)
        .await
        .map_err(Error::store)?
      {
        Some(mut record) => {
          report.updated += 1;
          // We do not at the moment deal with floor recordings: records
          // classified Both keep whatever fields they already have.
          if language != Language::Both {
            record.title = title;
            record.raw_date = Some(date_str.clone());
            record.language = language;
            record.url = Some(link.url.clone());
            record.local_filename = local_filename.map(str::to_owned);
            record.crawled_from = Some(item.source_url.clone());
            record.last_parsed = Some(Utc::now());
            record.last_crawled = self.crawled_at;
            self.store.update(&record).await.map_err(Error::store)?;
          }
        }
        None => {
          report.created += 1;
          self
            .store
            .insert(NewHansardRecord {
              uid,
              title,
              raw_date: Some(date_str.clone()),
              language,
              url: Some(link.url.clone()),
              local_filename: local_filename.map(str::to_owned),
              crawled_from: Some(item.source_url.clone()),
              last_parsed: Some(Utc::now()),
              last_crawled: self.crawled_at,
              created_by_parts: false,
              merged_parts: Vec::new(),
            })
            .await
            .map_err(Error::store)?;
        }
      }
    }

    Ok(())
  }

  // ── Merge pass ──────────────────────────────────────────────────────────

  /// Merge every group of records sharing a uid into one canonical record,
  /// and return the number of groups merged. Safe to re-run: an already
  /// merged, unchanged group is skipped without re-invoking the merger.
  pub async fn merge_parts(&self) -> Result<u32> {
    let mut merged = 0;

    for uid in self.store.duplicate_uids().await.map_err(Error::store)? {
      // Sometimes the parts are just appendices to an already-whole
      // document; then a record exists under the normal uid (no 'p') and
      // was not itself created by merging.
      let normal = normal_uid(&uid);
      let existing =
        match self.store.find_by_uid(&normal).await.map_err(Error::store)? {
          UidLookup::Found(record) => {
            if !record.created_by_parts {
              continue;
            }
            Some(record)
          }
          UidLookup::Ambiguous(_) => {
            // A very special case on 2012.06.14.
            warn!(uid = %normal, "ambiguous normal uid, skipping merge group");
            continue;
          }
          UidLookup::NotFound => None,
        };

      let parts = self.store.find_parts(&uid).await.map_err(Error::store)?;
      let Some(first) = parts.first() else { continue };

      let mut paths = Vec::with_capacity(parts.len());
      let mut part_files = Vec::with_capacity(parts.len());
      for part in &parts {
        match &part.local_filename {
          Some(rel) => {
            paths.push(self.storage_root.join(rel));
            part_files.push(rel.clone());
          }
          None => {
            warn!(title = %part.title, "part has no local file, skipping merge group");
            break;
          }
        }
      }
      if paths.len() != parts.len() {
        continue;
      }

      // Output lands next to the first part, named after the part uid.
      let merge_name = format!("{}-merge", first.uid);
      let out_path = match paths[0].parent() {
        Some(dir) => dir.join(&merge_name),
        None => PathBuf::from(&merge_name),
      };
      let local_filepath = trailing_components(&out_path, 2);

      // Merger output is deterministic, so a canonical record built from
      // exactly this file set is already up to date. The output path alone
      // is not enough: it depends only on the part uid, and a part scraped
      // on a later run would leave it unchanged.
      if let Some(record) = &existing
        && record.local_filename.as_deref() == Some(local_filepath.as_str())
        && record.merged_parts == part_files
      {
        continue;
      }

      info!(uid = %normal, "merging hansard parts");
      if self.merger.merge(&paths, &out_path).is_none() {
        // Without usable HTML the hansard cannot be parsed anyway; leave
        // the parts exactly as they are and try again next run.
        error!(uid = %normal, "document conversion failed for hansard parts");
        continue;
      }

      let date = first.raw_date.clone().unwrap_or_default();
      let title = if first.language == Language::Cn {
        format!("H{date} (中文版)MERGE")
      } else {
        format!("H{date} (English Version)MERGE")
      };

      match existing {
        Some(mut record) => {
          record.title = title;
          record.raw_date = first.raw_date.clone();
          record.language = first.language;
          // A merged record has no single source; clear the provenance.
          record.url = None;
          record.crawled_from = None;
          record.local_filename = Some(local_filepath);
          record.last_parsed = Some(Utc::now());
          record.created_by_parts = true;
          record.merged_parts = part_files;
          self.store.update(&record).await.map_err(Error::store)?;
        }
        None => {
          self
            .store
            .insert(NewHansardRecord {
              uid: normal,
              title,
              raw_date: first.raw_date.clone(),
              language: first.language,
              url: None,
              local_filename: Some(local_filepath),
              crawled_from: None,
              last_parsed: Some(Utc::now()),
              last_crawled: None,
              created_by_parts: true,
              merged_parts: part_files,
            })
            .await
            .map_err(Error::store)?;
        }
      }

      merged += 1;
    }

    Ok(merged)
  }
}

/// The last `n` components of `path`, joined with `/` — the same relative
/// form the spiders use for `local_filename`.
fn trailing_components(path: &Path, n: usize) -> String {
  let components: Vec<String> = path
    .components()
    .map(|c| c.as_os_str().to_string_lossy().into_owned())
    .collect();
  let start = components.len().saturating_sub(n);
  components[start..].join("/")
}
