//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use legwatch_core::{
  record::{HansardRecord, NewHansardRecord},
  store::{RecordStore, UidLookup},
};

use crate::{
  Error, Result,
  encode::{RawRecord, encode_dt, encode_language, encode_parts, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A legwatch record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Fetch decoded records for an arbitrary single-parameter query.
  async fn select_records(
    &self,
    sql: &'static str,
    param: Option<String>,
  ) -> Result<Vec<HansardRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let rows = match param {
          Some(p) => stmt
            .query_map(rusqlite::params![p], RawRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
          None => stmt
            .query_map([], RawRecord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn find_by_title(&self, title: &str) -> Result<Option<HansardRecord>> {
    let title = title.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT record_id, uid, title, raw_date, language, url, \
               local_filename, crawled_from, last_parsed, last_crawled, \
               created_by_parts, merged_parts FROM hansard_records WHERE title = ?1",
              rusqlite::params![title],
              RawRecord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn find_by_uid(&self, uid: &str) -> Result<UidLookup> {
    let mut matches = self
      .select_records(
        "SELECT record_id, uid, title, raw_date, language, url, \
         local_filename, crawled_from, last_parsed, last_crawled, \
         created_by_parts, merged_parts FROM hansard_records WHERE uid = ?1 \
         ORDER BY title",
        Some(uid.to_owned()),
      )
      .await?;

    Ok(match matches.len() {
      0 => UidLookup::NotFound,
      1 => UidLookup::Found(matches.remove(0)),
      _ => UidLookup::Ambiguous(matches),
    })
  }

  async fn find_parts(&self, uid: &str) -> Result<Vec<HansardRecord>> {
    // Title is the only real discriminator inside a uid group; ordering by
    // it puts "Part 1" before "Part 2".
    self
      .select_records(
        "SELECT record_id, uid, title, raw_date, language, url, \
         local_filename, crawled_from, last_parsed, last_crawled, \
         created_by_parts, merged_parts FROM hansard_records WHERE uid = ?1 \
         ORDER BY uid, title",
        Some(uid.to_owned()),
      )
      .await
  }

  async fn insert(&self, record: NewHansardRecord) -> Result<HansardRecord> {
    let record = HansardRecord {
      record_id:        Uuid::new_v4(),
      uid:              record.uid,
      title:            record.title,
      raw_date:         record.raw_date,
      language:         record.language,
      url:              record.url,
      local_filename:   record.local_filename,
      crawled_from:     record.crawled_from,
      last_parsed:      record.last_parsed,
      last_crawled:     record.last_crawled,
      created_by_parts: record.created_by_parts,
      merged_parts:     record.merged_parts,
    };

    let id_str        = encode_uuid(record.record_id);
    let uid           = record.uid.clone();
    let title         = record.title.clone();
    let raw_date      = record.raw_date.clone();
    let language      = encode_language(record.language).to_owned();
    let url           = record.url.clone();
    let local         = record.local_filename.clone();
    let crawled_from  = record.crawled_from.clone();
    let last_parsed   = record.last_parsed.map(encode_dt);
    let last_crawled  = record.last_crawled.map(encode_dt);
    let by_parts      = record.created_by_parts;
    let merged        = encode_parts(&record.merged_parts);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO hansard_records (
             record_id, uid, title, raw_date, language, url,
             local_filename, crawled_from, last_parsed, last_crawled,
             created_by_parts, merged_parts
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
          rusqlite::params![
            id_str,
            uid,
            title,
            raw_date,
            language,
            url,
            local,
            crawled_from,
            last_parsed,
            last_crawled,
            by_parts,
            merged,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn update(&self, record: &HansardRecord) -> Result<()> {
    let id_str        = encode_uuid(record.record_id);
    let uid           = record.uid.clone();
    let title         = record.title.clone();
    let raw_date      = record.raw_date.clone();
    let language      = encode_language(record.language).to_owned();
    let url           = record.url.clone();
    let local         = record.local_filename.clone();
    let crawled_from  = record.crawled_from.clone();
    let last_parsed   = record.last_parsed.map(encode_dt);
    let last_crawled  = record.last_crawled.map(encode_dt);
    let by_parts      = record.created_by_parts;
    let merged        = encode_parts(&record.merged_parts);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE hansard_records SET
             uid = ?2, title = ?3, raw_date = ?4, language = ?5, url = ?6,
             local_filename = ?7, crawled_from = ?8, last_parsed = ?9,
             last_crawled = ?10, created_by_parts = ?11, merged_parts = ?12
           WHERE record_id = ?1",
          rusqlite::params![
            id_str,
            uid,
            title,
            raw_date,
            language,
            url,
            local,
            crawled_from,
            last_parsed,
            last_crawled,
            by_parts,
            merged,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::RecordNotFound(record.record_id));
    }
    Ok(())
  }

  async fn all(&self) -> Result<Vec<HansardRecord>> {
    self
      .select_records(
        "SELECT record_id, uid, title, raw_date, language, url, \
         local_filename, crawled_from, last_parsed, last_crawled, \
         created_by_parts, merged_parts FROM hansard_records ORDER BY uid, title",
        None,
      )
      .await
  }

  async fn duplicate_uids(&self) -> Result<Vec<String>> {
    let uids: Vec<String> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT uid FROM hansard_records \
           GROUP BY uid HAVING COUNT(*) > 1 ORDER BY uid",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(uids)
  }
}
