//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use legwatch_core::{
  record::{Language, NewHansardRecord},
  store::{RecordStore, UidLookup},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn full_record(uid: &str, title: &str) -> NewHansardRecord {
  NewHansardRecord {
    uid: uid.into(),
    title: title.into(),
    raw_date: Some("20150325".into()),
    language: Language::En,
    url: Some("http://library.example/doc.docx".into()),
    local_filename: Some("full/doc.docx".into()),
    crawled_from: Some("http://library.example/search".into()),
    last_parsed: Some(Utc.with_ymd_and_hms(2015, 3, 26, 4, 0, 0).unwrap()),
    last_crawled: Some(Utc.with_ymd_and_hms(2015, 3, 26, 3, 0, 0).unwrap()),
    created_by_parts: false,
    merged_parts: Vec::new(),
  }
}

// ─── Insert / find ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_find_by_title() {
  let s = store().await;

  let inserted = s
    .insert(full_record("council_hansard-20150325-e", "H20150325"))
    .await
    .unwrap();

  let fetched = s.find_by_title("H20150325").await.unwrap().unwrap();
  assert_eq!(fetched.record_id, inserted.record_id);
  assert_eq!(fetched.uid, "council_hansard-20150325-e");
  assert_eq!(fetched.raw_date.as_deref(), Some("20150325"));
  assert_eq!(fetched.language, Language::En);
  assert_eq!(fetched.url.as_deref(), Some("http://library.example/doc.docx"));
  assert_eq!(fetched.local_filename.as_deref(), Some("full/doc.docx"));
  assert_eq!(fetched.last_parsed, inserted.last_parsed);
  assert_eq!(fetched.last_crawled, inserted.last_crawled);
  assert!(!fetched.created_by_parts);
}

#[tokio::test]
async fn find_by_title_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_title("nothing here").await.unwrap().is_none());
}

#[tokio::test]
async fn minimal_record_roundtrips_with_empty_optionals() {
  let s = store().await;
  s.insert(NewHansardRecord::new("council_hansard-20150325-b", "H floor"))
    .await
    .unwrap();

  let fetched = s.find_by_title("H floor").await.unwrap().unwrap();
  assert_eq!(fetched.language, Language::Both);
  assert!(fetched.raw_date.is_none());
  assert!(fetched.url.is_none());
  assert!(fetched.local_filename.is_none());
  assert!(fetched.last_parsed.is_none());
  assert!(fetched.merged_parts.is_empty());
}

// ─── Uid lookups ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_by_uid_distinguishes_cardinality() {
  let s = store().await;

  assert!(matches!(
    s.find_by_uid("council_hansard-20150325-e").await.unwrap(),
    UidLookup::NotFound
  ));

  s.insert(full_record("council_hansard-20150325-e", "whole"))
    .await
    .unwrap();
  assert!(matches!(
    s.find_by_uid("council_hansard-20150325-e").await.unwrap(),
    UidLookup::Found(_)
  ));

  // The 2012-06-14 anomaly shape: two records under one normal uid.
  s.insert(full_record("council_hansard-20150325-e", "whole again"))
    .await
    .unwrap();
  match s.find_by_uid("council_hansard-20150325-e").await.unwrap() {
    UidLookup::Ambiguous(records) => assert_eq!(records.len(), 2),
    other => panic!("expected Ambiguous, got {other:?}"),
  }
}

#[tokio::test]
async fn find_parts_orders_by_title() {
  let s = store().await;
  let uid = "council_hansard-20150325p-b";

  // Inserted out of order on purpose.
  s.insert(full_record(uid, "H20150325 Part 2 (Floor Version)"))
    .await
    .unwrap();
  s.insert(full_record(uid, "H20150325 Part 1 (Floor Version)"))
    .await
    .unwrap();

  let parts = s.find_parts(uid).await.unwrap();
  let titles: Vec<&str> = parts.iter().map(|r| r.title.as_str()).collect();
  assert_eq!(
    titles,
    ["H20150325 Part 1 (Floor Version)", "H20150325 Part 2 (Floor Version)"]
  );
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_persists_every_field() {
  let s = store().await;
  let mut record = s
    .insert(NewHansardRecord::new("council_hansard-20150325-e", "H"))
    .await
    .unwrap();

  record.raw_date = Some("20150325".into());
  record.language = Language::Cn;
  record.url = None;
  record.local_filename = Some("full/merged-merge".into());
  record.last_parsed = Some(Utc.with_ymd_and_hms(2015, 4, 1, 0, 0, 0).unwrap());
  record.created_by_parts = true;
  record.merged_parts = vec!["full/p1.docx".into(), "full/p2.docx".into()];
  s.update(&record).await.unwrap();

  let fetched = s.find_by_title("H").await.unwrap().unwrap();
  assert_eq!(fetched.language, Language::Cn);
  assert_eq!(fetched.local_filename.as_deref(), Some("full/merged-merge"));
  assert_eq!(fetched.last_parsed, record.last_parsed);
  assert!(fetched.created_by_parts);
  assert_eq!(fetched.merged_parts, ["full/p1.docx", "full/p2.docx"]);
}

#[tokio::test]
async fn update_unknown_record_errors() {
  let s = store().await;
  let mut record = s
    .insert(NewHansardRecord::new("uid", "title"))
    .await
    .unwrap();
  record.record_id = uuid::Uuid::new_v4();

  let err = s.update(&record).await.unwrap_err();
  assert!(matches!(err, crate::Error::RecordNotFound(_)));
}

// ─── Duplicate uids ──────────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_uids_reports_only_colliding_groups() {
  let s = store().await;

  s.insert(full_record("council_hansard-20150325p-b", "part 1"))
    .await
    .unwrap();
  s.insert(full_record("council_hansard-20150325p-b", "part 2"))
    .await
    .unwrap();
  s.insert(full_record("council_hansard-20150401-e", "whole"))
    .await
    .unwrap();

  let dups = s.duplicate_uids().await.unwrap();
  assert_eq!(dups, ["council_hansard-20150325p-b"]);
}

#[tokio::test]
async fn all_returns_every_record() {
  let s = store().await;
  s.insert(full_record("a", "t1")).await.unwrap();
  s.insert(full_record("b", "t2")).await.unwrap();
  s.insert(full_record("c", "t3")).await.unwrap();

  assert_eq!(s.all().await.unwrap().len(), 3);
}
