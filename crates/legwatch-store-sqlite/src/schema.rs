//! SQL schema for the legwatch SQLite store.
//!
//! Applied on every connection open; `PRAGMA user_version` records the
//! schema revision so later migrations have something to gate on.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per scraped hansard file, plus records synthesized by the merge
-- pass. uid is intentionally NOT unique: parts of a split document share
-- it. title is the true per-file uniqueness key.
CREATE TABLE IF NOT EXISTS hansard_records (
    record_id        TEXT PRIMARY KEY,
    uid              TEXT NOT NULL,
    title            TEXT NOT NULL UNIQUE,
    raw_date         TEXT,              -- YYYYMMDD
    language         TEXT NOT NULL DEFAULT 'both',  -- 'en' | 'cn' | 'both'
    url              TEXT,
    local_filename   TEXT,              -- relative to the storage root
    crawled_from     TEXT,
    last_parsed      TEXT,              -- ISO 8601 UTC
    last_crawled     TEXT,              -- ISO 8601 UTC
    created_by_parts INTEGER NOT NULL DEFAULT 0,
    merged_parts     TEXT               -- newline-joined part filenames
);

CREATE INDEX IF NOT EXISTS hansard_uid_idx   ON hansard_records(uid);
CREATE INDEX IF NOT EXISTS hansard_date_idx  ON hansard_records(raw_date);

PRAGMA user_version = 1;
";
