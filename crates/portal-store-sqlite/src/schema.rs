//! SQL schema for the portal's SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The four tables share `applicant_id`. `personal_info` is the parent row;
/// the other three reference it.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS personal_info (
    applicant_id   TEXT PRIMARY KEY,
    first_name     TEXT NOT NULL COLLATE NOCASE,
    middle_name    TEXT,
    last_name      TEXT NOT NULL COLLATE NOCASE,
    birthdate      TEXT NOT NULL,   -- YYYY-MM-DD
    sex            TEXT NOT NULL,   -- 'Male' | 'Female'
    registered_at  TEXT NOT NULL,   -- RFC 3339 UTC; store-assigned
    UNIQUE (first_name, last_name, birthdate)
);

CREATE TABLE IF NOT EXISTS admission_info (
    applicant_id        TEXT PRIMARY KEY REFERENCES personal_info(applicant_id),
    program_to_enroll   TEXT NOT NULL,
    educational_status  TEXT NOT NULL   -- 'New Student' | 'Transferee'
);

CREATE TABLE IF NOT EXISTS contact_info (
    applicant_id       TEXT PRIMARY KEY REFERENCES personal_info(applicant_id),
    current_address    TEXT NOT NULL,
    permanent_address  TEXT,
    mobile_number      TEXT NOT NULL,
    landline_number    TEXT
);

CREATE TABLE IF NOT EXISTS account_info (
    applicant_id   TEXT PRIMARY KEY REFERENCES personal_info(applicant_id),
    email          TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
