//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, dates are `YYYY-MM-DD`, UUIDs are
//! hyphenated lowercase, and enumerations use their display names.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use portal_core::{
  applicant::{
    AccountRecord, AdmissionInfo, Applicant, ContactInfo, EducationalStatus, PersonalInfo,
    Program, Sex,
  },
  credential::HashedPassword,
  email::Email,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("registered_at {s:?}: {e}")))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("birthdate {s:?}: {e}")))
}

/// Decode any strum-backed enumeration from its display name.
fn decode_enum<T: FromStr>(column: &str, s: &str) -> Result<T> {
  T::from_str(s).map_err(|_| Error::Decode(format!("unknown {column}: {s:?}")))
}

fn decode_email(s: &str) -> Result<Email> {
  Email::parse(s).map_err(|_| Error::Decode(format!("stored email is not valid: {s:?}")))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// One applicant's columns as read from the four-way join, before decoding.
pub struct RawApplicant {
  pub applicant_id:       String,
  pub registered_at:      String,
  pub first_name:         String,
  pub middle_name:        Option<String>,
  pub last_name:          String,
  pub birthdate:          String,
  pub sex:                String,
  pub program_to_enroll:  String,
  pub educational_status: String,
  pub current_address:    String,
  pub permanent_address:  Option<String>,
  pub mobile_number:      String,
  pub landline_number:    Option<String>,
  pub email:              String,
}

impl RawApplicant {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      applicant_id:       row.get(0)?,
      registered_at:      row.get(1)?,
      first_name:         row.get(2)?,
      middle_name:        row.get(3)?,
      last_name:          row.get(4)?,
      birthdate:          row.get(5)?,
      sex:                row.get(6)?,
      program_to_enroll:  row.get(7)?,
      educational_status: row.get(8)?,
      current_address:    row.get(9)?,
      permanent_address:  row.get(10)?,
      mobile_number:      row.get(11)?,
      landline_number:    row.get(12)?,
      email:              row.get(13)?,
    })
  }

  pub fn into_applicant(self) -> Result<Applicant> {
    Ok(Applicant {
      applicant_id:  decode_uuid(&self.applicant_id)?,
      registered_at: decode_dt(&self.registered_at)?,
      personal:      PersonalInfo {
        first_name:  self.first_name,
        middle_name: self.middle_name,
        last_name:   self.last_name,
        birthdate:   decode_date(&self.birthdate)?,
        sex:         decode_enum::<Sex>("sex", &self.sex)?,
      },
      admission:     AdmissionInfo {
        program_to_enroll:  decode_enum::<Program>("program", &self.program_to_enroll)?,
        educational_status: decode_enum::<EducationalStatus>(
          "educational status",
          &self.educational_status,
        )?,
      },
      contact:       ContactInfo {
        current_address:   self.current_address,
        permanent_address: self.permanent_address,
        mobile_number:     self.mobile_number,
        landline_number:   self.landline_number,
      },
      email:         decode_email(&self.email)?,
    })
  }
}

/// Column list matching [`RawApplicant::from_row`].
pub const APPLICANT_COLUMNS: &str = "
  p.applicant_id, p.registered_at, p.first_name, p.middle_name, p.last_name,
  p.birthdate, p.sex, ad.program_to_enroll, ad.educational_status,
  c.current_address, c.permanent_address, c.mobile_number, c.landline_number,
  ac.email
";

pub struct RawAccount {
  pub applicant_id:  String,
  pub email:         String,
  pub password_hash: String,
}

impl RawAccount {
  pub fn into_record(self) -> Result<AccountRecord> {
    Ok(AccountRecord {
      applicant_id:  decode_uuid(&self.applicant_id)?,
      email:         decode_email(&self.email)?,
      password_hash: HashedPassword::from_stored(self.password_hash),
    })
  }
}
