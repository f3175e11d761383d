//! Applicant records: the four rows written by one registration, and the read
//! model assembled from them.
//!
//! All four rows share one `applicant_id`; the applicant is reassembled on read
//! by joining on it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::{credential::HashedPassword, email::Email};

// ─── Enumerations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Sex {
  Male,
  Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum EducationalStatus {
  #[serde(rename = "New Student")]
  #[strum(serialize = "New Student")]
  NewStudent,
  Transferee,
}

/// Degree programs open for enrolment.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum Program {
  #[serde(rename = "BS Computer Science")]
  #[strum(serialize = "BS Computer Science")]
  ComputerScience,
  #[serde(rename = "BS Information Technology")]
  #[strum(serialize = "BS Information Technology")]
  InformationTechnology,
  #[serde(rename = "BS Information Systems")]
  #[strum(serialize = "BS Information Systems")]
  InformationSystems,
  #[serde(rename = "BS Computer Engineering")]
  #[strum(serialize = "BS Computer Engineering")]
  ComputerEngineering,
  #[serde(rename = "BS Business Administration")]
  #[strum(serialize = "BS Business Administration")]
  BusinessAdministration,
  #[serde(rename = "BS Accountancy")]
  #[strum(serialize = "BS Accountancy")]
  Accountancy,
  #[serde(rename = "BS Education")]
  #[strum(serialize = "BS Education")]
  Education,
  #[serde(rename = "BS Nursing")]
  #[strum(serialize = "BS Nursing")]
  Nursing,
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
  pub first_name:  String,
  pub middle_name: Option<String>,
  pub last_name:   String,
  pub birthdate:   NaiveDate,
  pub sex:         Sex,
}

impl PersonalInfo {
  pub fn identity(&self) -> Identity {
    Identity {
      first_name: self.first_name.clone(),
      last_name:  self.last_name.clone(),
      birthdate:  self.birthdate,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionInfo {
  pub program_to_enroll:  Program,
  pub educational_status: EducationalStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
  pub current_address:   String,
  pub permanent_address: Option<String>,
  pub mobile_number:     String,
  pub landline_number:   Option<String>,
}

/// The key used to decide that two registrations describe the same person.
///
/// This is a heuristic: distinct people sharing a name and birthdate (twins
/// with the same given name, for instance) collide on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
  pub first_name: String,
  pub last_name:  String,
  pub birthdate:  NaiveDate,
}

#[derive(Debug, Clone)]
pub struct AccountInfo {
  pub email:         Email,
  pub password_hash: HashedPassword,
}

// ─── Write / read models ─────────────────────────────────────────────────────

/// Everything one registration writes, ready for a single transaction.
#[derive(Debug, Clone)]
pub struct NewRegistration {
  pub personal:  PersonalInfo,
  pub admission: AdmissionInfo,
  pub contact:   ContactInfo,
  pub account:   AccountInfo,
}

/// A registered applicant as reassembled from its four rows.
///
/// The password hash is deliberately absent; use
/// [`RegistrationStore::find_account`](crate::store::RegistrationStore::find_account)
/// when credentials are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
  pub applicant_id:  Uuid,
  pub registered_at: DateTime<Utc>,
  pub personal:      PersonalInfo,
  pub admission:     AdmissionInfo,
  pub contact:       ContactInfo,
  pub email:         Email,
}

/// The credential row for one applicant.
#[derive(Debug, Clone)]
pub struct AccountRecord {
  pub applicant_id:  Uuid,
  pub email:         Email,
  pub password_hash: HashedPassword,
}
