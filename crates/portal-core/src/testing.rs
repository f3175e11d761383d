//! In-memory store and fixtures shared by the unit tests.

use std::sync::{
  Mutex,
  atomic::{AtomicBool, AtomicUsize, Ordering},
};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::{
  applicant::{AccountInfo, AccountRecord, Applicant, Identity, NewRegistration},
  credential::{Argon2Hasher, HashedPassword, Password},
  email::Email,
  error::Conflict,
  registration::RegistrationForm,
  store::{RegistrationStore, StoreError},
};

pub fn ana_cruz() -> RegistrationForm {
  RegistrationForm {
    first_name: "Ana".into(),
    last_name: "Cruz".into(),
    birthdate: "2001-05-10".into(),
    sex: "Female".into(),
    program_to_enroll: "BS Computer Science".into(),
    educational_status: "New Student".into(),
    current_address: "123 Rizal St".into(),
    mobile_number: "09171234567".into(),
    email: "ana.cruz@example.com".into(),
    initial_password: Password::new("P@ssw0rd!"),
    confirm_password: Password::new("P@ssw0rd!"),
    ..RegistrationForm::default()
  }
}

pub fn cheap_hasher() -> Argon2Hasher { Argon2Hasher::with_cost(1024, 1, 1).unwrap() }

#[derive(Debug, Error)]
pub enum MemoryError {
  #[error("simulated datastore failure")]
  Simulated,
  #[error("unique constraint violated: {0}")]
  Unique(Conflict),
}

impl StoreError for MemoryError {
  fn conflict(&self) -> Option<Conflict> {
    match self {
      MemoryError::Unique(c) => Some(*c),
      MemoryError::Simulated => None,
    }
  }
}

struct Row {
  applicant:     Applicant,
  password_hash: HashedPassword,
}

/// Enforces the same uniqueness rules as the SQLite schema.
#[derive(Default)]
pub struct MemoryStore {
  rows:             Mutex<Vec<Row>>,
  fail_reads:       AtomicBool,
  fail_writes:      AtomicBool,
  blind_reads:      AtomicBool,
  email_queries:    AtomicUsize,
  identity_queries: AtomicUsize,
  inserts:          AtomicUsize,
}

impl MemoryStore {
  /// Insert a registration directly, bypassing counters and failure flags.
  pub fn seed(&self, form: &RegistrationForm) {
    let valid = form.validate().unwrap();
    let registration = NewRegistration {
      personal:  valid.personal,
      admission: valid.admission,
      contact:   valid.contact,
      account:   AccountInfo {
        email:         valid.email,
        password_hash: HashedPassword::from_stored("$argon2id$seeded".into()),
      },
    };
    self.write(registration).unwrap();
  }

  pub fn fail_reads(&self) { self.fail_reads.store(true, Ordering::SeqCst) }

  pub fn fail_writes(&self) { self.fail_writes.store(true, Ordering::SeqCst) }

  /// Existence checks report nothing, as if a concurrent registration had
  /// not committed yet.
  pub fn blind_reads(&self) { self.blind_reads.store(true, Ordering::SeqCst) }

  pub fn email_queries(&self) -> usize { self.email_queries.load(Ordering::SeqCst) }

  pub fn identity_queries(&self) -> usize { self.identity_queries.load(Ordering::SeqCst) }

  pub fn inserts(&self) -> usize { self.inserts.load(Ordering::SeqCst) }

  pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }

  pub fn stored_hash(&self, email: &Email) -> Option<HashedPassword> {
    self
      .rows
      .lock()
      .unwrap()
      .iter()
      .find(|r| &r.applicant.email == email)
      .map(|r| r.password_hash.clone())
  }

  fn read_guard(&self) -> Result<bool, MemoryError> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(MemoryError::Simulated);
    }
    Ok(self.blind_reads.load(Ordering::SeqCst))
  }

  fn write(&self, registration: NewRegistration) -> Result<Applicant, MemoryError> {
    let mut rows = self.rows.lock().unwrap();
    let identity = registration.personal.identity();
    if rows.iter().any(|r| r.applicant.email == registration.account.email) {
      return Err(MemoryError::Unique(Conflict::Email));
    }
    if rows.iter().any(|r| same_identity(&r.applicant.personal.identity(), &identity)) {
      return Err(MemoryError::Unique(Conflict::Identity));
    }
    let applicant = Applicant {
      applicant_id:  Uuid::new_v4(),
      registered_at: Utc::now(),
      personal:      registration.personal,
      admission:     registration.admission,
      contact:       registration.contact,
      email:         registration.account.email,
    };
    rows.push(Row {
      applicant:     applicant.clone(),
      password_hash: registration.account.password_hash,
    });
    Ok(applicant)
  }
}

fn same_identity(a: &Identity, b: &Identity) -> bool {
  a.first_name.eq_ignore_ascii_case(&b.first_name)
    && a.last_name.eq_ignore_ascii_case(&b.last_name)
    && a.birthdate == b.birthdate
}

impl RegistrationStore for MemoryStore {
  type Error = MemoryError;

  async fn email_exists(&self, email: &Email) -> Result<bool, MemoryError> {
    self.email_queries.fetch_add(1, Ordering::SeqCst);
    if self.read_guard()? {
      return Ok(false);
    }
    Ok(self.rows.lock().unwrap().iter().any(|r| &r.applicant.email == email))
  }

  async fn identity_exists(&self, identity: &Identity) -> Result<bool, MemoryError> {
    self.identity_queries.fetch_add(1, Ordering::SeqCst);
    if self.read_guard()? {
      return Ok(false);
    }
    Ok(
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .any(|r| same_identity(&r.applicant.personal.identity(), identity)),
    )
  }

  async fn insert_registration(
    &self,
    registration: NewRegistration,
  ) -> Result<Applicant, MemoryError> {
    self.inserts.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(MemoryError::Simulated);
    }
    self.write(registration)
  }

  async fn get_applicant(&self, applicant_id: Uuid) -> Result<Option<Applicant>, MemoryError> {
    Ok(
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .find(|r| r.applicant.applicant_id == applicant_id)
        .map(|r| r.applicant.clone()),
    )
  }

  async fn find_account(&self, email: &Email) -> Result<Option<AccountRecord>, MemoryError> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(MemoryError::Simulated);
    }
    Ok(
      self
        .rows
        .lock()
        .unwrap()
        .iter()
        .find(|r| &r.applicant.email == email)
        .map(|r| AccountRecord {
          applicant_id:  r.applicant.applicant_id,
          email:         r.applicant.email.clone(),
          password_hash: r.password_hash.clone(),
        }),
    )
  }
}
