//! [`SqliteStore`], the SQLite implementation of [`RegistrationStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, Transaction};
use uuid::Uuid;

use portal_core::{
  Conflict,
  applicant::{AccountRecord, Applicant, Identity, NewRegistration},
  email::Email,
  store::RegistrationStore,
};

use crate::{
  Error, Result,
  encode::{APPLICANT_COLUMNS, RawAccount, RawApplicant, encode_date, encode_dt, encode_uuid},
  error::unique_violation,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An applicant store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. All calls are
/// serialised on the connection's thread, and every registration is written
/// inside its own transaction.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
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
}

/// The four inserts of one registration. Runs inside the caller's transaction.
fn write_registration(
  tx: &Transaction<'_>,
  id: &str,
  registered_at: &str,
  registration: &NewRegistration,
) -> rusqlite::Result<()> {
  let NewRegistration {
    personal,
    admission,
    contact,
    account,
  } = registration;

  tx.execute(
    "INSERT INTO personal_info (
       applicant_id, first_name, middle_name, last_name, birthdate, sex, registered_at
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    rusqlite::params![
      id,
      personal.first_name,
      personal.middle_name,
      personal.last_name,
      encode_date(personal.birthdate),
      personal.sex.to_string(),
      registered_at,
    ],
  )?;

  tx.execute(
    "INSERT INTO admission_info (applicant_id, program_to_enroll, educational_status)
     VALUES (?1, ?2, ?3)",
    rusqlite::params![
      id,
      admission.program_to_enroll.to_string(),
      admission.educational_status.to_string(),
    ],
  )?;

  tx.execute(
    "INSERT INTO contact_info (
       applicant_id, current_address, permanent_address, mobile_number, landline_number
     ) VALUES (?1, ?2, ?3, ?4, ?5)",
    rusqlite::params![
      id,
      contact.current_address,
      contact.permanent_address,
      contact.mobile_number,
      contact.landline_number,
    ],
  )?;

  tx.execute(
    "INSERT INTO account_info (applicant_id, email, password_hash) VALUES (?1, ?2, ?3)",
    rusqlite::params![id, account.email.as_str(), account.password_hash.as_str()],
  )?;

  Ok(())
}

fn email_taken(tx: &Transaction<'_>, email: &str) -> rusqlite::Result<bool> {
  let found = tx
    .query_row(
      "SELECT 1 FROM account_info WHERE email = ?1",
      rusqlite::params![email],
      |_| Ok(true),
    )
    .optional()?
    .unwrap_or(false);
  Ok(found)
}

// ─── RegistrationStore impl ──────────────────────────────────────────────────

impl RegistrationStore for SqliteStore {
  type Error = crate::Error;

  // ── Existence checks ──────────────────────────────────────────────────────

  async fn email_exists(&self, email: &Email) -> Result<bool> {
    let email = email.as_str().to_owned();
    let exists = self
      .conn
      .call(move |conn| {
        let found = conn
          .query_row(
            "SELECT 1 FROM account_info WHERE email = ?1",
            rusqlite::params![email],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(found)
      })
      .await?;
    Ok(exists)
  }

  async fn identity_exists(&self, identity: &Identity) -> Result<bool> {
    let first = identity.first_name.clone();
    let last = identity.last_name.clone();
    let birthdate = encode_date(identity.birthdate);
    let exists = self
      .conn
      .call(move |conn| {
        let found = conn
          .query_row(
            "SELECT 1 FROM personal_info
              WHERE first_name = ?1 AND last_name = ?2 AND birthdate = ?3",
            rusqlite::params![first, last, birthdate],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        Ok(found)
      })
      .await?;
    Ok(exists)
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_registration(&self, registration: NewRegistration) -> Result<Applicant> {
    let applicant_id = Uuid::new_v4();
    let registered_at = Utc::now();
    let id_str = encode_uuid(applicant_id);
    let at_str = encode_dt(registered_at);

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let failure = match write_registration(&tx, &id_str, &at_str, &registration) {
          Ok(()) => {
            tx.commit()?;
            return Ok(Ok(registration));
          }
          Err(e) => e,
        };

        // Email conflicts outrank identity conflicts, whichever constraint
        // the insert order tripped first.
        let conflict = match unique_violation(&failure) {
          Some(_) if email_taken(&tx, registration.account.email.as_str())? => {
            Some(Conflict::Email)
          }
          other => other,
        };

        if let Err(rollback) = tx.rollback() {
          tracing::error!(error = %rollback, "rollback after failed registration insert failed");
        }
        match conflict {
          Some(conflict) => Ok(Err(conflict)),
          None => Err(failure.into()),
        }
      })
      .await?;
    let registration = outcome.map_err(Error::Unique)?;

    Ok(Applicant {
      applicant_id,
      registered_at,
      personal: registration.personal,
      admission: registration.admission,
      contact: registration.contact,
      email: registration.account.email,
    })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_applicant(&self, applicant_id: Uuid) -> Result<Option<Applicant>> {
    let id_str = encode_uuid(applicant_id);
    let sql = format!(
      "SELECT {APPLICANT_COLUMNS}
         FROM personal_info p
         JOIN admission_info ad ON ad.applicant_id = p.applicant_id
         JOIN contact_info   c  ON c.applicant_id  = p.applicant_id
         JOIN account_info   ac ON ac.applicant_id = p.applicant_id
        WHERE p.applicant_id = ?1"
    );

    let raw = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(&sql, rusqlite::params![id_str], RawApplicant::from_row)
          .optional()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawApplicant::into_applicant).transpose()
  }

  async fn find_account(&self, email: &Email) -> Result<Option<AccountRecord>> {
    let email = email.as_str().to_owned();
    let raw = self
      .conn
      .call(move |conn| {
        let raw = conn
          .query_row(
            "SELECT applicant_id, email, password_hash FROM account_info WHERE email = ?1",
            rusqlite::params![email],
            |r| {
              Ok(RawAccount {
                applicant_id:  r.get(0)?,
                email:         r.get(1)?,
                password_hash: r.get(2)?,
              })
            },
          )
          .optional()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawAccount::into_record).transpose()
  }
}

// ─── Test support ────────────────────────────────────────────────────────────

#[cfg(test)]
impl SqliteStore {
  /// Row counts of `personal_info`, `admission_info`, `contact_info` and
  /// `account_info`, in that order.
  pub(crate) async fn row_counts(&self) -> Result<[i64; 4]> {
    let counts = self
      .conn
      .call(|conn| {
        let mut counts = [0i64; 4];
        for (slot, table) in counts
          .iter_mut()
          .zip(["personal_info", "admission_info", "contact_info", "account_info"])
        {
          *slot = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?;
        }
        Ok(counts)
      })
      .await?;
    Ok(counts)
  }

  pub(crate) async fn execute_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
