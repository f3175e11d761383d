//! Pre-insert duplicate detection.

use crate::{
  applicant::Identity,
  email::Email,
  error::Conflict,
  store::RegistrationStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateResult {
  Unique,
  EmailConflict,
  IdentityConflict,
}

impl DuplicateResult {
  pub fn conflict(self) -> Option<Conflict> {
    match self {
      DuplicateResult::Unique => None,
      DuplicateResult::EmailConflict => Some(Conflict::Email),
      DuplicateResult::IdentityConflict => Some(Conflict::Identity),
    }
  }
}

/// Check `email` first, then the name+birthdate identity. Only the first
/// conflict found is reported; the identity query is skipped when the email is
/// already taken.
pub async fn check_duplicate<S>(
  store: &S,
  email: &Email,
  identity: &Identity,
) -> Result<DuplicateResult, S::Error>
where
  S: RegistrationStore,
{
  if store.email_exists(email).await? {
    return Ok(DuplicateResult::EmailConflict);
  }
  if store.identity_exists(identity).await? {
    return Ok(DuplicateResult::IdentityConflict);
  }
  Ok(DuplicateResult::Unique)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{MemoryStore, ana_cruz};

  fn seeded() -> MemoryStore {
    let store = MemoryStore::default();
    store.seed(&ana_cruz());
    store
  }

  fn identity(first: &str, last: &str, date: &str) -> Identity {
    Identity {
      first_name: first.into(),
      last_name:  last.into(),
      birthdate:  date.parse().unwrap(),
    }
  }

  #[tokio::test]
  async fn unique_when_nothing_matches() {
    let store = seeded();
    let email = Email::parse("ben.reyes@example.com").unwrap();
    let result = check_duplicate(&store, &email, &identity("Ben", "Reyes", "2000-01-01"))
      .await
      .unwrap();
    assert_eq!(result, DuplicateResult::Unique);
  }

  #[tokio::test]
  async fn email_match_is_a_conflict() {
    let store = seeded();
    let email = Email::parse("ANA.CRUZ@example.com").unwrap();
    let result = check_duplicate(&store, &email, &identity("Ben", "Reyes", "2000-01-01"))
      .await
      .unwrap();
    assert_eq!(result, DuplicateResult::EmailConflict);
  }

  #[tokio::test]
  async fn identity_match_is_a_conflict() {
    let store = seeded();
    let email = Email::parse("other@example.com").unwrap();
    let result = check_duplicate(&store, &email, &identity("Ana", "Cruz", "2001-05-10"))
      .await
      .unwrap();
    assert_eq!(result, DuplicateResult::IdentityConflict);
  }

  #[tokio::test]
  async fn email_takes_precedence_over_identity() {
    let store = seeded();
    let email = Email::parse("ana.cruz@example.com").unwrap();
    let result = check_duplicate(&store, &email, &identity("Ana", "Cruz", "2001-05-10"))
      .await
      .unwrap();
    assert_eq!(result, DuplicateResult::EmailConflict);
    assert_eq!(store.identity_queries(), 0);
  }

  #[tokio::test]
  async fn same_name_different_birthdate_is_unique() {
    let store = seeded();
    let email = Email::parse("ana.cruz2@example.com").unwrap();
    let result = check_duplicate(&store, &email, &identity("Ana", "Cruz", "2001-05-11"))
      .await
      .unwrap();
    assert_eq!(result, DuplicateResult::Unique);
  }

  #[tokio::test]
  async fn read_failure_is_propagated() {
    let store = seeded();
    store.fail_reads();
    let email = Email::parse("ben.reyes@example.com").unwrap();
    let result = check_duplicate(&store, &email, &identity("Ben", "Reyes", "2000-01-01")).await;
    assert!(result.is_err());
  }
}
