//! Credential check for returning students.
//!
//! A [`Session`] is request-scoped: the HTTP layer builds one per request from
//! the supplied credentials and hands it to whatever needs the caller's
//! identity.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::{
  credential::{CredentialHasher, Password},
  email::Email,
  store::RegistrationStore,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
  pub applicant_id: Uuid,
  pub email:        Email,
}

#[derive(Debug, Error)]
pub enum AuthError<E> {
  /// Unknown email, malformed email, or wrong password.
  #[error("invalid email or password")]
  InvalidCredentials,

  #[error("store error: {0}")]
  Store(#[source] E),
}

/// Verify `email` and `password` against the stored account.
pub async fn authenticate<S, H>(
  store: &S,
  hasher: &H,
  email: &str,
  password: &str,
) -> Result<Session, AuthError<S::Error>>
where
  S: RegistrationStore,
  H: CredentialHasher,
{
  let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;
  let Some(account) = store.find_account(&email).await.map_err(AuthError::Store)? else {
    // Unknown emails pay for one hash so they answer as slowly as known ones.
    let _ = hasher.hash(&Password::new(password));
    return Err(AuthError::InvalidCredentials);
  };

  if !hasher.verify(password, &account.password_hash) {
    return Err(AuthError::InvalidCredentials);
  }

  Ok(Session {
    applicant_id: account.applicant_id,
    email:        account.email,
  })
}
