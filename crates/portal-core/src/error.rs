//! Error types for `portal-core`.
//!
//! Every variant's `Display` is written for direct display to the person
//! filling in the form. Datastore causes are kept as `source()` for logging and
//! never appear in the message.

use thiserror::Error;

/// Boxed backend error carried as the `source()` of datastore failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A submitted form failed shape validation. No datastore access happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  Missing(&'static str),

  #[error("birthdate must be a valid date in YYYY-MM-DD format")]
  InvalidBirthdate,

  #[error("birthdate cannot be in the future")]
  FutureBirthdate,

  #[error("{0} is not one of the accepted values")]
  NotAccepted(&'static str),

  #[error("email address is not valid")]
  InvalidEmail,

  #[error("passwords do not match")]
  PasswordMismatch,
}

/// A record that conflicts with the submission already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Conflict {
  #[error("an account with this email address already exists")]
  Email,

  #[error("an applicant with the same name and birthdate is already registered")]
  Identity,
}

#[derive(Debug, Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(pub String);

/// The outcome of a failed registration attempt.
#[derive(Debug, Error)]
pub enum RegistrationError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Conflict(#[from] Conflict),

  /// A duplicate-check read failed; nothing was written.
  #[error("registration could not be completed, please try again later")]
  Datastore(#[source] BoxError),

  /// The credential could not be hashed; nothing was written.
  #[error("registration could not be completed, please try again later")]
  Credential(#[source] HashError),

  /// The transactional write failed and was rolled back.
  #[error("registration could not be completed, please try again later")]
  Persistence(#[source] BoxError),
}

pub type Result<T, E = RegistrationError> = std::result::Result<T, E>;
