//! Error type for `portal-store-sqlite`.

use portal_core::{Conflict, store::StoreError};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A write rejected by a unique constraint, classified inside its
  /// transaction.
  #[error("unique constraint violated: {0}")]
  Unique(Conflict),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column could not be turned back into a domain value.
  #[error("decode error: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn conflict(&self) -> Option<Conflict> {
    match self {
      Error::Unique(conflict) => Some(*conflict),
      Error::Database(tokio_rusqlite::Error::Rusqlite(err)) => unique_violation(err),
      _ => None,
    }
  }
}

/// Which unique constraint `err` violated, if any.
pub(crate) fn unique_violation(err: &rusqlite::Error) -> Option<Conflict> {
  let rusqlite::Error::SqliteFailure(failure, Some(message)) = err else {
    return None;
  };
  if failure.code != ErrorCode::ConstraintViolation || !message.starts_with("UNIQUE") {
    return None;
  }
  if message.contains("account_info.email") {
    Some(Conflict::Email)
  } else if message.contains("personal_info.first_name") {
    Some(Conflict::Identity)
  } else {
    None
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
