//! The `RegistrationStore` trait, the gateway to the applicant datastore.
//!
//! Implemented by storage backends (e.g. `portal-store-sqlite`). The workflow
//! and the HTTP layer depend on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  applicant::{AccountRecord, Applicant, Identity, NewRegistration},
  email::Email,
  error::Conflict,
};

/// Backend errors that can tell a uniqueness violation apart from other
/// failures.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `Some` when the error is a write rejected by a unique constraint on the
  /// email or on the name+birthdate identity.
  fn conflict(&self) -> Option<Conflict>;
}

/// Abstraction over the relational store holding applicant records.
///
/// Email and identity uniqueness must be enforced by the backend itself: the
/// existence checks are advisory and race with concurrent registrations.
pub trait RegistrationStore: Send + Sync {
  type Error: StoreError;

  // ── Existence checks ──────────────────────────────────────────────────

  /// Whether any account uses `email` (compared case-insensitively).
  fn email_exists<'a>(
    &'a self,
    email: &'a Email,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Whether any applicant has the same first name, last name and birthdate.
  fn identity_exists<'a>(
    &'a self,
    identity: &'a Identity,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert all four records under a fresh applicant id in one transaction.
  ///
  /// Either every row is committed or none is. `applicant_id` and
  /// `registered_at` are assigned by the store.
  fn insert_registration(
    &self,
    registration: NewRegistration,
  ) -> impl Future<Output = Result<Applicant, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Reassemble an applicant from its four rows. `None` if not found.
  fn get_applicant(
    &self,
    applicant_id: Uuid,
  ) -> impl Future<Output = Result<Option<Applicant>, Self::Error>> + Send + '_;

  /// Look up the credential row for `email`.
  fn find_account<'a>(
    &'a self,
    email: &'a Email,
  ) -> impl Future<Output = Result<Option<AccountRecord>, Self::Error>> + Send + 'a;
}
