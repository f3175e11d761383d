//! The registration workflow: validate, check for duplicates, hash the
//! password, write all four records atomically, report.

use std::sync::Arc;

use strum::Display;
use tracing::{debug, error, info, warn};

use crate::{
  applicant::{AccountInfo, Applicant, NewRegistration},
  credential::CredentialHasher,
  duplicate::check_duplicate,
  error::{RegistrationError, Result},
  registration::RegistrationForm,
  store::{RegistrationStore, StoreError},
};

/// The states a submission passes through, in order. A failure at any stage
/// jumps straight to `Reported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RegistrationStage {
  Received,
  Validated,
  DuplicateChecked,
  Hashed,
  Committed,
  RolledBack,
  Reported,
}

/// Orchestrates one registration per [`register`](Self::register) call.
///
/// The store and hasher are injected; the workflow holds no other state, so
/// one instance can serve any number of concurrent submissions.
pub struct RegistrationWorkflow<S, H> {
  store:  Arc<S>,
  hasher: H,
}

impl<S, H> RegistrationWorkflow<S, H>
where
  S: RegistrationStore,
  H: CredentialHasher,
{
  pub fn new(store: Arc<S>, hasher: H) -> Self { Self { store, hasher } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn hasher(&self) -> &H { &self.hasher }

  /// Run one submission to completion.
  ///
  /// Validation and conflict failures happen before any write. A failed write
  /// is rolled back by the store before the error is returned, so every
  /// failure leaves the datastore as it was.
  pub async fn register(&self, form: &RegistrationForm) -> Result<Applicant> {
    let outcome = self.run(form).await;
    match &outcome {
      Ok(applicant) => info!(
        applicant_id = %applicant.applicant_id,
        stage = %RegistrationStage::Reported,
        "registration completed"
      ),
      Err(e) => debug!(stage = %RegistrationStage::Reported, reason = %e, "registration rejected"),
    }
    outcome
  }

  async fn run(&self, form: &RegistrationForm) -> Result<Applicant> {
    debug!(stage = %RegistrationStage::Received);

    let valid = form.validate()?;
    debug!(stage = %RegistrationStage::Validated);

    let identity = valid.personal.identity();
    let duplicate = check_duplicate(self.store.as_ref(), &valid.email, &identity)
      .await
      .map_err(|e| {
        error!(error = %e, "duplicate check failed");
        RegistrationError::Datastore(Box::new(e))
      })?;
    if let Some(conflict) = duplicate.conflict() {
      return Err(conflict.into());
    }
    debug!(stage = %RegistrationStage::DuplicateChecked);

    let password_hash = self.hasher.hash(&valid.password).map_err(|e| {
      error!(error = %e, "password hashing failed");
      RegistrationError::Credential(e)
    })?;
    debug!(stage = %RegistrationStage::Hashed);

    let registration = NewRegistration {
      personal:  valid.personal,
      admission: valid.admission,
      contact:   valid.contact,
      account:   AccountInfo {
        email: valid.email,
        password_hash,
      },
    };

    match self.store.insert_registration(registration).await {
      Ok(applicant) => {
        debug!(stage = %RegistrationStage::Committed, applicant_id = %applicant.applicant_id);
        Ok(applicant)
      }
      Err(e) => {
        debug!(stage = %RegistrationStage::RolledBack);
        match e.conflict() {
          // Lost a race with a concurrent registration.
          Some(conflict) => {
            warn!(%conflict, "unique constraint rejected registration at write time");
            Err(conflict.into())
          }
          None => {
            error!(error = %e, "registration write failed");
            Err(RegistrationError::Persistence(Box::new(e)))
          }
        }
      }
    }
  }
}
