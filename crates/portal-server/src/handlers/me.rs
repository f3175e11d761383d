//! `GET /api/me`: the authenticated applicant's own record.

use axum::{Json, extract::State};
use portal_core::{applicant::Applicant, store::RegistrationStore};

use crate::{AppState, auth::CurrentSession, error::ApiError};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  CurrentSession(session): CurrentSession,
) -> Result<Json<Applicant>, ApiError>
where
  S: RegistrationStore + Clone + 'static,
{
  let applicant = state
    .registration
    .store()
    .get_applicant(session.applicant_id)
    .await
    .map_err(|e| {
      tracing::error!(error = %e, applicant_id = %session.applicant_id, "applicant lookup failed");
      ApiError::internal()
    })?
    .ok_or_else(|| ApiError::NotFound("applicant record not found".into()))?;
  Ok(Json(applicant))
}
