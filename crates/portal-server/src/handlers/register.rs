//! `POST /api/register`: run the registration workflow on a submitted form.

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use portal_core::{registration::RegistrationForm, store::RegistrationStore};
use serde::Serialize;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registered {
  pub applicant_id: Uuid,
  pub message:      &'static str,
}

/// Body: the registration form as camelCase JSON. Responds `201` with the new
/// applicant id; failures carry exactly one message, including bodies that
/// are not JSON or do not fit the form.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  body: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: RegistrationStore + Clone + 'static,
{
  let Json(form) = body?;
  let applicant = state.registration.register(&form).await?;
  Ok((
    StatusCode::CREATED,
    Json(Registered {
      applicant_id: applicant.applicant_id,
      message:      "registration complete",
    }),
  ))
}
