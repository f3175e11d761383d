//! HTTP Basic-auth session gate.
//!
//! Students authenticate with `email:password`. A successful check yields a
//! request-scoped [`CurrentSession`]; nothing is remembered between requests.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use portal_core::{
  session::{AuthError, Session, authenticate},
  store::RegistrationStore,
};

use crate::{AppState, error::ApiError};

/// Present in a handler's arguments means the request was authenticated.
pub struct CurrentSession(pub Session);

/// Pull `(email, password)` out of an `Authorization: Basic …` header.
pub fn basic_credentials(headers: &HeaderMap) -> Result<(String, String), ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds = String::from_utf8(decoded).map_err(|_| ApiError::Unauthorized)?;

  let (email, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;
  Ok((email.to_owned(), password.to_owned()))
}

impl<S> FromRequestParts<AppState<S>> for CurrentSession
where
  S: RegistrationStore + Clone + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let (email, password) = basic_credentials(&parts.headers)?;
    let workflow = &state.registration;
    let session = authenticate(workflow.store().as_ref(), workflow.hasher(), &email, &password)
      .await
      .map_err(|e| match e {
        AuthError::InvalidCredentials => ApiError::Unauthorized,
        AuthError::Store(e) => {
          tracing::error!(error = %e, "account lookup failed");
          ApiError::internal()
        }
      })?;
    Ok(CurrentSession(session))
  }
}
