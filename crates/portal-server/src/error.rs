//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure renders as `{"error": "<message>"}` with a single message
//! safe to show to the user.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use portal_core::RegistrationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  BadRequest(String),

  #[error("{0}")]
  Conflict(String),

  #[error("invalid email or password")]
  Unauthorized,

  #[error("{0}")]
  NotFound(String),

  /// The cause has already been logged; only a generic message goes out.
  #[error("{0}")]
  Internal(String),
}

impl ApiError {
  pub fn internal() -> Self { ApiError::Internal("something went wrong, please try again later".into()) }
}

impl From<RegistrationError> for ApiError {
  fn from(e: RegistrationError) -> Self {
    match e {
      RegistrationError::Validation(v) => ApiError::BadRequest(v.to_string()),
      RegistrationError::Conflict(c) => ApiError::Conflict(c.to_string()),
      other @ (RegistrationError::Datastore(_)
      | RegistrationError::Credential(_)
      | RegistrationError::Persistence(_)) => ApiError::Internal(other.to_string()),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self {
    tracing::debug!(error = %e, "rejected request body");
    ApiError::BadRequest("request body is not a valid registration form".into())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"portal\""),
      );
    }
    res
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use portal_core::{Conflict, ValidationError};

  async fn body(res: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn persistence_failure_hides_cause() {
    let cause = "UNIQUE constraint failed: account_info.email".into();
    let res = ApiError::from(RegistrationError::Persistence(cause)).into_response();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let message = body(res).await["error"].as_str().unwrap().to_owned();
    assert!(!message.contains("account_info"), "leaked: {message}");
  }

  #[tokio::test]
  async fn registration_errors_map_to_statuses() {
    let res = ApiError::from(RegistrationError::from(ValidationError::PasswordMismatch))
      .into_response();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(res).await["error"], "passwords do not match");

    let res = ApiError::from(RegistrationError::from(Conflict::Identity)).into_response();
    assert_eq!(res.status(), StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn unauthorized_carries_challenge() {
    let res = ApiError::Unauthorized.into_response();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(header::WWW_AUTHENTICATE));
  }
}
