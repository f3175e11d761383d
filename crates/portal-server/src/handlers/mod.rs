//! HTTP handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/health` | Liveness probe |
//! | `POST` | `/api/register` | JSON registration form |
//! | `GET`  | `/api/me` | Basic auth (`email:password`) |

pub mod me;
pub mod register;

/// `GET /health`
pub async fn health() -> &'static str { "ok" }
