//! Core types and workflows for the admission portal.
//!
//! This crate is deliberately free of HTTP and database dependencies. Storage
//! backends implement [`store::RegistrationStore`]; the HTTP layer drives
//! [`workflow::RegistrationWorkflow`] and [`session::authenticate`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod applicant;
pub mod credential;
pub mod duplicate;
pub mod email;
pub mod error;
pub mod registration;
pub mod session;
pub mod store;
pub mod workflow;

pub use error::{Conflict, RegistrationError, ValidationError};

#[cfg(test)]
pub(crate) mod testing;
