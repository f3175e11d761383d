//! Password handling: the redacting [`Password`] wrapper, the stored
//! [`HashedPassword`], and the argon2-backed [`CredentialHasher`].

use std::fmt;

use argon2::{
  Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
  password_hash::SaltString,
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::HashError;

// ─── Plaintext ───────────────────────────────────────────────────────────────

/// A plaintext password as submitted. `Debug` never prints the value.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
  pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

  pub fn expose(&self) -> &str { &self.0 }

  pub fn is_blank(&self) -> bool { self.0.trim().is_empty() }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str("Password(***)") }
}

// ─── Stored form ─────────────────────────────────────────────────────────────

/// A PHC-format password hash, e.g. `$argon2id$v=19$m=19456,t=2,p=1$…`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashedPassword(String);

impl HashedPassword {
  /// Wrap a hash read back from storage.
  pub fn from_stored(hash: String) -> Self { Self(hash) }

  pub fn as_str(&self) -> &str { &self.0 }
}

// ─── Hasher ──────────────────────────────────────────────────────────────────

/// One-way, salted password hashing.
pub trait CredentialHasher: Send + Sync {
  /// Hash `password` with a fresh random salt.
  fn hash(&self, password: &Password) -> Result<HashedPassword, HashError>;

  /// Check `password` against a stored hash. Malformed hashes never verify.
  fn verify(&self, password: &str, stored: &HashedPassword) -> bool;
}

/// argon2id hasher with configurable cost.
#[derive(Clone)]
pub struct Argon2Hasher {
  params: Params,
}

impl Argon2Hasher {
  /// Use the argon2 crate's recommended parameters.
  pub fn new() -> Self {
    Self {
      params: Params::default(),
    }
  }

  /// Memory in KiB, number of passes, and lanes.
  pub fn with_cost(
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
  ) -> Result<Self, HashError> {
    let params = Params::new(memory_kib, iterations, parallelism, None)
      .map_err(|e| HashError(e.to_string()))?;
    Ok(Self { params })
  }

  fn argon2(&self) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
  }
}

impl Default for Argon2Hasher {
  fn default() -> Self { Self::new() }
}

impl CredentialHasher for Argon2Hasher {
  fn hash(&self, password: &Password) -> Result<HashedPassword, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = self
      .argon2()
      .hash_password(password.expose().as_bytes(), &salt)
      .map_err(|e| HashError(e.to_string()))?
      .to_string();
    Ok(HashedPassword(hash))
  }

  fn verify(&self, password: &str, stored: &HashedPassword) -> bool {
    // Cost parameters come from the PHC string, not from `self`.
    let Ok(parsed) = PasswordHash::new(stored.as_str()) else {
      return false;
    };
    Argon2::default()
      .verify_password(password.as_bytes(), &parsed)
      .is_ok()
  }
}
