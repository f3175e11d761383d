//! Email address value type with syntactic validation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MAX_LEN:       usize = 254;
const MAX_LOCAL_LEN: usize = 64;
const MAX_LABEL_LEN: usize = 63;

/// A syntactically valid, lowercased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  /// Parse and normalise a raw address.
  ///
  /// Accepts the common RFC 5322 `dot-atom@domain` shape. Quoted local parts
  /// and address literals are rejected.
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    let s = raw.trim();
    if s.is_empty() || s.len() > MAX_LEN {
      return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = s.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if !valid_local(local) || !valid_domain(domain) {
      return Err(ValidationError::InvalidEmail);
    }

    Ok(Self(s.to_ascii_lowercase()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

fn valid_local(local: &str) -> bool {
  if local.is_empty() || local.len() > MAX_LOCAL_LEN {
    return false;
  }
  if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
    return false;
  }
  local.chars().all(is_atext_or_dot)
}

fn is_atext_or_dot(c: char) -> bool {
  c.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~-.".contains(c)
}

fn valid_domain(domain: &str) -> bool {
  let labels: Vec<&str> = domain.split('.').collect();
  if labels.len() < 2 {
    return false;
  }
  labels.iter().all(|label| {
    !label.is_empty()
      && label.len() <= MAX_LABEL_LEN
      && !label.starts_with('-')
      && !label.ends_with('-')
      && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
  })
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl TryFrom<String> for Email {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(&value) }
}

impl From<Email> for String {
  fn from(value: Email) -> Self { value.0 }
}
