//! The registration form as submitted, and its validation into typed records.

use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::{
  applicant::{AdmissionInfo, ContactInfo, EducationalStatus, PersonalInfo, Program, Sex},
  credential::Password,
  email::Email,
  error::ValidationError,
};

/// Raw form fields. Every field defaults to empty so that an omitted field is
/// reported as missing by [`RegistrationForm::validate`] rather than failing
/// deserialisation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
  pub first_name:         String,
  pub middle_name:        Option<String>,
  pub last_name:          String,
  pub birthdate:          String,
  pub sex:                String,
  pub program_to_enroll:  String,
  pub educational_status: String,
  pub current_address:    String,
  pub permanent_address:  Option<String>,
  pub mobile_number:      String,
  pub landline_number:    Option<String>,
  pub email:              String,
  pub initial_password:   Password,
  pub confirm_password:   Password,
}

/// A form that passed validation. Holds the plaintext password until it is
/// hashed; never persisted in this shape.
#[derive(Debug, Clone)]
pub struct ValidRegistration {
  pub personal:  PersonalInfo,
  pub admission: AdmissionInfo,
  pub contact:   ContactInfo,
  pub email:     Email,
  pub password:  Password,
}

impl RegistrationForm {
  /// Check the form and convert it into typed records.
  ///
  /// Reports the first problem found: missing fields in form order, then
  /// birthdate, enumerated fields, email shape, and finally password
  /// confirmation.
  pub fn validate(&self) -> Result<ValidRegistration, ValidationError> {
    let first_name = required(&self.first_name, "first name")?;
    let last_name = required(&self.last_name, "last name")?;
    let birthdate = required(&self.birthdate, "birthdate")?;
    let sex = required(&self.sex, "sex")?;
    let program = required(&self.program_to_enroll, "program to enroll")?;
    let status = required(&self.educational_status, "educational status")?;
    let current_address = required(&self.current_address, "current address")?;
    let mobile_number = required(&self.mobile_number, "mobile number")?;
    let email = required(&self.email, "email")?;
    if self.initial_password.is_blank() {
      return Err(ValidationError::Missing("password"));
    }
    if self.confirm_password.is_blank() {
      return Err(ValidationError::Missing("password confirmation"));
    }

    let birthdate = parse_birthdate(birthdate)?;
    let sex = enumerated::<Sex>(sex, "sex")?;
    let program = enumerated::<Program>(program, "program to enroll")?;
    let status = enumerated::<EducationalStatus>(status, "educational status")?;
    let email = Email::parse(email)?;

    if self.initial_password.expose().as_bytes() != self.confirm_password.expose().as_bytes() {
      return Err(ValidationError::PasswordMismatch);
    }

    Ok(ValidRegistration {
      personal: PersonalInfo {
        first_name:  first_name.to_owned(),
        middle_name: optional(self.middle_name.as_deref()),
        last_name:   last_name.to_owned(),
        birthdate,
        sex,
      },
      admission: AdmissionInfo {
        program_to_enroll:  program,
        educational_status: status,
      },
      contact: ContactInfo {
        current_address:   current_address.to_owned(),
        permanent_address: optional(self.permanent_address.as_deref()),
        mobile_number:     mobile_number.to_owned(),
        landline_number:   optional(self.landline_number.as_deref()),
      },
      email,
      password: self.initial_password.clone(),
    })
  }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    Err(ValidationError::Missing(field))
  } else {
    Ok(trimmed)
  }
}

fn optional(value: Option<&str>) -> Option<String> {
  value
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_owned)
}

fn enumerated<T: FromStr>(value: &str, field: &'static str) -> Result<T, ValidationError> {
  T::from_str(value).map_err(|_| ValidationError::NotAccepted(field))
}

fn parse_birthdate(value: &str) -> Result<NaiveDate, ValidationError> {
  let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
    .map_err(|_| ValidationError::InvalidBirthdate)?;
  if date > Utc::now().date_naive() {
    return Err(ValidationError::FutureBirthdate);
  }
  Ok(date)
}
