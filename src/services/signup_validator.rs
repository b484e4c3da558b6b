use crate::errors::internal::{InternalError, ValidationError};
use crate::types::internal::{NewAccount, NewOwner};

/// Field rules applied to every signup before anything touches the store
///
/// Validates in order and fails fast on the first broken field.
pub struct SignupValidator {
    password_min_length: usize,
    password_max_length: usize,
}

impl SignupValidator {
    pub fn new() -> Self {
        Self {
            password_min_length: 10,
            password_max_length: 128,
        }
    }

    /// Rules shared by all roles. `phone_required` is false only for admins.
    pub fn validate_account(&self, account: &NewAccount, phone_required: bool) -> Result<(), InternalError> {
        Self::validate_email(&account.email)?;
        self.validate_password(&account.password)?;
        Self::require_non_blank("real_name", &account.real_name)?;

        match &account.phone {
            Some(phone) => Self::validate_digits("phone", phone)?,
            None if phone_required => {
                return Err(ValidationError::invalid_field("phone", "is required").into());
            }
            None => {}
        }

        Ok(())
    }

    pub fn validate_owner(&self, owner: &NewOwner) -> Result<(), InternalError> {
        self.validate_account(&owner.account, true)?;
        Self::require_non_blank("store_name", &owner.store_name)?;
        Self::validate_digits("store_phone", &owner.store_phone)?;
        Self::require_non_blank("road_address", &owner.road_address)?;

        if let Some(number) = &owner.business_number {
            if number.trim().is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '-') {
                return Err(ValidationError::invalid_field(
                    "business_number",
                    "may contain only digits and '-'",
                )
                .into());
            }
        }

        Ok(())
    }

    fn validate_email(email: &str) -> Result<(), InternalError> {
        let invalid = || -> InternalError {
            ValidationError::invalid_field("email", "is not a valid email address").into()
        };

        if email.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let Some((local, domain)) = email.split_once('@') else {
            return Err(invalid());
        };
        if local.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(invalid());
        }

        Ok(())
    }

    fn validate_password(&self, password: &str) -> Result<(), InternalError> {
        let length = password.chars().count();
        if length < self.password_min_length {
            return Err(ValidationError::invalid_field(
                "password",
                format!("must be at least {} characters", self.password_min_length),
            )
            .into());
        }
        if length > self.password_max_length {
            return Err(ValidationError::invalid_field(
                "password",
                format!("must be at most {} characters", self.password_max_length),
            )
            .into());
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_field("password", "must contain an uppercase letter").into());
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_field("password", "must contain a digit").into());
        }

        Ok(())
    }

    fn validate_digits(field: &str, value: &str) -> Result<(), InternalError> {
        if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::invalid_field(field, "must contain digits only").into());
        }
        Ok(())
    }

    fn require_non_blank(field: &str, value: &str) -> Result<(), InternalError> {
        if value.trim().is_empty() {
            return Err(ValidationError::invalid_field(field, "must not be blank").into());
        }
        Ok(())
    }
}

impl Default for SignupValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "signup_validator_test.rs"]
mod signup_validator_test;
