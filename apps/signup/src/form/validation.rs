//! Preconditions checked before a registration is sent. Checks run in a fixed
//! order and stop at the first failure.

use thiserror::Error;

use super::RegistrationForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password does not meet all requirements")]
    WeakPassword,
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,
}

pub fn validate(form: &RegistrationForm) -> Result<(), ValidationError> {
    let data = form.data();

    if data.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if !is_plausible_email(data.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    if data.password != data.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if !form.strength().is_acceptable() {
        return Err(ValidationError::WeakPassword);
    }
    if !form.accept_terms() {
        return Err(ValidationError::TermsNotAccepted);
    }
    Ok(())
}

/// Shape check only (`local@domain`, single-label domains allowed); the auth
/// service owns real address validation.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
