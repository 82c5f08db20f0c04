//! Registration form view-model: field values, consent flags, visibility
//! toggles and the derived password strength.

pub mod strength;
pub mod validation;

use shared::protocol::RegistrationRequest;

pub use strength::{PasswordStrength, Requirement};
pub use validation::{validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 4] = [
        Field::Name,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::ConfirmPassword => "Confirm password",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl FormData {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    data: FormData,
    strength: PasswordStrength,
    accept_terms: bool,
    marketing_consent: bool,
    show_password: bool,
    show_confirm_password: bool,
    error: Option<String>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.data.name = value,
            Field::Email => self.data.email = value,
            Field::Password => {
                self.strength = PasswordStrength::evaluate(&value);
                self.data.password = value;
            }
            Field::ConfirmPassword => self.data.confirm_password = value,
        }
    }

    pub fn data(&self) -> &FormData {
        &self.data
    }

    pub fn strength(&self) -> PasswordStrength {
        self.strength
    }

    /// `None` until the confirmation field has been typed into.
    pub fn passwords_match(&self) -> Option<bool> {
        if self.data.confirm_password.is_empty() {
            None
        } else {
            Some(self.data.password == self.data.confirm_password)
        }
    }

    pub fn accept_terms(&self) -> bool {
        self.accept_terms
    }

    pub fn set_accept_terms(&mut self, accepted: bool) {
        self.accept_terms = accepted;
    }

    pub fn marketing_consent(&self) -> bool {
        self.marketing_consent
    }

    pub fn set_marketing_consent(&mut self, consent: bool) {
        self.marketing_consent = consent;
    }

    pub fn is_visible(&self, field: Field) -> bool {
        match field {
            Field::Password => self.show_password,
            Field::ConfirmPassword => self.show_confirm_password,
            Field::Name | Field::Email => true,
        }
    }

    pub fn toggle_visibility(&mut self, field: Field) {
        match field {
            Field::Password => self.show_password = !self.show_password,
            Field::ConfirmPassword => self.show_confirm_password = !self.show_confirm_password,
            Field::Name | Field::Email => {}
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn to_request(&self) -> RegistrationRequest {
        RegistrationRequest {
            email: self.data.email.trim().to_string(),
            password: self.data.password.clone(),
            name: self.data.name.trim().to_string(),
            accept_terms: self.accept_terms,
            marketing_consent: self.marketing_consent,
        }
    }
}
