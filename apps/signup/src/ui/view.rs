use std::fmt;

use client_core::AuthSnapshot;

use crate::{
    controller::events::classify_registration_failure,
    form::{Field, Requirement, RegistrationForm},
    routes::Route,
};

const MASK_CHAR: char = '•';
const SUBMIT_LABEL: &str = "Create account";
const SUBMIT_LABEL_LOADING: &str = "Creating account...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub label: &'static str,
    pub value: String,
    pub masked: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthView {
    pub score: u8,
    pub label: &'static str,
    pub checklist: Vec<(Requirement, bool)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub fields: Vec<FieldView>,
    pub strength: Option<StrengthView>,
    pub passwords_match: Option<bool>,
    pub accept_terms: bool,
    pub marketing_consent: bool,
    pub checkboxes_disabled: bool,
    pub error: Option<String>,
    pub submit_label: &'static str,
    pub submit_enabled: bool,
}

pub fn render(form: &RegistrationForm, auth: &AuthSnapshot) -> FormView {
    let disabled = auth.is_loading;

    let fields = Field::ALL
        .into_iter()
        .map(|field| {
            let raw = form.data().get(field);
            let masked = !form.is_visible(field);
            let value = if masked {
                raw.chars().map(|_| MASK_CHAR).collect()
            } else {
                raw.to_string()
            };
            FieldView {
                field,
                label: field.label(),
                value,
                masked,
                disabled,
            }
        })
        .collect();

    let strength = (!form.data().password.is_empty()).then(|| {
        let strength = form.strength();
        let unmet = strength.unmet();
        StrengthView {
            score: strength.score,
            label: strength.label(),
            checklist: Requirement::ALL
                .into_iter()
                .map(|requirement| (requirement, !unmet.contains(&requirement)))
                .collect(),
        }
    });

    let error = form
        .error()
        .map(str::to_string)
        .or_else(|| auth.error.as_ref().map(classify_registration_failure));

    FormView {
        fields,
        strength,
        passwords_match: form.passwords_match(),
        accept_terms: form.accept_terms(),
        marketing_consent: form.marketing_consent(),
        checkboxes_disabled: disabled,
        error,
        submit_label: if disabled {
            SUBMIT_LABEL_LOADING
        } else {
            SUBMIT_LABEL
        },
        submit_enabled: !disabled,
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Create your account")?;
        if let Some(error) = &self.error {
            writeln!(f, "  ! {error}")?;
        }

        for field in &self.fields {
            let lock = if field.disabled { " (disabled)" } else { "" };
            writeln!(f, "  {}: {}{lock}", field.label, field.value)?;

            if field.field == Field::Password {
                if let Some(strength) = &self.strength {
                    writeln!(f, "    strength: {}/5 {}", strength.score, strength.label)?;
                    for (requirement, met) in &strength.checklist {
                        let mark = if *met { "+" } else { "-" };
                        writeln!(f, "      {mark} {}", requirement.description())?;
                    }
                }
            }
            if field.field == Field::ConfirmPassword {
                match self.passwords_match {
                    Some(true) => writeln!(f, "    passwords match")?,
                    Some(false) => writeln!(f, "    passwords do not match")?,
                    None => {}
                }
            }
        }

        writeln!(
            f,
            "  {} I agree to the Terms of Service ({}) and Privacy Policy ({})",
            checkbox(self.accept_terms),
            Route::Terms,
            Route::Privacy
        )?;
        writeln!(
            f,
            "  {} Send me product updates and offers",
            checkbox(self.marketing_consent)
        )?;
        let state = if self.submit_enabled { "" } else { " (disabled)" };
        writeln!(f, "  <{}>{state}", self.submit_label)?;
        write!(f, "  Already have an account? Sign in at {}", Route::Login)
    }
}
