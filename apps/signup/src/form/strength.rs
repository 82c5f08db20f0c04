//! Password complexity scoring shown live under the password field.

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const SPECIAL_CHARACTERS: [char; 7] = ['@', '$', '!', '%', '*', '?', '&'];
/// Lowest score a password may have and still be submitted.
pub const ACCEPTABLE_SCORE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Length,
    Uppercase,
    Lowercase,
    Number,
    Special,
}

impl Requirement {
    pub const ALL: [Requirement; 5] = [
        Requirement::Length,
        Requirement::Uppercase,
        Requirement::Lowercase,
        Requirement::Number,
        Requirement::Special,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Self::Length => "At least 8 characters",
            Self::Uppercase => "One uppercase letter",
            Self::Lowercase => "One lowercase letter",
            Self::Number => "One number",
            Self::Special => "One special character (@$!%*?&)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Requirements {
    pub length: bool,
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special: bool,
}

impl Requirements {
    pub fn is_met(&self, requirement: Requirement) -> bool {
        match requirement {
            Requirement::Length => self.length,
            Requirement::Uppercase => self.uppercase,
            Requirement::Lowercase => self.lowercase,
            Requirement::Number => self.number,
            Requirement::Special => self.special,
        }
    }

    fn met_count(&self) -> u8 {
        Requirement::ALL
            .iter()
            .filter(|requirement| self.is_met(**requirement))
            .count() as u8
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub requirements: Requirements,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        let requirements = Requirements {
            length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(&c)),
        };
        Self {
            score: requirements.met_count(),
            requirements,
        }
    }

    pub fn is_acceptable(&self) -> bool {
        self.score >= ACCEPTABLE_SCORE
    }

    pub fn label(&self) -> &'static str {
        match self.score {
            0 | 1 => "Weak",
            2 => "Fair",
            3 => "Good",
            4 => "Strong",
            _ => "Very strong",
        }
    }

    pub fn unmet(&self) -> Vec<Requirement> {
        Requirement::ALL
            .into_iter()
            .filter(|requirement| !self.requirements.is_met(*requirement))
            .collect()
    }
}
