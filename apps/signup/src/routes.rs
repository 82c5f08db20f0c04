use std::fmt;

use url::form_urlencoded;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    VerifyEmail { email: String },
    Dashboard,
    Login,
    Terms,
    Privacy,
}

impl Route {
    pub fn verify_email(email: impl Into<String>) -> Self {
        Self::VerifyEmail {
            email: email.into(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::VerifyEmail { email } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("email", email)
                    .finish();
                format!("/verify-email?{query}")
            }
            Self::Dashboard => "/dashboard".to_string(),
            Self::Login => "/login".to_string(),
            Self::Terms => "/terms".to_string(),
            Self::Privacy => "/privacy".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_email_route_encodes_the_address() {
        assert_eq!(
            Route::verify_email("ada@example.com").path(),
            "/verify-email?email=ada%40example.com"
        );
        assert_eq!(
            Route::verify_email("ada+news@example.com").path(),
            "/verify-email?email=ada%2Bnews%40example.com"
        );
    }

    #[test]
    fn fixed_routes() {
        assert_eq!(Route::Dashboard.to_string(), "/dashboard");
        assert_eq!(Route::Login.path(), "/login");
        assert_eq!(Route::Terms.path(), "/terms");
        assert_eq!(Route::Privacy.path(), "/privacy");
    }
}
