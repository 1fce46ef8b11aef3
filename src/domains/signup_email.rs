#[derive(Debug, Clone)]
pub struct SignupEmail(String);

impl SignupEmail {
    pub fn parse(email: String) -> Result<SignupEmail, String> {
        if validator::validate_email(&email) {
            Ok(Self(email))
        } else {
            Err(format!("{} is not a valid email address", email))
        }
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SignupEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
