use std::sync::LazyLock;

use regex::Regex;

use super::ValidationError;

// local-part "@" domain "." tld, none of them containing whitespace or '@'
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Checks the address shape only; deliverability is never verified.
    pub fn parse(s: String) -> Result<ContactEmail, ValidationError> {
        if s.is_empty() {
            Err(ValidationError::MissingField)
        } else if EMAIL_SHAPE.is_match(&s) {
            Ok(Self(s))
        } else {
            Err(ValidationError::InvalidEmailFormat)
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
