use super::ValidationError;

#[derive(Debug)]
pub struct SenderName(String);

impl SenderName {
    /// Only the empty string is refused; names are not trimmed or capped.
    pub fn parse(s: String) -> Result<SenderName, ValidationError> {
        if s.is_empty() {
            Err(ValidationError::MissingField)
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for SenderName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
