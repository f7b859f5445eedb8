use super::{ContactEmail, MessageBody, SenderName, ValidationError};

/// A contact submission that passed validation and may be relayed.
#[derive(Debug)]
pub struct NewSubmission {
    pub name: SenderName,
    pub email: ContactEmail,
    pub message: MessageBody,
}

impl NewSubmission {
    /// Absent and empty fields are both reported as `MissingField`, and
    /// completeness is checked for every field before the email shape.
    pub fn parse(
        name: Option<String>,
        email: Option<String>,
        message: Option<String>,
    ) -> Result<NewSubmission, ValidationError> {
        let (Some(name), Some(email), Some(message)) =
            (present(name), present(email), present(message))
        else {
            return Err(ValidationError::MissingField);
        };

        Ok(Self {
            name: SenderName::parse(name)?,
            email: ContactEmail::parse(email)?,
            message: MessageBody::parse(message)?,
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
