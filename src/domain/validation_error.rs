/// Reasons a submission is rejected before any delivery attempt.
///
/// The `Display` output is shown verbatim to the person filling the form.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("All fields are required.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,
}
