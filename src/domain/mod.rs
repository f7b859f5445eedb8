mod contact_email;
mod message_body;
mod new_submission;
mod sender_name;
mod validation_error;

pub use contact_email::ContactEmail;
pub use message_body::MessageBody;
pub use new_submission::NewSubmission;
pub use sender_name::SenderName;
pub use validation_error::ValidationError;
