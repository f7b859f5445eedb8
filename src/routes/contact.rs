use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{Span, field};

use crate::{
    domain::{ContactEmail, NewSubmission, ValidationError},
    email_client::EmailClient,
    startup::AppState,
};

/// Raw contact form payload, read leniently out of any JSON value.
#[derive(Debug)]
pub struct ContactFormData {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactFormData {
    /// Only a `null` body is refused. Any other value is searched for the
    /// three fields, so arrays and scalars simply have none of them.
    pub fn from_json(mut body: Value) -> Result<Self, BodyError> {
        if body.is_null() {
            return Err(BodyError::Null);
        }
        Ok(Self {
            name: text_field(&mut body, "name"),
            email: text_field(&mut body, "email"),
            message: text_field(&mut body, "message"),
        })
    }
}

// Strings are kept as-is, non-zero numbers and `true` are read as their
// text. `null`, `false`, `0`, arrays and objects count as missing.
fn text_field(body: &mut Value, key: &str) -> Option<String> {
    match body.get_mut(key).map(Value::take)? {
        Value::String(s) => Some(s),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

impl TryFrom<ContactFormData> for NewSubmission {
    type Error = ValidationError;

    fn try_from(value: ContactFormData) -> Result<Self, Self::Error> {
        NewSubmission::parse(value.name, value.email, value.message)
    }
}

/// What the contact form renders back to the visitor.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct SubmissionResult {
    pub success: bool,
    pub message: String,
}

impl SubmissionResult {
    fn accepted(submission: &NewSubmission, fallback: &ContactEmail) -> Self {
        Self {
            success: true,
            message: format!(
                "Thank you {}! Your message has been received. I'll get back to you at {} soon. \
                 If you don't hear from me within 24 hours, please email me directly at {}.",
                submission.name.as_ref(),
                submission.email,
                fallback
            ),
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            success: false,
            message,
        }
    }
}

pub async fn contact(
    State(app_state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let email_client = &app_state.email_client;
    // decoded by hand so that an unreadable body gets the JSON answer too
    let outcome = match decode_form(body) {
        Ok(form) => submit(email_client, form).await,
        Err(e) => Err(ContactError::MalformedRequest(e)),
    };

    match outcome {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!(error.cause_chain = ?e, error.message = %e, "Contact submission rejected");
            let result = e.to_result(email_client.recipient());
            (e.status_code(), Json(result)).into_response()
        }
    }
}

fn decode_form(body: Result<Bytes, BytesRejection>) -> Result<ContactFormData, BodyError> {
    let value: Value = serde_json::from_slice(&body?)?;
    ContactFormData::from_json(value)
}

/// Validate a submission and relay it to the email provider.
///
/// Once the submission is valid the outcome is always a success: provider
/// failures are logged and the visitor is pointed at the fallback address
/// instead.
#[tracing::instrument(
    name = "Relaying a contact submission",
    skip(email_client, form),
    fields(sender_name = tracing::field::Empty, sender_email = tracing::field::Empty)
)]
pub async fn submit(
    email_client: &EmailClient,
    form: ContactFormData,
) -> Result<SubmissionResult, ContactError> {
    let submission: NewSubmission = form.try_into()?;
    Span::current()
        .record("sender_name", field::display(submission.name.as_ref()))
        .record("sender_email", field::display(&submission.email));

    let submitted_at = Utc::now();
    tracing::info!(
        sender_name = %submission.name.as_ref(),
        sender_email = %submission.email,
        sender_message = %submission.message.as_ref(),
        timestamp = %submitted_at.to_rfc3339(),
        "New contact form submission"
    );

    match send_notification_email(email_client, &submission, submitted_at).await {
        Ok(()) => tracing::info!("Contact submission handed to the email provider"),
        Err(e) => tracing::warn!(
            error.cause_chain = ?e,
            error.message = %e,
            "Email provider failed, the visitor keeps the fallback address"
        ),
    }

    Ok(SubmissionResult::accepted(&submission, email_client.recipient()))
}

#[tracing::instrument(
    name = "Send a contact notification to the site owner",
    skip(email_client, submission, submitted_at)
)]
pub async fn send_notification_email(
    email_client: &EmailClient,
    submission: &NewSubmission,
    submitted_at: DateTime<Utc>,
) -> Result<(), reqwest::Error> {
    let subject = format!("Portfolio Contact from {}", submission.name.as_ref());
    let text_body = notification_body(submission, submitted_at);
    email_client
        .send_email(
            submission.name.as_ref(),
            &submission.email,
            &subject,
            &text_body,
        )
        .await
}

fn notification_body(submission: &NewSubmission, submitted_at: DateTime<Utc>) -> String {
    format!(
        "Portfolio Contact Form Submission\n\
         \n\
         Name: {name}\n\
         Email: {email}\n\
         Date: {date}\n\
         \n\
         Message:\n\
         {message}\n\
         \n\
         ---\n\
         This message was sent from your portfolio contact form.\n\
         Reply directly to: {email}\n",
        name = submission.name.as_ref(),
        email = submission.email,
        date = submitted_at.format("%Y-%m-%d %H:%M:%S UTC"),
        message = submission.message.as_ref(),
    )
}

#[derive(thiserror::Error, Debug)]
pub enum BodyError {
    #[error("couldn't read the request body, {0}")]
    Unreadable(#[from] BytesRejection),
    #[error("the request body is not valid json, {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("the request body is a json null")]
    Null,
}

#[derive(thiserror::Error, Debug)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("couldn't decode the contact request body")]
    MalformedRequest(#[from] BodyError),
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::Validation(_) => StatusCode::BAD_REQUEST,
            ContactError::MalformedRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_result(&self, fallback: &ContactEmail) -> SubmissionResult {
        match self {
            ContactError::Validation(e) => SubmissionResult::rejected(e.to_string()),
            ContactError::MalformedRequest(_) => SubmissionResult::rejected(format!(
                "Sorry, there was an error. Please email me directly at {}",
                fallback
            )),
        }
    }
}
