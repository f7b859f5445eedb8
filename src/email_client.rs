use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::ContactEmail;

/// Client for the transactional-email provider that forwards contact form
/// submissions to the site owner's mailbox.
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    recipient: ContactEmail,
    access_key: SecretString,
}

impl EmailClient {
    pub fn new(
        recipient: ContactEmail,
        base_url: String,
        access_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            recipient,
            access_key,
        })
    }

    /// The mailbox submissions are delivered to.
    pub fn recipient(&self) -> &ContactEmail {
        &self.recipient
    }

    /// Non-2xx answers and timeouts are reported as errors.
    pub async fn send_email(
        &self,
        sender_name: &str,
        reply_to: &ContactEmail,
        subject: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/submit", self.base_url);
        let request_body = SendEmailRequest {
            access_key: self.access_key.expose_secret(),
            name: sender_name,
            email: reply_to.as_ref(),
            message: text_content,
            to: self.recipient.as_ref(),
            subject,
            from_name: sender_name,
            replyto: reply_to.as_ref(),
        };
        self.http_client
            .post(&url)
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    access_key: &'a str,
    name: &'a str,
    email: &'a str,
    message: &'a str,
    to: &'a str,
    subject: &'a str,
    from_name: &'a str,
    replyto: &'a str,
}
