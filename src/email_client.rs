use std::time::Duration;

use reqwest::Client;
use secrecy::ExposeSecret;
use secrecy::Secret;

use crate::domain::SubscriberEmail;

/// Client for a Postmark-compatible email API.
///
/// Establishing a HTTP connection is expensive, so a single `Client` (and its
/// connection pool) is built at startup and shared by all workers via
/// `web::Data`.
#[derive(Debug)]
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: SubscriberEmail,
    authorization_token: Secret<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

impl EmailClient {
    pub fn new(
        base_url: String,
        sender: SubscriberEmail,
        authorization_token: Secret<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    pub fn sender(&self) -> &SubscriberEmail { &self.sender }

    /// Send a single email to all `recipients`, in order (Postmark accepts a
    /// comma-separated `To` list). Any non-2xx response is an error.
    #[tracing::instrument(
        name = "Sending email",
        skip(self, recipients, html_content, text_content),
        fields(recipients = tracing::field::Empty)
    )]
    pub async fn send_email(
        &self,
        recipients: &[&SubscriberEmail],
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), reqwest::Error> {
        let to = recipients
            .iter()
            .map(|r| r.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        tracing::Span::current().record("recipients", tracing::field::display(&to));

        let url = format!("{}/email", self.base_url);
        let body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: &to,
            subject,
            html_body: html_content,
            text_body: text_content,
        };
        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| {
                tracing::error!(error.cause_chain = ?e, "email API rejected the request");
                e
            })?;
        Ok(())
    }
}
