use std::fmt::Debug;

use actix_web::http::StatusCode;
use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web_flash_messages::FlashMessage;
use tera::Context;
use tera::Tera;

use super::render_form;
use super::SubscriptionForm;
use super::SubscriptionFormData;
use super::SUBSCRIPTION_PATH;
use crate::csrf;
use crate::domain::Subscription;
use crate::email_client::EmailClient;
use crate::routes::error_chain_fmt;
use crate::startup::AppBaseUrl;
use crate::startup::Organizer;
use crate::templates::SUBSCRIPTION_EMAIL_HTML;
use crate::templates::SUBSCRIPTION_EMAIL_TEXT;
use crate::utils::redirect;

pub const CONFIRMATION_SUBJECT: &str = "Confirmação de inscrição";
pub const SUCCESS_MESSAGE: &str = "Inscricao realizada com sucesso!";
pub const CSRF_FAILURE: &str = "Token CSRF ausente ou inválido.";

/// Validation failures are not errors: they re-render the form with 200.
/// Everything here is unexpected, and maps to 500.
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Failed to render template")]
    Render(#[from] tera::Error),
    #[error("Failed to send confirmation email")]
    SendEmail(#[source] reqwest::Error),
}

impl Debug for SubscribeError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode { StatusCode::INTERNAL_SERVER_ERROR }
}

/// One email, addressed to the organizer and the registrant (in that order),
/// carrying every submitted value.
#[tracing::instrument(
    name = "Sending confirmation email",
    skip(email_client, templates, subscription, base_url)
)]
async fn send_confirmation_email(
    email_client: &EmailClient,
    templates: &Tera,
    organizer: &Organizer,
    subscription: &Subscription,
    base_url: &str,
) -> Result<(), SubscribeError> {
    let mut ctx = Context::new();
    ctx.insert("name", subscription.name.as_ref());
    ctx.insert("cpf", subscription.cpf.as_ref());
    ctx.insert("email", subscription.email.as_ref());
    ctx.insert("phone", subscription.phone.as_ref());
    ctx.insert("site_url", base_url);

    let text_body = templates.render(SUBSCRIPTION_EMAIL_TEXT, &ctx)?;
    let html_body = templates.render(SUBSCRIPTION_EMAIL_HTML, &ctx)?;

    email_client
        .send_email(
            &[&organizer.0, &subscription.email],
            CONFIRMATION_SUBJECT,
            &html_body,
            &text_body,
        )
        .await
        .map_err(SubscribeError::SendEmail)
}

/// `POST /inscricao/`
///
/// On success, sends the confirmation email and redirects (302) back to the
/// form with a success flash message. On a validation (or CSRF) failure, the
/// bound form is re-rendered with its errors and status 200.
///
/// # Request example
///
/// ```sh
///     curl -v -c jar -b jar http://127.0.0.1:8000/inscricao/
///     curl -v -b jar --data 'name=Jose&cpf=12345678901&email=jose%40mailinator.com&phone=43-3358-6180&csrf_token=...' http://127.0.0.1:8000/inscricao/
/// ```
#[tracing::instrument(
    name = "Subscribing to the event",
    skip(req, form, templates, email_client, organizer, base_url),
    fields(
        subscriber_name = %form.name,
        subscriber_email = %form.email,
    )
)]
pub async fn subscribe(
    req: HttpRequest,
    form: web::Form<SubscriptionFormData>,
    templates: web::Data<Tera>,
    email_client: web::Data<EmailClient>,
    organizer: web::Data<Organizer>,
    base_url: web::Data<AppBaseUrl>,
) -> Result<HttpResponse, SubscribeError> {
    let data = form.into_inner();

    if let Err(e) = csrf::verify(&req, &data.csrf_token) {
        tracing::warn!(error.message = %e, "csrf check failed");
        let form = SubscriptionForm::reject(&data, CSRF_FAILURE);
        return Ok(render_form(&req, &templates, &form, &[])?);
    }

    let subscription = match SubscriptionForm::bind(&data) {
        Ok(subscription) => subscription,
        Err(form) => {
            tracing::info!("invalid subscription form");
            return Ok(render_form(&req, &templates, &form, &[])?);
        }
    };

    send_confirmation_email(
        &email_client,
        &templates,
        &organizer,
        &subscription,
        &base_url.0,
    )
    .await?;

    tracing::info!("subscription confirmed");
    FlashMessage::success(SUCCESS_MESSAGE.to_string()).send();
    Ok(redirect(SUBSCRIPTION_PATH))
}
