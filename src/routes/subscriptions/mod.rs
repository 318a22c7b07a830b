mod form;
mod get;
mod post;

use actix_web::http::header::ContentType;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;
use actix_web_flash_messages::Level;
use serde::Serialize;
use tera::Context;
use tera::Tera;

pub use form::*;
pub use get::*;
pub use post::*;

use crate::csrf;
use crate::templates::SUBSCRIPTION_FORM;

/// Both `GET` and `POST` are served from here; the trailing slash is part of
/// the route.
pub const SUBSCRIPTION_PATH: &str = "/inscricao/";

/// Flash message as seen by the template
#[derive(Debug, Serialize)]
pub struct FlashView {
    level: &'static str,
    content: String,
}

impl FlashView {
    pub fn from_incoming(flash_messages: &IncomingFlashMessages) -> Vec<Self> {
        flash_messages
            .iter()
            .map(|m| FlashView {
                level: match m.level() {
                    Level::Success => "success",
                    Level::Warning => "warning",
                    Level::Error => "error",
                    _ => "info",
                },
                content: m.content().to_string(),
            })
            .collect()
    }
}

/// Render `subscriptions/subscription_form.html` with status 200, and (re)set
/// the CSRF cookie so that the hidden token always matches it.
fn render_form(
    req: &HttpRequest,
    templates: &Tera,
    form: &SubscriptionForm,
    messages: &[FlashView],
) -> Result<HttpResponse, tera::Error> {
    let token = csrf::token_for(req);

    let mut ctx = Context::new();
    ctx.insert("form", form);
    ctx.insert("messages", messages);
    ctx.insert("csrf_token", &token);
    let body = templates.render(SUBSCRIPTION_FORM, &ctx)?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .cookie(csrf::cookie(&token))
        .body(body))
}
