use actix_web::web;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use super::render_form;
use super::FlashView;
use super::SubscriptionForm;
use crate::utils::error_500;

/// `GET /inscricao/`
///
/// Empty registration form. After a successful `POST`, the browser lands here
/// again (via redirect) and the success flash message is shown above the
/// form.
#[tracing::instrument(name = "Rendering subscription form", skip_all)]
pub async fn subscription_form(
    req: HttpRequest,
    templates: web::Data<Tera>,
    flash_messages: IncomingFlashMessages,
) -> Result<HttpResponse, actix_web::Error> {
    let messages = FlashView::from_incoming(&flash_messages);
    render_form(&req, &templates, &SubscriptionForm::unbound(), &messages).map_err(error_500)
}
