use std::net::TcpListener;

use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use secrecy::ExposeSecret;
use secrecy::Secret;
use tera::Tera;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::SubscriberEmail;
use crate::email_client::EmailClient;
use crate::routes::health_check;
use crate::routes::subscribe;
use crate::routes::subscription_form;
use crate::routes::SUBSCRIPTION_PATH;
use crate::templates::build_templates;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the listener and build every shared resource (email client,
    /// templates, flash message store); fails early on invalid configuration.
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(addr)?;

        // with port 0, the OS assigns a random free port
        let port = listener.local_addr()?.port();

        let email_client = cfg.email_client.client()?;
        let organizer = cfg
            .subscriptions
            .organizer()
            .map_err(anyhow::Error::msg)?;
        let templates = build_templates()?;

        let server = run(
            listener,
            email_client,
            templates,
            organizer,
            cfg.application.base_url,
            cfg.application.hmac_secret,
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Consumes `self`; should be the final call (or passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// Wrapper for top-level application `base_url` (a raw `String` in `Data`
/// could conflict with any other `String`)
#[derive(Debug)]
pub struct AppBaseUrl(pub String);

/// Every confirmation email is copied to this address
#[derive(Debug)]
pub struct Organizer(pub SubscriberEmail);

/// The server is not responsible for binding to an address, it only listens to
/// an already bound one.
///
/// Declares all endpoints.
pub fn run(
    listener: TcpListener,
    email_client: EmailClient,
    templates: Tera,
    organizer: SubscriberEmail,
    base_url: String,
    hmac_secret: Secret<String>,
) -> Result<Server, anyhow::Error> {
    let secret_key = Key::try_from(hmac_secret.expose_secret().as_bytes())
        .map_err(|e| anyhow::anyhow!("hmac_secret must be at least 64 bytes: {e:?}"))?;

    // flash messages live in a signed cookie, no server-side session required
    let cookie_store = CookieMessageStore::builder(secret_key).build();
    let msg_framework = FlashMessagesFramework::builder(cookie_store).build();

    // `Data` is an `Arc`: one copy shared by every worker
    let email_client = Data::new(email_client);
    let templates = Data::new(templates);
    let organizer = Data::new(Organizer(organizer));
    let base_url = Data::new(AppBaseUrl(base_url));

    // the closure is run once per worker (one per core), hence the clones
    let server = HttpServer::new(move || {
        App::new()
            .wrap(msg_framework.clone())
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route(SUBSCRIPTION_PATH, web::get().to(subscription_form))
            .route(SUBSCRIPTION_PATH, web::post().to(subscribe))
            .app_data(email_client.clone())
            .app_data(templates.clone())
            .app_data(organizer.clone())
            .app_data(base_url.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
