use std::sync::Arc;

use eventex::configuration::get_configuration;
use eventex::startup::Application;
use eventex::telemetry::get_subscriber;
use eventex::telemetry::init_subscriber;
use once_cell::sync::Lazy;
use reqwest::cookie::Jar;
use reqwest::redirect::Policy;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;

/// Init the tracing subscriber once for the whole test binary.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the sink is part of the subscriber's type, hence the two arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).expect("init tracing");
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).expect("init tracing");
        }
    };
});

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    /// Stands in for the Postmark API
    pub email_server: MockServer,
    /// Does not follow redirects, so that 302s can be asserted on
    pub api_client: reqwest::Client,
    /// Shares its cookies (csrf token, flash messages) with `api_client`
    pub browser: reqwest::Client,
}

impl TestApp {
    pub async fn get_subscription_form(&self) -> reqwest::Response {
        self.api_client
            .get(format!("{}/inscricao/", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get_subscription_form_html(&self) -> String {
        self.get_subscription_form().await.text().await.unwrap()
    }

    /// Raw urlencoded body, e.g. `name=Jose&cpf=...`
    pub async fn post_subscription_raw(
        &self,
        body: String,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/inscricao/", self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("execute request")
    }

    pub async fn post_subscription<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/inscricao/", self.addr))
            .form(body)
            .send()
            .await
            .expect("execute request")
    }

    /// Like a browser submitting the form: the 302 is followed with a `GET`
    pub async fn post_subscription_following_redirects<Body: serde::Serialize>(
        &self,
        body: &Body,
    ) -> reqwest::Response {
        self.browser
            .post(format!("{}/inscricao/", self.addr))
            .form(body)
            .send()
            .await
            .expect("execute request")
    }

    /// Load the form (which sets the csrf cookie) and return the hidden token
    pub async fn csrf_token(&self) -> String {
        let html = self.get_subscription_form_html().await;
        csrf_token_from(&html)
    }

    /// A complete, valid submission, including a csrf token matching the
    /// cookie jar
    pub async fn valid_subscription(&self) -> serde_json::Value {
        serde_json::json!({
            "name": "Jose Victor",
            "cpf": "12345678901",
            "email": "jose@mailinator.com",
            "phone": "43-3358-6180",
            "csrf_token": self.csrf_token().await,
        })
    }

    pub async fn mock_email_api(
        &self,
        status: u16,
        expected_calls: u64,
    ) {
        Mock::given(path("/email"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .expect(expected_calls)
            .mount(&self.email_server)
            .await;
    }

    /// Body of the only email sent so far, as JSON
    pub async fn sent_email(&self) -> serde_json::Value {
        let requests = self.email_server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one email");
        serde_json::from_slice(&requests[0].body).unwrap()
    }
}

pub fn csrf_token_from(html: &str) -> String {
    let marker = r#"name="csrf_token" value=""#;
    let start = html.find(marker).expect("csrf_token input") + marker.len();
    let len = html[start..].find('"').unwrap();
    html[start..start + len].to_string()
}

pub fn check_redirect(
    resp: &reqwest::Response,
    location: &str,
) {
    assert_eq!(resp.status().as_u16(), 302);
    assert_eq!(resp.headers().get("Location").unwrap(), location);
}

/// Spawn the application on a random port, with the email API pointed at a
/// fresh `MockServer`.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        cfg.application.port = 0;
        cfg.email_client.base_url = email_server.uri();
        cfg
    };

    let app = Application::build(cfg).await.expect("build application");
    let port = app.get_port();
    let addr = format!("http://127.0.0.1:{port}");
    tokio::spawn(app.run_until_stopped());

    let jar = Arc::new(Jar::default());
    let api_client = reqwest::Client::builder()
        .redirect(Policy::none())
        .cookie_provider(jar.clone())
        .build()
        .unwrap();
    let browser = reqwest::Client::builder()
        .cookie_provider(jar)
        .build()
        .unwrap();

    TestApp {
        addr,
        port,
        email_server,
        api_client,
        browser,
    }
}
