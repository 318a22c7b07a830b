pub mod configuration;
pub mod csrf;
pub mod domain;
pub mod email_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod templates;
pub mod utils;
