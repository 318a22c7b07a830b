use eventex::configuration::get_configuration;
use eventex::startup::Application;
use eventex::telemetry::get_subscriber;
use eventex::telemetry::init_subscriber;

/// Initialise telemetry, load config, and serve until the server stops
#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    // only logs at `info` and higher are emitted, unless `RUST_LOG` says
    // otherwise; pipe stdout through `bunyan` to read them
    let subscriber = get_subscriber("eventex", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    // `APP_ENVIRONMENT` picks the yaml layer: `local` binds 127.0.0.1 (only
    // reachable from this machine), `production` binds 0.0.0.0 so that the
    // server is reachable from outside a container
    let cfg = get_configuration()?;
    let app = Application::build(cfg).await?;
    tracing::info!("listening on port {}", app.get_port());

    // unless polled, the server does nothing; this only returns on shutdown
    match app.run_until_stopped().await {
        Ok(()) => tracing::info!("server exited gracefully"),
        Err(e) => {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "server failed"
            );
            return Err(e.into());
        }
    }
    Ok(())
}
