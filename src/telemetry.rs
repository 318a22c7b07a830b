use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::BunyanFormattingLayer;
use tracing_bunyan_formatter::JsonStorageLayer;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Compose a bunyan (JSON) `tracing` subscriber. `RUST_LOG` takes precedence
/// over `filter_level`.
///
/// 'subscriber' is a `tracing` trait, unrelated to the people subscribing to
/// the event.
///
/// Note: `sink` must be a closure (e.g. `std::io::stdout`), not a return value.
pub fn get_subscriber<Sink>(
    name: &str,
    filter_level: &str,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    // higher-ranked trait bound: sink must implement `MakeWriter` for every
    // choice of the lifetime `'a`. `Send + Sync` is needed by
    // `set_global_default`
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    // requires feature `env-filter`
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_level));
    let fmt_layer = BunyanFormattingLayer::new(name.to_string(), sink);
    // `JsonStorageLayer` collects span fields so that the bunyan layer can
    // print them on every event inside the span
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(fmt_layer)
}

/// Register `subscriber` globally. Must be called once, before the app is
/// built; `LogTracer` redirects `log` records (e.g. from actix) into it.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) -> Result<(), anyhow::Error> {
    LogTracer::init()?; // required for `actix_web` logs to be captured by `Subscriber`
    set_global_default(subscriber)?;
    Ok(())
}
