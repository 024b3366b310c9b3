use {
    crate::Config,
    std::{io, sync::Once},
    tracing_subscriber::{
        EnvFilter,
        Layer,
        layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    },
};

/// Initializes the global tracing subscriber.
///
/// Logs are always written to stderr; stdout is left to the binaries for
/// their actual output.
///
/// # Panics
///
/// Panics if the filter directives are invalid or if a global subscriber was
/// already set.
pub fn initialize(config: &Config) {
    set_tracing_subscriber(config);
}

/// Like [`initialize`], but can be called multiple times in a row. Later
/// calls are ignored. Useful for tests.
pub fn initialize_reentrant(config: &Config) {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| set_tracing_subscriber(config));
}

fn set_tracing_subscriber(config: &Config) {
    let filter = EnvFilter::try_new(&config.env_filter)
        .unwrap_or_else(|err| panic!("invalid log filter {:?}: {err}", config.env_filter));

    let fmt_layer = if config.use_json_format {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_filter(filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(false)
            .with_filter(filter)
            .boxed()
    };

    tracing_subscriber::registry().with(fmt_layer).init();
    tracing::debug!(filter = %config.env_filter, "initialized tracing");
}
