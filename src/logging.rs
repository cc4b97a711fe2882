use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const DEFAULT_DIRECTIVE: &str = "ledger_client=info,ledger=info";

/// Install a stderr `fmt` subscriber. `RUST_LOG` overrides the default
/// filter; `verbose` raises this crate to `debug`.
pub fn init(verbose: bool) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("ledger_client=debug,ledger=debug"),
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVE),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()
}
