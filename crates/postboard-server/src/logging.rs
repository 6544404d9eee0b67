//! Tracing setup
//!
//! Logs go to stderr so `--json` output on stdout stays parseable.
//! `RUST_LOG` wins over the configured level.

use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Subscriber for the configuration phase, before the log level is known.
///
/// Use with `tracing::subscriber::with_default` so warnings raised while
/// loading configuration still reach stderr.
pub fn bootstrap() -> impl Subscriber + Send + Sync + 'static {
    bootstrap_with_writer(std::io::stderr)
}

fn bootstrap_with_writer<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_target(false)
        .with_writer(writer)
        .finish()
}

pub fn init(log_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { log_level };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "postboard_core={level},postboard_server={level},postboard={level},tower_http={level}"
        ))
    });

    // Ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
