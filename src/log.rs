// src/log.rs
use tracing_subscriber::{EnvFilter, fmt::time::uptime};

/// Install the stderr subscriber. `RUST_LOG` wins over `verbose`.
/// Timestamps are elapsed time since start, like the old debug log.
pub fn init(verbose: bool) {
    let default = if verbose { "tagalog_scrape=debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init: tests and embedders may already have a subscriber
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_timer(uptime())
        .with_target(false)
        .try_init();
    if let Err(e) = installed {
        // lands in whichever subscriber is already active
        tracing::debug!(error = %e, "keeping existing tracing subscriber");
    }
}
