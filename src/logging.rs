//! Diagnostic logging to stderr.
//!
//! Stdout carries command output and the MCP stdio transport, so log events
//! always go to stderr.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "RESTEXT_LOG";

/// Filter used when `RESTEXT_LOG` is unset or unparsable.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "restext=debug" } else { "warn" }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(verbose: bool) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();

    // Already set when embedded in a host that installed its own subscriber
    let _ = tracing::subscriber::set_global_default(subscriber);
}
