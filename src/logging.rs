//! Logging setup for the chronos CLI
//!
//! Diagnostics go to stderr so stdout carries only tree output and selected
//! paths.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "chronos=warn",
        1 => "chronos=info",
        2 => "chronos=debug",
        _ => "chronos=trace",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init(verbosity: u8, ansi: bool) -> Result<(), TryInitError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(ansi)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stderr_layer).try_init()
}
