//! Logging initialization for trackd.
//!
//! `RUST_LOG` wins when set; otherwise the verbosity flags pick the
//! default level.

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
pub fn init(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trackd={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
