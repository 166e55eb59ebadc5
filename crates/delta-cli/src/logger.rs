//! Logging setup for the `delta` binary.
//!
//! Logs go to stderr so stdout only carries the serialized payload.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 4] = ["delta_cli", "delta_config", "delta_graph", "delta_serializer"];

/// Install the global subscriber.
///
/// `--verbose` selects debug for the delta crates, `--quiet` errors only.
/// Otherwise `RUST_LOG` applies, falling back to warnings.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = if verbose {
        crate_filter("debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| crate_filter("warn"))
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::new(directives(level))
}

fn directives(level: &str) -> String {
    CRATES
        .iter()
        .map(|name| format!("{name}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
