//! Logging setup for the harmonize CLI.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

/// Dependencies that are too chatty at debug level.
const NOISY_TARGETS: &[(&str, &str)] = &[
    ("hyper", "warn"),
    ("hyper_util", "warn"),
    ("reqwest", "info"),
    ("rustls", "warn"),
    ("h2", "warn"),
];

/// Maps `-q` / `-v` flags to a base level.
fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Builds the filter from the base level plus the noisy-crate overrides.
fn build_env_filter(level: &str) -> Result<EnvFilter> {
    let mut directives = vec![level.to_string()];
    for (target, lvl) in NOISY_TARGETS {
        directives.push(format!("{target}={lvl}"));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow!("Invalid tracing filter '{filter_str}': {e}"))
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the flags.
pub(crate) fn init(verbose: u8, quiet: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_env_filter(level_for(verbose, quiet))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}
