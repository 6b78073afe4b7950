//! CLI interface for mlphone
//!
//! Provides the `mlphone` command-line driver: per-word keys, pairwise
//! comparison, pipeline tracing and persistent settings.

pub mod args;
pub mod commands;
pub mod paths;

use std::sync::Once;

pub use args::{Cli, Commands, OutputFormat};
pub use paths::{config_dir, default_config_path, Config};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=mlphone=trace` to see every substitution stage.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
