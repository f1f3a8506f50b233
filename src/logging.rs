//! Structured logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the level from `BIKEBOARD_LOG` applies.
//! Output goes to stderr.

use crate::settings::DashboardSettings;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber, then report settings that were skipped
/// while reading the environment.
pub fn init(settings: &DashboardSettings) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    for name in &settings.ignored {
        tracing::warn!("Ignoring unknown setting {}", name);
    }
}
