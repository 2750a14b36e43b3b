//! Logging setup.
//!
//! The client only emits `tracing` events; a binary or test installs a
//! subscriber once. `RUST_LOG` takes precedence over the configured level.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered at `log_level`.
///
/// Returns `false` if a global subscriber was already installed, so calling
/// this from several tests is harmless.
pub fn init(log_level: LevelFilter) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Every target at `level` and above.
fn level_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::default().add_directive(level.into())
}
