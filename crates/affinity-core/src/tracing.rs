//! Tracing subscriber setup for hosts that embed the checker.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::AffinityConfig;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "AFFINITY_LOG";

/// Install a global fmt subscriber. `AFFINITY_LOG` wins over the configured
/// level. Calling this twice is harmless; the second install is ignored.
pub fn init_tracing(config: &AffinityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}
