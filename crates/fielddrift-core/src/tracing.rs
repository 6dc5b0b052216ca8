//! Tracing bootstrap.
//!
//! Library code only emits `tracing` events. Binaries and tests that want to
//! see them call [`init_tracing`] once.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive.
pub const LOG_ENV_VAR: &str = "FIELDDRIFT_LOG";

/// Filter used when `FIELDDRIFT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "fielddrift_core=info,fielddrift_analysis=info";

static INIT: Once = Once::new();

/// Install a global `fmt` subscriber filtered by `FIELDDRIFT_LOG`.
///
/// Safe to call repeatedly. If another subscriber is already installed the
/// call is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init();
    });
}
