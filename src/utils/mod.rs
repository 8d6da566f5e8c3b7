pub mod format;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "month_manager=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` replaces the default `month_manager=info` directive when set. Logs
/// go to stderr so they never interleave with shell output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter(directives.as_deref()))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Builds the filter from `RUST_LOG`-style directives, falling back to the
/// default when they are absent, blank, or unparseable.
fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}
