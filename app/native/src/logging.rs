//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "NOBORDERS_LOG";

const DEFAULT_FILTER: &str = "info";

/// Picks the filter directive: the environment wins over the configuration.
#[must_use]
pub fn filter_directive(env: Option<&str>, configured: Option<&str>) -> String {
    [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// An invalid directive falls back to `info` with a warning.
pub fn init(configured: Option<&str>) {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env.as_deref(), configured);

    let (filter, invalid) = match EnvFilter::try_new(&directive) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new(DEFAULT_FILTER), Some(err)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if let Some(err) = invalid {
        tracing::warn!(filter = %directive, error = %err, "invalid log filter, using info");
    }
}
