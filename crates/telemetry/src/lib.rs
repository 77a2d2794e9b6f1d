//! Tracing/logging bootstrap.

use catalogo_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Install the global fmt subscriber described by `settings`.
///
/// Fails if the filter directives are invalid or a subscriber is already set.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = build_filter(settings.filter.as_deref())?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match settings.log_format {
        LogFormat::Pretty => subscriber
            .pretty()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize pretty logger: {}", e))?,
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to initialize JSON logger: {}", e))?,
    }

    tracing::info!(
        target: "catalogo-telemetry",
        format = ?settings.log_format,
        "logging initialized"
    );

    Ok(())
}

/// Explicit directives win, then `RUST_LOG`, then [`DEFAULT_FILTER`].
fn build_filter(directives: Option<&str>) -> anyhow::Result<EnvFilter> {
    match directives {
        Some(directives) => Ok(EnvFilter::try_new(directives)?),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directives_are_parsed() {
        let filter = build_filter(Some("warn,catalogo_app=debug")).unwrap();
        assert!(filter.to_string().contains("catalogo_app=debug"));
    }

    #[test]
    fn invalid_level_is_rejected() {
        assert!(build_filter(Some("catalogo_app=ruidoso")).is_err());
    }

    #[test]
    fn missing_directives_fall_back() {
        assert!(build_filter(None).is_ok());
    }
}
