//! Tracing initialization and subscriber setup.

use super::tracer::{self, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the plugin data directory.
pub const TRACE_FILE_NAME: &str = "reelfinder-otlp.json";

/// Level used when neither `RUST_LOG` nor `trace_level` is set.
const DEFAULT_LEVEL: &str = "info";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG`, when set and valid
/// 2. `config.trace_level`
/// 3. `"info"`
///
/// # File Location
///
/// Traces go to `reelfinder-otlp.json` in the plugin data directory. If the
/// directory cannot be created, tracing stays off.
///
/// Calling this more than once is harmless; only the first call installs a
/// subscriber.
pub fn init_tracing(config: &Config) {
    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        opentelemetry::KeyValue::new("service.name", SCOPE),
        opentelemetry::KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(config)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}

/// Filter directive taken from configuration when `RUST_LOG` is absent.
fn fallback_directive(config: &Config) -> &str {
    config
        .trace_level
        .as_deref()
        .map(str::trim)
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_prefers_configured_level() {
        let mut config = Config::default();
        assert_eq!(fallback_directive(&config), "info");

        config.trace_level = Some(" debug ".to_string());
        assert_eq!(fallback_directive(&config), "debug");

        config.trace_level = Some(String::new());
        assert_eq!(fallback_directive(&config), "info");
    }
}
