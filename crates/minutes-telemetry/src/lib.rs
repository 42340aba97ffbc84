//! Logging and OpenTelemetry export for the minutes service

#![allow(clippy::must_use_candidate)]

mod metadata;
pub mod metrics;
mod otlp;

use minutes_config::TelemetryConfig;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider;
use opentelemetry_sdk::metrics::SdkMeterProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use opentelemetry::{
    KeyValue,
    metrics::{Counter, Histogram},
};

/// Keeps OTLP providers alive; shuts them down (flushing) on drop
#[derive(Default)]
pub struct TelemetryGuard {
    meter_provider: Option<SdkMeterProvider>,
    tracer_provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.meter_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shut down meter provider: {e}");
        }
        if let Some(provider) = self.tracer_provider.take()
            && let Err(e) = provider.shutdown()
        {
            eprintln!("failed to shut down tracer provider: {e}");
        }
    }
}

/// Install the global subscriber
///
/// Logs are always written to stdout, filtered by `log_filter` (an
/// `EnvFilter` directive; invalid directives fall back to `info`). Spans
/// and metrics are exported only when `[telemetry.otlp]` is configured.
///
/// # Errors
///
/// Returns an error if an OTLP exporter cannot be built
pub fn init(config: Option<&TelemetryConfig>, log_filter: &str) -> anyhow::Result<TelemetryGuard> {
    let filter = EnvFilter::try_new(log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let mut guard = TelemetryGuard::default();

    let Some((telemetry, otlp)) = config.and_then(|c| c.otlp.as_ref().map(|o| (c, o))) else {
        tracing_subscriber::registry().with(filter).with(fmt_layer).init();
        return Ok(guard);
    };

    let resource = metadata::build_resource(telemetry);

    if otlp.metrics {
        let provider = otlp::meter_provider(otlp, resource.clone())?;
        global::set_meter_provider(provider.clone());
        guard.meter_provider = Some(provider);
    }

    let otel_layer = if otlp.traces {
        let provider = otlp::tracer_provider(otlp, resource)?;
        let tracer = provider.tracer("minutes");
        global::set_tracer_provider(provider.clone());
        guard.tracer_provider = Some(provider);
        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    tracing::info!(
        endpoint = %otlp.endpoint,
        traces = otlp.traces,
        metrics = otlp.metrics,
        "OTLP export enabled"
    );

    Ok(guard)
}
