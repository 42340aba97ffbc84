use std::time::Duration;

use minutes_config::{OtlpConfig, OtlpProtocol};
use opentelemetry_otlp::{MetricExporter, SpanExporter, WithExportConfig, WithHttpConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider};
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};

pub fn meter_provider(config: &OtlpConfig, resource: Resource) -> anyhow::Result<SdkMeterProvider> {
    let endpoint = config.endpoint.as_str();

    let exporter = match config.protocol {
        OtlpProtocol::Grpc => MetricExporter::builder().with_tonic().with_endpoint(endpoint).build(),
        OtlpProtocol::HttpProto => MetricExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .with_headers(config.headers.clone())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build OTLP metric exporter for {endpoint}: {e}"))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(Duration::from_secs(config.export_interval_secs))
        .build();

    Ok(SdkMeterProvider::builder()
        .with_resource(resource)
        .with_reader(reader)
        .build())
}

pub fn tracer_provider(config: &OtlpConfig, resource: Resource) -> anyhow::Result<SdkTracerProvider> {
    let endpoint = config.endpoint.as_str();

    let exporter = match config.protocol {
        OtlpProtocol::Grpc => SpanExporter::builder().with_tonic().with_endpoint(endpoint).build(),
        OtlpProtocol::HttpProto => SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .with_headers(config.headers.clone())
            .build(),
    }
    .map_err(|e| anyhow::anyhow!("failed to build OTLP span exporter for {endpoint}: {e}"))?;

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_sampler(sampler(config.sampling_ratio))
        .with_batch_exporter(exporter)
        .build())
}

/// Ratio sampler for root spans; child spans follow their parent
fn sampler(ratio: f64) -> Sampler {
    let root = if ratio >= 1.0 {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    };

    Sampler::ParentBased(Box::new(root))
}
