use minutes_config::TelemetryConfig;
use opentelemetry::KeyValue;
use opentelemetry_sdk::Resource;
use opentelemetry_semantic_conventions::resource as semconv;

/// Resource describing this process: service name, version, extra attributes
pub fn build_resource(config: &TelemetryConfig) -> Resource {
    let mut attributes = vec![
        KeyValue::new(semconv::SERVICE_NAME, config.service_name.clone()),
        KeyValue::new(semconv::SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
    ];

    let mut extra: Vec<_> = config.resource_attributes.iter().collect();
    extra.sort();
    attributes.extend(extra.into_iter().map(|(k, v)| KeyValue::new(k.clone(), v.clone())));

    Resource::builder().with_attributes(attributes).build()
}
