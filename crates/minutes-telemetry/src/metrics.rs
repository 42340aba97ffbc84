//! Metric name constants and recording helpers

use std::time::Instant;

use opentelemetry::metrics::{Counter, Histogram, Meter};

/// Record a duration measurement on a histogram
pub fn record_duration(histogram: &Histogram<f64>, start: Instant, attributes: &[opentelemetry::KeyValue]) {
    let duration = start.elapsed().as_secs_f64();
    histogram.record(duration, attributes);
}

/// Meter shared by every crate in the service
pub fn meter() -> Meter {
    opentelemetry::global::meter("minutes")
}

/// Build a seconds histogram with the given name
pub fn duration_histogram(name: &'static str, description: &'static str) -> Histogram<f64> {
    meter()
        .f64_histogram(name)
        .with_unit("s")
        .with_description(description)
        .build()
}

/// Build a monotonic counter with the given name
pub fn counter(name: &'static str, description: &'static str) -> Counter<u64> {
    meter().u64_counter(name).with_description(description).build()
}

// Pipeline metric names
pub const PIPELINE_REQUEST_COUNT: &str = "pipeline.request.count";
pub const PIPELINE_REQUEST_DURATION: &str = "pipeline.request.duration";

// Engine metric names
pub const STT_TRANSCRIPTION_DURATION: &str = "stt.transcription.duration";
pub const SUMMARIZER_REQUEST_DURATION: &str = "summarizer.request.duration";
