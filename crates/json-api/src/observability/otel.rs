//! OTLP trace export.

use std::time::Duration;

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_exporter_otlp_endpoint.clone())
        .with_timeout(Duration::from_secs(config.otel_exporter_otlp_timeout_seconds))
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config.otel_trace_sample_ratio))
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}

/// Upstream sampling decisions win; root spans are sampled at `ratio`.
fn sampler(ratio: f64) -> Sampler {
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(0.0, 1.0) };

    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(ratio: f64) -> String {
        format!("{:?}", sampler(ratio))
    }

    #[test]
    fn out_of_range_ratios_are_clamped() {
        assert!(describe(-0.5).contains("TraceIdRatioBased(0.0)"), "negative ratio");
        assert!(describe(1.5).contains("TraceIdRatioBased(1.0)"), "ratio above one");
        assert!(describe(0.25).contains("TraceIdRatioBased(0.25)"), "in-range ratio");
    }

    #[test]
    fn root_sampling_defers_to_parent() {
        assert!(describe(0.5).starts_with("ParentBased("), "parent decision wins");
    }

    #[test]
    fn nan_ratio_samples_everything() {
        assert!(describe(f64::NAN).contains("TraceIdRatioBased(1.0)"), "nan ratio");
    }
}
