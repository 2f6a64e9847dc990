//! Request-path observability switches, fixed once at startup.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

static RUNTIME: OnceLock<RuntimeSettings> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RuntimeSettings {
    pub(super) slow_request_threshold: Duration,
    pub(super) parent_propagation: bool,
    pub(super) metrics: bool,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            parent_propagation: false,
            metrics: true,
        }
    }
}

impl From<&ObservabilityConfig> for RuntimeSettings {
    fn from(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: Duration::from_millis(config.slow_request_threshold_ms),
            // Parent contexts are only useful when spans are exported.
            parent_propagation: config.otel_enabled && config.otel_parent_propagation_enabled,
            metrics: config.metrics_enabled,
        }
    }
}

/// Later calls are ignored; the first configuration wins.
pub(super) fn install(settings: RuntimeSettings) {
    _ = RUNTIME.set(settings);
}

/// Installed settings, or defaults when running without [`install`] (tests).
pub(super) fn runtime() -> RuntimeSettings {
    RUNTIME.get().copied().unwrap_or_default()
}
