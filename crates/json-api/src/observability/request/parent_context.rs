//! Parent trace context extraction from HTTP headers.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// Parent context from `traceparent`/`tracestate` via the global propagator.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| extract_with(propagator, headers))
}

fn extract_with(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    // A fresh base context keeps untraced requests out of the in-process span chain.
    let context = propagator.extract_with_context(&Context::new(), &Headers(headers));

    context.span().span_context().is_valid().then_some(context)
}

#[derive(Debug)]
struct Headers<'a>(&'a HeaderMap);

impl Extractor for Headers<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.to_str().ok()
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry_sdk::propagation::TraceContextPropagator;
    use salvo::http::HeaderValue;

    use super::*;

    #[test]
    fn valid_traceparent_yields_parent() {
        let mut headers = HeaderMap::new();

        headers.insert(
            "traceparent",
            HeaderValue::from_static("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01"),
        );

        let context = extract_with(&TraceContextPropagator::new(), &headers);

        assert!(context.is_some(), "expected a remote parent context");
    }

    #[test]
    fn missing_traceparent_yields_none() {
        let context = extract_with(&TraceContextPropagator::new(), &HeaderMap::new());

        assert!(context.is_none(), "expected no parent context");
    }
}
