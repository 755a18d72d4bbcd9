//! W3C trace context carried by incoming requests.

use opentelemetry::{
    Context, global,
    propagation::{Extractor, TextMapPropagator},
    trace::TraceContextExt as _,
};
use salvo::http::{HeaderMap, HeaderName};

/// Remote parent for the request span, using the globally installed propagator.
pub(super) fn extract_parent_context(headers: &HeaderMap) -> Option<Context> {
    global::get_text_map_propagator(|propagator| remote_parent(propagator, headers))
}

/// `None` unless the headers carry a valid remote span, so untraced callers
/// start new root traces.
fn remote_parent(propagator: &dyn TextMapPropagator, headers: &HeaderMap) -> Option<Context> {
    let context = propagator.extract_with_context(&Context::new(), &RequestHeaders(headers));

    let has_remote_span = context.span().span_context().is_valid();

    has_remote_span.then_some(context)
}

#[derive(Debug)]
struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}
