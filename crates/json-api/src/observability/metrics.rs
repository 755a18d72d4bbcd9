//! Prometheus metrics collection and exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

#[derive(Debug)]
struct HttpMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    invitation_events_total: IntCounterVec,
}

static HTTP_METRICS: OnceLock<Option<HttpMetrics>> = OnceLock::new();

/// Ledger events counted by the invitation handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InvitationEvent {
    Issued,
    Registered,
    Rejected,
    Expired,
}

impl InvitationEvent {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Issued => "issued",
            Self::Registered => "registered",
            Self::Rejected => "rejected",
            Self::Expired => "expired",
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        if let Some(metrics) = metrics() {
            metrics.requests_in_flight.inc();
            return Self { tracked: true };
        }

        Self { tracked: false }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_class = status_class(status_code);
    let status_code = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[method, route, status_class, status_code.as_str()])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

/// Count `count` occurrences of a ledger event.
pub(crate) fn record_invitation_event(event: InvitationEvent, count: u64) {
    if let Some(metrics) = metrics() {
        metrics
            .invitation_events_total
            .with_label_values(&[event.as_str()])
            .inc_by(count);
    }
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let metric_families = metrics.registry.gather();

    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metric_families, &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    let content_type = match HeaderValue::from_str(encoder.format_type()) {
        Ok(value) => value,
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

            return;
        }
    };

    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.render(String::from_utf8_lossy(&encoded).into_owned());
}

fn metrics() -> Option<&'static HttpMetrics> {
    HTTP_METRICS.get_or_init(build_metrics).as_ref()
}

fn build_metrics() -> Option<HttpMetrics> {
    let registry = Registry::new();

    let requests_total = IntCounterVec::new(
        Opts::new(
            "surecrm_json_http_requests_total",
            "Total HTTP requests partitioned by method, route, status class, and status code.",
        ),
        &["method", "route", "status_class", "status_code"],
    )
    .inspect_err(|source| error!("failed to create requests_total metric: {source}"))
    .ok()?;

    let request_duration_seconds = HistogramVec::new(
        HistogramOpts::new(
            "surecrm_json_http_request_duration_seconds",
            "HTTP request duration in seconds partitioned by method and route.",
        )
        .buckets(vec![
            0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "route"],
    )
    .inspect_err(|source| error!("failed to create request_duration metric: {source}"))
    .ok()?;

    let requests_in_flight = IntGauge::with_opts(Opts::new(
        "surecrm_json_http_requests_in_flight",
        "Current number of in-flight HTTP requests.",
    ))
    .inspect_err(|source| error!("failed to create in-flight gauge metric: {source}"))
    .ok()?;

    let invitation_events_total = IntCounterVec::new(
        Opts::new(
            "surecrm_json_invitation_events_total",
            "Invitation ledger events partitioned by event type.",
        ),
        &["event"],
    )
    .inspect_err(|source| error!("failed to create invitation_events metric: {source}"))
    .ok()?;

    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(requests_total.clone()),
        Box::new(request_duration_seconds.clone()),
        Box::new(requests_in_flight.clone()),
        Box::new(invitation_events_total.clone()),
    ];

    for collector in collectors {
        if let Err(source) = registry.register(collector) {
            error!("failed to register metric: {source}");
            return None;
        }
    }

    Some(HttpMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        invitation_events_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
