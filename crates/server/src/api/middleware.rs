//! Metrics middleware for API routes.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::{
    HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION, UNMATCHED_PATH,
};

/// Records request duration, count and requests in flight.
///
/// Requests are labelled with the route template (`/api/v1/sessions/{mode}`),
/// never the raw path, so the label set is bounded by the route table.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    HTTP_REQUESTS_IN_FLIGHT.inc();
    let response = next.run(request).await;
    HTTP_REQUESTS_IN_FLIGHT.dec();

    let status = response.status().as_u16().to_string();
    HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path, &status])
        .observe(start.elapsed().as_secs_f64());
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}
