use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Request audit middleware.
///
/// Emits one structured `tracing` event per request with the route area,
/// outcome, and latency. The bearer value is never logged.
pub async fn audit_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let area = area_of(&path);
    let authenticated = req.headers().contains_key("authorization");
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if response.status().is_server_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            area,
            authenticated,
            status,
            elapsed_ms,
            "api_request"
        );
    } else {
        tracing::info!(
            method = %method,
            path = %path,
            area,
            authenticated,
            status,
            elapsed_ms,
            "api_request"
        );
    }

    response
}

fn area_of(path: &str) -> &'static str {
    match path.trim_start_matches('/').split('/').next() {
        Some("intake") => "intake",
        Some("profile") => "profile",
        Some("instruments") => "instruments",
        Some("health") => "health",
        _ => "other",
    }
}
