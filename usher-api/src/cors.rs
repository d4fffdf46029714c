use axum::http::{header, HeaderMap, HeaderValue};

/// Permissive header set the seat-map widget depends on. Attached to every
/// response except the 401 short-circuit, including non-preflight responses,
/// so the exact values are pinned here rather than in a CORS layer.
pub fn apply(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
}
