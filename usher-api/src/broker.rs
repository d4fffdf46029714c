use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{cors, error::BrokerError, state::AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrokerRequest {
    action: Option<String>,
    seat_id: Option<String>,
    hold_token: Option<String>,
}

pub fn routes() -> Router<AppState> {
    // One endpoint for everything; non-POST methods other than OPTIONS fall
    // through to JSON dispatch rather than a 405.
    Router::new().route("/", any(handle))
}

async fn handle(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    // Preflight is answered before the body is touched.
    if method == Method::OPTIONS {
        return preflight();
    }

    match dispatch(&state, &headers, &body).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

fn preflight() -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    cors::apply(response.headers_mut());
    response
}

async fn dispatch(
    state: &AppState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<Response, BrokerError> {
    let request = parse_request(body)?;

    match request.action.as_deref() {
        Some("createHoldToken") => create_hold_token(state).await,
        Some("bookSeat") => book_seat(state, headers, request).await,
        _ => Err(BrokerError::InvalidAction),
    }
}

/// An absent body dispatches the same way as `{}`.
fn parse_request(body: &Bytes) -> Result<BrokerRequest, BrokerError> {
    if body.is_empty() {
        return Ok(BrokerRequest::default());
    }
    Ok(serde_json::from_slice(body)?)
}

async fn create_hold_token(state: &AppState) -> Result<Response, BrokerError> {
    let hold_token = state.seats.create_hold_token().await?;
    info!("issued hold token");

    Ok(ok_json(json!({
        "holdToken": hold_token,
        "eventKey": state.seats.event_key(),
    })))
}

async fn book_seat(
    state: &AppState,
    headers: &HeaderMap,
    request: BrokerRequest,
) -> Result<Response, BrokerError> {
    // 1. Authenticate the webhook sender before anything else.
    authorize_webhook(headers, &state.webhook_secret)?;

    // 2. Validate booking fields.
    let (seat_id, hold_token) = match (
        request.seat_id.filter(|s| !s.is_empty()),
        request.hold_token.filter(|s| !s.is_empty()),
    ) {
        (Some(seat_id), Some(hold_token)) => (seat_id, hold_token),
        _ => {
            return Err(BrokerError::Validation(
                "Missing seatId or holdToken in request body.".to_string(),
            ))
        }
    };

    // 3. Book against the configured event.
    state.seats.book_seat(&seat_id, &hold_token).await?;
    info!("booked seat {}", seat_id);

    Ok(ok_json(json!({
        "success": true,
        "message": format!("Seat {} booked successfully.", seat_id),
    })))
}

/// Exact string comparison against `Bearer <secret>`: case-sensitive, no
/// trimming, no alternate schemes.
fn authorize_webhook(headers: &HeaderMap, secret: &str) -> Result<(), BrokerError> {
    let expected = format!("Bearer {}", secret);
    match headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(presented) if presented == expected => Ok(()),
        _ => Err(BrokerError::Unauthorized),
    }
}

fn ok_json(payload: serde_json::Value) -> Response {
    let mut response = (StatusCode::OK, Json(payload)).into_response();
    cors::apply(response.headers_mut());
    response
}
