use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::app_config::SeatsioConfig;

static USER_AGENT: &str = "Usher-Broker/0.1";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("seats.io request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("seats.io returned {status}: {body}")]
    Api { status: StatusCode, body: String },
}

/// HTTP client for the seats.io reservation API.
///
/// Holds the secret key so handlers never touch raw credentials; every
/// outbound call carries Basic auth with the secret key as username and an
/// empty password, the wire form seats.io requires.
#[derive(Debug, Clone)]
pub struct SeatsClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
    event_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HoldTokenResponse {
    hold_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookObjectsRequest<'a> {
    objects: Vec<&'a str>,
    hold_token: &'a str,
}

impl SeatsClient {
    pub fn new(cfg: &SeatsioConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            secret_key: cfg.secret_key.clone(),
            event_key: cfg.event_key.clone(),
        })
    }

    pub fn event_key(&self) -> &str {
        &self.event_key
    }

    /// Issue a short-lived hold token. The token is opaque; seats.io owns
    /// its expiry.
    pub async fn create_hold_token(&self) -> Result<String, UpstreamError> {
        let response = self
            .http
            .post(format!("{}/hold-tokens", self.base_url))
            .basic_auth(&self.secret_key, Some(""))
            .send()
            .await?;

        let response = read_success(response).await?;
        let issued: HoldTokenResponse = response.json().await?;
        Ok(issued.hold_token)
    }

    /// Book one seat on the configured event. The hold token is passed
    /// through verbatim.
    pub async fn book_seat(&self, seat_id: &str, hold_token: &str) -> Result<(), UpstreamError> {
        let response = self
            .http
            .post(format!(
                "{}/events/{}/actions/book",
                self.base_url, self.event_key
            ))
            .basic_auth(&self.secret_key, Some(""))
            .json(&BookObjectsRequest {
                objects: vec![seat_id],
                hold_token,
            })
            .send()
            .await?;

        read_success(response).await?;
        Ok(())
    }
}

/// Non-2xx responses are drained so the body survives as error detail.
async fn read_success(response: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!("seats.io call failed with {}: {}", status, body);
    Err(UpstreamError::Api { status, body })
}

#[cfg(test)]
mod tests {
    use base64::prelude::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> SeatsClient {
        SeatsClient::new(&SeatsioConfig {
            secret_key: "sk_test_123".to_string(),
            event_key: "spring-gala".to_string(),
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        })
        .expect("client should build")
    }

    fn basic_credential() -> String {
        format!("Basic {}", BASE64_STANDARD.encode("sk_test_123:"))
    }

    #[tokio::test]
    async fn create_hold_token_sends_basic_auth_and_parses_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hold-tokens"))
            .and(header("authorization", basic_credential()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "holdToken": "tok-abc",
                "expiresInSeconds": 900,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = test_client(&server.uri())
            .create_hold_token()
            .await
            .expect("hold token should be issued");

        assert_eq!(token, "tok-abc");
    }

    #[tokio::test]
    async fn create_hold_token_carries_upstream_body_on_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hold-tokens"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid secret key"))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .create_hold_token()
            .await
            .expect_err("non-2xx must fail");

        assert!(err.to_string().contains("invalid secret key"));
        assert!(
            matches!(err, UpstreamError::Api { status, .. } if status == StatusCode::UNAUTHORIZED)
        );
    }

    #[tokio::test]
    async fn book_seat_posts_single_object_list_with_verbatim_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/spring-gala/actions/book"))
            .and(header("authorization", basic_credential()))
            .and(body_json(json!({
                "objects": ["A-12"],
                "holdToken": "tok-abc",
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server.uri())
            .book_seat("A-12", "tok-abc")
            .await
            .expect("booking should succeed");
    }

    #[tokio::test]
    async fn book_seat_surfaces_upstream_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/events/spring-gala/actions/book"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("hold token expired"),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .book_seat("A-12", "tok-stale")
            .await
            .expect_err("rejected booking must fail");

        assert!(err.to_string().contains("hold token expired"));
    }
}
