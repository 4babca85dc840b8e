// Planto assist service client

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::PanelError;

pub const DEFAULT_SERVICE_URL: &str = "https://plantoassist.onrender.com";

#[derive(Debug, Clone)]
pub struct AssistClient {
    base_url: String,
    client: Client,
}

impl AssistClient {
    /// `request_timeout` of `None` leaves requests without a timeout.
    pub fn new(base_url: &str, request_timeout: Option<u64>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = request_timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON body and decode the JSON reply.
    ///
    /// Status codes are not inspected: an error-shaped JSON body from the
    /// service comes back as `Ok` and is only logged.
    pub async fn post(&self, endpoint: &'static str, body: &Value) -> Result<Value, PanelError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let reply: Value = serde_json::from_slice(&bytes)
            .map_err(|source| PanelError::Service { endpoint, source })?;

        if !status.is_success() {
            tracing::warn!(
                %status,
                endpoint,
                error = reply.get("error").and_then(serde_json::Value::as_str).unwrap_or_default(),
                message = reply.get("message").and_then(serde_json::Value::as_str).unwrap_or_default(),
                "assist service returned a non-success status"
            );
        }

        Ok(reply)
    }

    /// Probe the service's liveness route.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/test", self.base_url);

        self.client
            .get(&url)
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }
}

#[cfg(test)]
impl AssistClient {
    pub fn with_default_url() -> Result<Self> {
        Self::new(DEFAULT_SERVICE_URL, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        assert_ok!(AssistClient::new("http://localhost:5000", Some(30)));
    }

    #[test]
    fn test_client_with_default_url() {
        let client = AssistClient::with_default_url().unwrap();
        assert_eq!(client.base_url(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = AssistClient::new("http://localhost:5000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_post_sends_json_and_decodes_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/explain-code"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"code": "x = 1"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"explanation": "<p>x</p>"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AssistClient::new(&server.uri(), None).unwrap();
        let reply = client
            .post("/explain-code", &json!({"code": "x = 1"}))
            .await
            .unwrap();

        assert_eq!(reply, json!({"explanation": "<p>x</p>"}));
    }

    #[tokio::test]
    async fn test_post_error_status_with_json_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/run-code"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "No code provided. Please provide code to run."
            })))
            .mount(&server)
            .await;

        let client = AssistClient::new(&server.uri(), None).unwrap();
        let reply = assert_ok!(client.post("/run-code", &json!({"code": ""})).await);

        assert!(reply.get("output").is_none());
    }

    #[tokio::test]
    async fn test_post_non_json_body_is_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/debug-code"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let client = AssistClient::new(&server.uri(), None).unwrap();
        let err = assert_err!(client.post("/debug-code", &json!({"code": "x"})).await);

        assert!(matches!(
            err,
            PanelError::Service {
                endpoint: "/debug-code",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_post_connection_failure_is_transport_error() {
        let client = AssistClient::new("http://127.0.0.1:9", None).unwrap();
        let err = assert_err!(client.post("/run-code", &json!({"code": "x"})).await);

        assert!(matches!(err, PanelError::Transport(_)));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"output": "the route is working"})),
            )
            .mount(&server)
            .await;

        let client = AssistClient::new(&server.uri(), None).unwrap();
        assert!(client.health_check().await);

        let offline = AssistClient::new("http://127.0.0.1:9", None).unwrap();
        assert!(!offline.health_check().await);
    }
}
