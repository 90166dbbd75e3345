use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    BackendError, Config, ForecastEntry, ParsedCoordinate, Summary,
    model::ErrorBody,
};

use super::{Endpoint, WeatherBackend};

/// Client for the weather service's JSON API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(config.backend_url(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        position: ParsedCoordinate,
    ) -> Result<T, BackendError> {
        let url = format!("{}{}", self.base_url, endpoint.path());

        let res = self
            .http
            .get(&url)
            .query(&[
                ("latitude", position.latitude.to_string()),
                ("longitude", position.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|source| BackendError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| BackendError::Transport { endpoint, source })?;

        if !status.is_success() {
            tracing::warn!(
                %endpoint,
                %status,
                body = %truncate_body(&body),
                "weather service returned an error status"
            );
            return Err(BackendError::Status {
                endpoint,
                status,
                message: error_message(endpoint, status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|source| {
            tracing::warn!(%endpoint, body = %truncate_body(&body), "unexpected response body");
            BackendError::Decode { endpoint, source }
        })
    }
}

#[async_trait]
impl WeatherBackend for HttpBackend {
    async fn forecast(&self, position: ParsedCoordinate) -> Result<Vec<ForecastEntry>, BackendError> {
        self.get_json(Endpoint::Forecast, position).await
    }

    async fn summary(&self, position: ParsedCoordinate) -> Result<Summary, BackendError> {
        self.get_json(Endpoint::Summary, position).await
    }
}

/// The service's `error` field, or `"<endpoint> error: <code>"` when the
/// body is not JSON or carries no usable message.
fn error_message(endpoint: Endpoint, status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| format!("{endpoint} error: {}", status.as_u16()))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_service_text() {
        let msg = error_message(
            Endpoint::Summary,
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"db down"}"#,
        );
        assert_eq!(msg, "db down");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        let cases = ["", "not json", r#"{"detail":"x"}"#, r#"{"error":""}"#, r#"{"error":42}"#, "[]"];
        for body in cases {
            let msg = error_message(Endpoint::Forecast, StatusCode::BAD_GATEWAY, body);
            assert_eq!(msg, "forecast error: 502", "body {body:?}");
        }
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let long = "ż".repeat(300);
        let cut = truncate_body(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let backend = HttpBackend::new("http://localhost:8080/", Duration::from_secs(1))
            .expect("client builds");
        assert_eq!(backend.base_url(), "http://localhost:8080");
    }
}
