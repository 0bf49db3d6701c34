//! Request gateway for the National Weather Service API.
//!
//! Every failure mode (connection error, timeout, non-2xx status, malformed
//! body) collapses into `None`. The cause is logged and goes no further.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::Value;

use crate::constants::{ACCEPT_GEO_JSON, USER_AGENT};
use crate::error::FetchError;

#[derive(Clone)]
pub struct NwsClient {
    client: Arc<Client>,
    base_url: Arc<str>,
}

impl NwsClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// Idle connections are not kept, so each request opens and closes its
    /// own connection. Redirects are not followed: only a 2xx answer counts
    /// as data.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_GEO_JSON));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn alerts_url(&self, state: &str) -> String {
        format!("{}/alerts/active/area/{}", self.base_url, state)
    }

    pub fn points_url(&self, latitude: f64, longitude: f64) -> String {
        format!("{}/points/{},{}", self.base_url, latitude, longitude)
    }

    /// Fetches `url` and decodes the body as JSON, or returns `None`.
    pub async fn fetch(&self, url: &str) -> Option<Value> {
        match self.try_fetch(url).await {
            Ok(data) => Some(data),
            Err(error) => {
                tracing::warn!(%url, %error, "NWS request returned no data");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &str) -> Result<Value, FetchError> {
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json::<Value>().await.map_err(FetchError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REQUEST_TIMEOUT;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> NwsClient {
        NwsClient::new(&server.uri(), REQUEST_TIMEOUT).unwrap()
    }

    #[tokio::test]
    async fn fetch_returns_decoded_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/alerts/active/area/CA"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"features": []})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let data = client.fetch(&client.alerts_url("CA")).await.unwrap();
        assert_eq!(data, serde_json::json!({"features": []}));
    }

    #[tokio::test]
    async fn fetch_sends_fixed_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("user-agent", "weather-app/1.0"))
            .and(header("accept", "application/geo+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.fetch(&format!("{}/anything", server.uri())).await.is_some());
    }

    #[tokio::test]
    async fn fetch_masks_client_and_server_errors() {
        let server = MockServer::start().await;
        Mock::given(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(path("/broken"))
            .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.fetch(&format!("{}/missing", server.uri())).await.is_none());
        assert!(client.fetch(&format!("{}/broken", server.uri())).await.is_none());
    }

    #[tokio::test]
    async fn fetch_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(path("/moved"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("location", format!("{}/target", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(path("/target"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.fetch(&format!("{}/moved", server.uri())).await.is_none());
    }

    #[tokio::test]
    async fn fetch_masks_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.fetch(&server.uri()).await.is_none());
    }

    #[tokio::test]
    async fn fetch_masks_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = NwsClient::new(&server.uri(), Duration::from_millis(50)).unwrap();
        assert!(client.fetch(&server.uri()).await.is_none());
    }

    #[tokio::test]
    async fn fetch_masks_malformed_url() {
        let client = NwsClient::new("https://api.weather.gov", REQUEST_TIMEOUT).unwrap();
        assert!(client.fetch("not a url").await.is_none());
    }

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let client = NwsClient::new("https://api.weather.gov/", REQUEST_TIMEOUT).unwrap();
        assert_eq!(client.base_url(), "https://api.weather.gov");
        assert_eq!(
            client.alerts_url("NY"),
            "https://api.weather.gov/alerts/active/area/NY"
        );
        assert_eq!(
            client.points_url(39.7456, -97.0892),
            "https://api.weather.gov/points/39.7456,-97.0892"
        );
    }
}
