//! Blocking HTTP client used for version lookups
//!
//! Every call blocks the calling thread for the whole round trip. A UI shell
//! is expected to run these calls off its event thread.
//!
//! # Examples
//!
//! ```no_run
//! use napcat_desktop_lib::http::{HttpClient, HttpResult};
//!
//! fn latest_napcat_tag() -> HttpResult<Option<String>> {
//!     let client = HttpClient::new()?;
//!     let release = client
//!         .get_json_object("https://api.github.com/repos/NapNeko/NapCatQQ/releases/latest")?;
//!     Ok(release.get_string("tag_name"))
//! }
//! ```

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::{collections::HashMap, time::Duration, time::Instant};

use super::{
    error::{HttpError, HttpResult},
    types::{HttpResponse, JsonObject},
};
use crate::constants::{APP_NAME, APP_VERSION};

/// HTTP client wrapper around `reqwest::blocking::Client`
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    /// Creates a client that keeps the transport's default timeouts
    pub fn new() -> HttpResult<Self> {
        Self::new_with_timeout(None)
    }

    /// Creates a client with an optional total request timeout
    pub fn new_with_timeout(timeout: Option<Duration>) -> HttpResult<Self> {
        let mut headers = HeaderMap::new();
        // The release API rejects requests without a User-Agent
        let agent = HeaderValue::from_str(&format!("{}/{}", APP_NAME, APP_VERSION))
            .map_err(|e| HttpError::Config(e.to_string()))?;
        headers.insert(USER_AGENT, agent);

        let mut builder = reqwest::blocking::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Sends a GET request and reads the whole body.
    ///
    /// Any status is returned as-is; use [`HttpClient::get_json_object`] when
    /// a 2xx JSON object is required.
    pub fn get(&self, url: &str) -> HttpResult<HttpResponse> {
        let started = Instant::now();
        let response = self.client.get(url).send()?;

        let status = response.status().as_u16();
        let headers = Self::extract_headers(response.headers());
        log::info!("GET {} -> {}", url, status);
        log::debug!("Response headers: {:?}", headers);

        let body = response.text().map_err(|e| {
            HttpError::Response(rust_i18n::t!("http.request_failed", error = e.to_string()).to_string())
        })?;
        let elapsed = started.elapsed();
        log::info!("GET {} took {}", url, format_elapsed(elapsed));

        Ok(HttpResponse {
            status,
            headers,
            body,
            elapsed,
        })
    }

    /// Sends a GET request and decodes a 2xx response as a JSON object
    pub fn get_json_object(&self, url: &str) -> HttpResult<JsonObject> {
        let response = self.get(url)?;
        if !response.is_success() {
            return Err(HttpError::Status(response.status));
        }
        let object = response.json_object()?;
        log::debug!("Response data: {:?}", object.0);
        Ok(object)
    }

    /// Extracts headers from reqwest::HeaderMap into a HashMap
    fn extract_headers(headers: &HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect()
    }
}

/// Millisecond precision, saturating for absurdly long durations
fn format_elapsed(elapsed: Duration) -> String {
    let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_millis(millis)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{spawn_test_server, TestRoute};

    #[test]
    fn test_get_json_object() {
        let server = spawn_test_server(vec![TestRoute::json(
            "/release",
            r#"{"tag_name": "v4.1.0", "body": "notes"}"#,
        )]);
        let client = HttpClient::new().unwrap();

        let object = client.get_json_object(&server.url("/release")).unwrap();
        assert_eq!(object.get_string("tag_name"), Some("v4.1.0".to_string()));
    }

    #[test]
    fn test_user_agent_is_sent() {
        let server = spawn_test_server(vec![TestRoute::echo_user_agent("/ua")]);
        let client = HttpClient::new().unwrap();

        let response = client.get(&server.url("/ua")).unwrap();
        assert!(response.body.starts_with(APP_NAME));
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let server = spawn_test_server(vec![TestRoute::status("/down", 503)]);
        let client = HttpClient::new().unwrap();

        let response = client.get(&server.url("/down")).unwrap();
        assert_eq!(response.status, 503);
        assert!(matches!(
            client.get_json_object(&server.url("/down")),
            Err(HttpError::Status(503))
        ));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_micros(1_500_700)), "1s 500ms");
        assert_eq!(format_elapsed(Duration::from_micros(900)), "0s");
        // saturates instead of wrapping
        assert!(format_elapsed(Duration::MAX).contains("years"));
    }

    #[test]
    fn test_connection_refused() {
        let client = HttpClient::new_with_timeout(Some(Duration::from_secs(5))).unwrap();
        assert!(matches!(
            client.get("http://127.0.0.1:1/"),
            Err(HttpError::Request(_))
        ));
    }
}
