//! reqwest-backed transport for the Sloth API.
//!
//! Any response the server sends, whatever its status, is handed back as a
//! [`RawResponse`]. Only failures that leave no response to inspect
//! (timeouts, refused connections, DNS or TLS errors) become errors.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Client, Url};
use tracing::{debug, error, warn};

use crate::config::SlothApiClientOptions;
use crate::domain::{
    ApiRequest, AppError, ConfigError, HttpMethod, RawResponse, SlothTransport, TransportError,
};

/// Transport that sends requests with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpSlothTransport {
    http_client: Client,
    base_url: Url,
}

impl HttpSlothTransport {
    /// Create a transport for `base_url` with the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Self::with_client(http_client, base_url)
    }

    pub fn from_options(options: &SlothApiClientOptions) -> Result<Self, AppError> {
        Self::new(&options.base_url, options.timeout)
    }

    /// Wrap an existing reqwest client (useful for custom TLS or proxies)
    pub fn with_client(http_client: Client, base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            http_client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, segments: &[String]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ConfigError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        message,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

#[async_trait]
impl SlothTransport for HttpSlothTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, AppError> {
        let url = self.url_for(&request.segments)?;

        debug!(method = %request.method, url = %url, "Sending Sloth API request");

        let builder = match request.method {
            HttpMethod::Get => self.http_client.get(url),
            HttpMethod::Post => self.http_client.post(url),
        };
        let mut builder = builder
            .headers(request.headers)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "Sloth API request failed without a response");
            AppError::Transport(TransportError::from(e))
        })?;

        let status = response.status();
        let reason = status.canonical_reason().map(str::to_string);

        let body = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            // Failed responses are never decoded
            Err(e) if !status.is_success() => {
                warn!(status = %status, error = %e, "Discarding unreadable error body");
                Vec::new()
            }
            Err(e) => {
                error!(status = %status, error = %e, "Failed to read Sloth API response body");
                return Err(AppError::Transport(TransportError::from(e)));
            }
        };

        debug!(status = %status, bytes = body.len(), "Received Sloth API response");

        Ok(RawResponse {
            status,
            reason,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base_url: &str) -> HttpSlothTransport {
        HttpSlothTransport::new(base_url, Duration::from_secs(5)).unwrap()
    }

    fn segments(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_url_joins_segments_onto_base() {
        let t = transport("https://some.sloth.api.net/");
        let url = t.url_for(&segments(&["transactions", "abc"])).unwrap();
        assert_eq!(url.as_str(), "https://some.sloth.api.net/transactions/abc");
    }

    #[test]
    fn test_url_keeps_base_path_prefix() {
        let t = transport("https://some.sloth.api.net/v2");
        let url = t.url_for(&segments(&["transactions"])).unwrap();
        assert_eq!(url.as_str(), "https://some.sloth.api.net/v2/transactions");

        let t = transport("https://some.sloth.api.net/v2/");
        let url = t.url_for(&segments(&["transactions"])).unwrap();
        assert_eq!(url.as_str(), "https://some.sloth.api.net/v2/transactions");
    }

    #[test]
    fn test_url_encodes_each_segment() {
        let t = transport("https://some.sloth.api.net/");
        let url = t
            .url_for(&segments(&["transactions", "validate", "a/b c"]))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://some.sloth.api.net/transactions/validate/a%2Fb%20c"
        );
    }

    #[test]
    fn test_invalid_base_urls_rejected() {
        for bad in ["not a url", "mailto:sloth@example.com", "ftp://sloth.example.com/"] {
            let result = HttpSlothTransport::new(bad, Duration::from_secs(5));
            assert!(
                matches!(
                    result,
                    Err(AppError::Config(ConfigError::InvalidBaseUrl { .. }))
                ),
                "expected {bad} to be rejected"
            );
        }
    }
}
