//! Private HTTP client for Denon/Marantz receiver communication
//!
//! Receivers expose their control surface as plain `GET` requests against
//! `/goform/*.xml` pages. This crate wraps a pooled async `reqwest` client
//! bound to a single `http://host:port` base address and hands raw response
//! bodies back to the caller. Decoding is left to `denon-parser`.

mod error;

pub use error::HttpError;

use std::time::Duration;

/// Default time allowed to establish a TCP connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default time allowed for a complete request/response exchange
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A minimal HTTP client bound to one receiver base address
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `http://{host}:{port}` with default timeouts
    pub fn new(host: &str, port: u16) -> Result<Self, HttpError> {
        Self::with_timeouts(host, port, DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a client for `http://{host}:{port}` with explicit timeouts
    pub fn with_timeouts(
        host: &str,
        port: u16,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, HttpError> {
        Self::from_base_url(
            &format!("http://{}:{}", host, port),
            connect_timeout,
            request_timeout,
        )
    }

    /// Create a client for an already formatted base URL
    pub fn from_base_url(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base address every relative request is resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a path or path+query against the base address
    ///
    /// Anything carrying its own scheme is refused; only [`HttpClient::get_url`]
    /// may leave the base address.
    pub fn url_for(&self, path: &str) -> Result<String, HttpError> {
        if reqwest::Url::parse(path).is_ok() {
            return Err(HttpError::InvalidPath(path.to_string()));
        }
        Ok(format!("{}/{}", self.base_url, path.trim_start_matches('/')))
    }

    /// `GET` a path relative to the base address and return the body
    pub async fn get(&self, path: &str) -> Result<String, HttpError> {
        let url = self.url_for(path)?;
        self.get_url(&url).await
    }

    /// `GET` an absolute URL and return the body
    ///
    /// Used for resources that live outside the configured port, such as the
    /// UPnP device description.
    pub async fn get_url(&self, url: &str) -> Result<String, HttpError> {
        tracing::trace!("GET {}", url);

        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
