use async_trait::async_trait;
use http_client::HttpClient;

use crate::error::Result;

/// Raw request surface the connection state machine talks through
///
/// Implementations return the response body untouched; decoding happens in
/// the caller. Any non-success outcome must surface as an error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET` a path or path+query relative to the receiver base address.
    ///
    /// A full URL is refused with [`ApiError::InvalidPath`](crate::ApiError::InvalidPath).
    async fn request(&self, path: &str) -> Result<String>;

    /// `GET` an absolute URL, for resources outside the base address
    async fn request_url(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl Transport for HttpClient {
    async fn request(&self, path: &str) -> Result<String> {
        Ok(self.get(path).await?)
    }

    async fn request_url(&self, url: &str) -> Result<String> {
        Ok(self.get_url(url).await?)
    }
}
