use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::TryStreamExt;
use reqwest::{header, StatusCode};

/// Error currency of transport implementations.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Response body as fallible byte chunks, consumed exactly once.
pub type BodyStream = BoxStream<'static, Result<Bytes, TransportError>>;

/// Status and body of a ranged GET.
pub struct RangeResponse {
    pub status: StatusCode,
    pub body: BodyStream,
}

/// The HTTP client seam.
///
/// The caller owns client construction, including any tunnel or proxy
/// routing and TLS policy; the downloader only ever asks it for one thing:
/// a GET carrying `Range: bytes=<offset>-`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Request the byte suffix of `url` starting at `offset`.
    ///
    /// `timeout`, when given, bounds the whole request including the body
    /// read, provided the implementation supports per-request deadlines.
    async fn get_range(
        &self,
        url: &str,
        offset: u64,
        timeout: Option<Duration>,
    ) -> Result<RangeResponse, TransportError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn get_range(
        &self,
        url: &str,
        offset: u64,
        timeout: Option<Duration>,
    ) -> Result<RangeResponse, TransportError> {
        let mut request = self
            .get(url)
            .header(header::RANGE, format!("bytes={}-", offset));
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = Box::pin(response.bytes_stream().map_err(TransportError::from));
        Ok(RangeResponse { status, body })
    }
}
