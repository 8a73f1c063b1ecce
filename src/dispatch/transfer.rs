//! Transfer agents - external collaborators that move the bytes

use crate::error::FbgetError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// Initiates the actual byte transfer for a dispatched download.
///
/// Fire-and-forget from the dispatcher's perspective: any I/O problem is a
/// `Transfer` error, and there is no progress reporting or retry.
#[async_trait]
pub trait TransferAgent: Send + Sync {
    async fn initiate_transfer(
        &self,
        locator: &str,
        suggested_filename: &str,
    ) -> Result<(), FbgetError>;
}

/// Transfer agent that kicks off an HTTP fetch of the locator.
///
/// The response body is not consumed; a successful status line is all the
/// dispatcher contract needs to consider the transfer initiated.
pub struct HttpTransferAgent {
    client: reqwest::Client,
}

impl HttpTransferAgent {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Use a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, FbgetError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpTransferAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransferAgent for HttpTransferAgent {
    async fn initiate_transfer(
        &self,
        locator: &str,
        suggested_filename: &str,
    ) -> Result<(), FbgetError> {
        debug!("Initiating transfer of {} as {}", locator, suggested_filename);

        let response = self
            .client
            .get(locator)
            .send()
            .await
            .map_err(|e| FbgetError::Transfer(format!("Request to locator failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FbgetError::Transfer(format!(
                "Locator answered with status {}",
                status
            )));
        }

        info!("Transfer initiated for {}", suggested_filename);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_agent_initiates_transfer() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/video.mp4")
            .with_status(200)
            .with_body("media bytes")
            .create_async()
            .await;

        let agent = HttpTransferAgent::new();
        let locator = format!("{}/video.mp4", server.url());
        agent
            .initiate_transfer(&locator, "facebook_video_AB12CD34.mp4")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_agent_maps_error_status_to_transfer_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/missing.mp4")
            .with_status(404)
            .create_async()
            .await;

        let agent = HttpTransferAgent::new();
        let locator = format!("{}/missing.mp4", server.url());
        let err = agent
            .initiate_transfer(&locator, "facebook_video_AB12CD34.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, FbgetError::Transfer(_)));
    }

    #[tokio::test]
    async fn test_http_agent_maps_connection_failure_to_transfer_error() {
        let agent = HttpTransferAgent::new();
        // Port 1 is never listening
        let err = agent
            .initiate_transfer("http://127.0.0.1:1/video.mp4", "file.mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, FbgetError::Transfer(_)));
    }
}
