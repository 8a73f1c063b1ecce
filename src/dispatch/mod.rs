//! Download dispatching
//!
//! Turns a (descriptor, variant) pair into a filename plus a transfer
//! initiation, and records the completion. The actual byte movement is the
//! transfer agent's business.

pub mod transfer;

pub use transfer::*;

use crate::core::descriptor::{MediaDescriptor, VariantTag};
use crate::error::FbgetError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Source tag used when a deployment does not configure its own
pub const DEFAULT_SOURCE_TAG: &str = "source";

/// Deterministic filename for one variant of a descriptor:
/// `<source-tag>_<media-kind>_<id>.<extension>`
pub fn build_filename(source_tag: &str, descriptor: &MediaDescriptor, tag: VariantTag) -> String {
    let kind = if tag.is_audio_only() { "audio" } else { "video" };
    format!("{}_{}_{}.{}", source_tag, kind, descriptor.id, tag.extension())
}

/// Record of a successfully initiated download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRecord {
    pub filename: String,
    pub variant: VariantTag,
    pub timestamp: DateTime<Utc>,
}

/// Dispatches downloads through a transfer agent
pub struct DownloadDispatcher<A: TransferAgent> {
    agent: A,
    source_tag: String,
}

impl<A: TransferAgent> DownloadDispatcher<A> {
    pub fn new(agent: A) -> Self {
        Self {
            agent,
            source_tag: DEFAULT_SOURCE_TAG.to_string(),
        }
    }

    /// Set the source tag used in generated filenames (e.g. `facebook`)
    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }

    /// Filename this dispatcher would generate for a variant
    pub fn build_filename(&self, descriptor: &MediaDescriptor, tag: VariantTag) -> String {
        build_filename(&self.source_tag, descriptor, tag)
    }

    /// Initiate exactly one transfer for the chosen variant.
    ///
    /// Fails with `UnresolvedLocator` when the variant has no locator entry
    /// and with `Transfer` when the agent cannot start the fetch. No retry
    /// in either case.
    pub async fn dispatch(
        &self,
        descriptor: &MediaDescriptor,
        tag: VariantTag,
    ) -> Result<CompletionRecord, FbgetError> {
        let locator = descriptor
            .locator(tag)
            .ok_or(FbgetError::UnresolvedLocator(tag))?;
        let filename = self.build_filename(descriptor, tag);

        self.agent.initiate_transfer(locator, &filename).await?;

        info!("Dispatched {} ({})", filename, tag.quality_label());
        Ok(CompletionRecord {
            filename,
            variant: tag,
            timestamp: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Agent that records every initiation instead of performing it
    #[derive(Default)]
    pub struct RecordingAgent {
        pub calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait::async_trait]
    impl TransferAgent for RecordingAgent {
        async fn initiate_transfer(
            &self,
            locator: &str,
            suggested_filename: &str,
        ) -> Result<(), FbgetError> {
            self.calls
                .lock()
                .push((locator.to_string(), suggested_filename.to_string()));
            Ok(())
        }
    }

    struct FailingAgent;

    #[async_trait::async_trait]
    impl TransferAgent for FailingAgent {
        async fn initiate_transfer(&self, _: &str, _: &str) -> Result<(), FbgetError> {
            Err(FbgetError::Transfer("connection reset".to_string()))
        }
    }

    fn descriptor() -> MediaDescriptor {
        MediaDescriptor {
            id: "AB12CD34".to_string(),
            source_url: "https://example.com/watch?v=1".to_string(),
            title: "Test Video".to_string(),
            thumbnail_url: "https://example.com/thumb.jpg".to_string(),
            duration: 120,
            variants: VariantTag::CANONICAL.to_vec(),
            variant_locators: VariantTag::CANONICAL
                .iter()
                .map(|t| (*t, format!("https://cdn.example.com/{}", t)))
                .collect(),
        }
    }

    #[test]
    fn test_filename_scheme() {
        let dispatcher = DownloadDispatcher::new(RecordingAgent::default());
        let d = descriptor();
        assert_eq!(
            dispatcher.build_filename(&d, VariantTag::Hd),
            "source_video_AB12CD34.mp4"
        );
        assert_eq!(
            dispatcher.build_filename(&d, VariantTag::Audio),
            "source_audio_AB12CD34.mp3"
        );

        let dispatcher = dispatcher.with_source_tag("facebook");
        assert_eq!(
            dispatcher.build_filename(&d, VariantTag::Sd),
            "facebook_video_AB12CD34.mp4"
        );
    }

    #[tokio::test]
    async fn test_dispatch_initiates_one_transfer_and_records_completion() {
        let dispatcher = DownloadDispatcher::new(RecordingAgent::default());
        let d = descriptor();

        let record = dispatcher.dispatch(&d, VariantTag::Hd).await.unwrap();
        assert_eq!(record.filename, "source_video_AB12CD34.mp4");
        assert_eq!(record.variant, VariantTag::Hd);

        let calls = dispatcher.agent.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "https://cdn.example.com/hd");
        assert_eq!(calls[0].1, "source_video_AB12CD34.mp4");
    }

    #[tokio::test]
    async fn test_dispatch_fails_on_missing_locator() {
        let dispatcher = DownloadDispatcher::new(RecordingAgent::default());
        let mut d = descriptor();
        d.variant_locators = HashMap::new();

        let err = dispatcher.dispatch(&d, VariantTag::Hd).await.unwrap_err();
        assert!(matches!(err, FbgetError::UnresolvedLocator(VariantTag::Hd)));
        assert!(dispatcher.agent.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_surfaces_transfer_failure_without_retry() {
        let dispatcher = DownloadDispatcher::new(FailingAgent);
        let d = descriptor();

        let err = dispatcher.dispatch(&d, VariantTag::Sd).await.unwrap_err();
        assert!(matches!(err, FbgetError::Transfer(_)));
    }
}
