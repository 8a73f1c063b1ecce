//! Media descriptor and variant data model

use crate::error::FbgetError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Quality/format option of a resolved media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantTag {
    /// 1080p video
    Hd,
    /// 720p video
    Sd,
    /// 360p video, mobile-friendly
    Low,
    /// Audio-only track
    Audio,
}

impl VariantTag {
    /// The canonical variant set every resolved item offers
    pub const CANONICAL: [VariantTag; 4] = [
        VariantTag::Hd,
        VariantTag::Sd,
        VariantTag::Low,
        VariantTag::Audio,
    ];

    /// Check if the variant carries audio only
    pub fn is_audio_only(&self) -> bool {
        matches!(self, VariantTag::Audio)
    }

    /// Human-readable quality label
    pub fn quality_label(&self) -> &'static str {
        match self {
            VariantTag::Hd => "HD 1080p",
            VariantTag::Sd => "SD 720p",
            VariantTag::Low => "360p",
            VariantTag::Audio => "MP3",
        }
    }

    /// File extension for a downloaded file of this variant
    pub fn extension(&self) -> &'static str {
        if self.is_audio_only() {
            "mp3"
        } else {
            "mp4"
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            VariantTag::Hd => "hd",
            VariantTag::Sd => "sd",
            VariantTag::Low => "low",
            VariantTag::Audio => "audio",
        };
        write!(f, "{}", tag)
    }
}

impl FromStr for VariantTag {
    type Err = FbgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hd" => Ok(VariantTag::Hd),
            "sd" => Ok(VariantTag::Sd),
            "low" => Ok(VariantTag::Low),
            // "mp3" is the legacy audio tag used by the original site
            "audio" | "mp3" => Ok(VariantTag::Audio),
            other => Err(FbgetError::InvalidInput(format!(
                "Unknown variant '{}' (expected hd, sd, low or audio)",
                other
            ))),
        }
    }
}

/// Normalized record describing a resolved media item and its variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    /// Opaque identifier, unique per resolved input
    pub id: String,
    /// The originally submitted link
    pub source_url: String,
    /// Descriptive title
    pub title: String,
    /// Preview image URL
    pub thumbnail_url: String,
    /// Duration in seconds
    pub duration: u32,
    /// Available variants, ordered, no duplicates
    pub variants: Vec<VariantTag>,
    /// One fetchable locator per variant
    pub variant_locators: HashMap<VariantTag, String>,
}

impl MediaDescriptor {
    /// Verify the descriptor invariant: `variants` is non-empty, has no
    /// duplicate tags, and matches the locator key set exactly.
    pub fn validate(&self) -> Result<(), FbgetError> {
        if self.variants.is_empty() {
            return Err(FbgetError::Resolution(
                "Descriptor has no variants".to_string(),
            ));
        }

        let tags: HashSet<VariantTag> = self.variants.iter().copied().collect();
        if tags.len() != self.variants.len() {
            return Err(FbgetError::Resolution(
                "Descriptor has duplicate variants".to_string(),
            ));
        }

        let keys: HashSet<VariantTag> = self.variant_locators.keys().copied().collect();
        if tags != keys {
            return Err(FbgetError::Resolution(
                "Variant list and locator keys differ".to_string(),
            ));
        }

        Ok(())
    }

    /// Look up the locator of a variant
    pub fn locator(&self, tag: VariantTag) -> Option<&str> {
        self.variant_locators.get(&tag).map(String::as_str)
    }

    /// Check whether a variant is offered by this item
    pub fn has_variant(&self, tag: VariantTag) -> bool {
        self.variants.contains(&tag)
    }

    /// Duration rendered as `minutes:seconds` with zero-padded seconds
    pub fn duration_display(&self) -> String {
        format!("{}:{:02}", self.duration / 60, self.duration % 60)
    }
}
