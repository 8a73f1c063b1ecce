//! Resource provider - maps (media id, variant) to a fetchable locator

use crate::core::descriptor::VariantTag;
use crate::error::FbgetError;

/// Source of variant locators consumed by the resolver.
///
/// A minimal deployment can back this with a static table; a real one would
/// query the extraction backend.
pub trait ResourceProvider: Send + Sync {
    /// Return the locator for one variant of a media item
    fn locator(&self, media_id: &str, tag: VariantTag) -> Result<String, FbgetError>;
}

/// Static locator table pointing at publicly hosted sample media
#[derive(Debug, Clone, Default)]
pub struct StaticResourceProvider;

impl ResourceProvider for StaticResourceProvider {
    fn locator(&self, _media_id: &str, tag: VariantTag) -> Result<String, FbgetError> {
        let url = match tag {
            VariantTag::Hd => {
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
            }
            VariantTag::Sd => {
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4"
            }
            VariantTag::Low => {
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4"
            }
            VariantTag::Audio => "https://www.soundjay.com/misc/sounds/bell-ringing-05.wav",
        };
        Ok(url.to_string())
    }
}
