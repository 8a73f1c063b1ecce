//! Media page resolution

use crate::core::descriptor::{MediaDescriptor, VariantTag};
use crate::error::FbgetError;
use crate::resolve::provider::ResourceProvider;
use crate::utils::validate_source_url;
use async_trait::async_trait;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Resolves a raw input URL into a media descriptor.
///
/// Implementations may suspend on I/O; the placeholder implementation below
/// needs none.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, source_url: &str) -> Result<MediaDescriptor, FbgetError>;
}

/// Resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Inclusive range the fabricated duration is drawn from
    pub duration_range: RangeInclusive<u32>,
    /// Simulated analysis delay before the descriptor is produced
    pub analysis_delay: Option<Duration>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            duration_range: 30..=600,
            analysis_delay: None,
        }
    }
}

/// Resolver that fabricates descriptive placeholder metadata.
///
/// No remote extraction happens: the id and duration come from the injected
/// RNG, the title from the current date, and the locators from the resource
/// provider. The descriptor shape honors the full contract regardless.
pub struct PlaceholderResolver<P: ResourceProvider> {
    provider: P,
    config: ResolverConfig,
    rng: Mutex<StdRng>,
}

impl<P: ResourceProvider> PlaceholderResolver<P> {
    /// Create a resolver seeded from OS entropy
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: ResolverConfig::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Create a resolver with a fixed seed for reproducible output
    pub fn with_seed(provider: P, seed: u64) -> Self {
        Self {
            provider,
            config: ResolverConfig::default(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Override the duration range
    pub fn with_duration_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.config.duration_range = range;
        self
    }

    /// Enable a simulated analysis delay
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.config.analysis_delay = if delay.is_zero() { None } else { Some(delay) };
        self
    }
}

#[async_trait]
impl<P: ResourceProvider> Resolver for PlaceholderResolver<P> {
    async fn resolve(&self, source_url: &str) -> Result<MediaDescriptor, FbgetError> {
        let url = validate_source_url(source_url)?;
        info!("Resolving media page: {}", url);

        if let Some(delay) = self.config.analysis_delay {
            debug!("Simulating analysis delay of {:?}", delay);
            tokio::time::sleep(delay).await;
        }

        let (id, duration) = {
            let mut rng = self.rng.lock().await;
            let id: String = (&mut *rng)
                .sample_iter(&Alphanumeric)
                .take(8)
                .map(|b| (b as char).to_ascii_uppercase())
                .collect();
            let duration = rng.gen_range(self.config.duration_range.clone());
            (id, duration)
        };

        let variants = VariantTag::CANONICAL.to_vec();
        let mut variant_locators = HashMap::with_capacity(variants.len());
        for tag in &variants {
            variant_locators.insert(*tag, self.provider.locator(&id, *tag)?);
        }

        let descriptor = MediaDescriptor {
            id: id.clone(),
            source_url: url.to_string(),
            title: format!("Facebook Video - {}", Utc::now().format("%Y-%m-%d")),
            thumbnail_url: format!(
                "https://via.placeholder.com/1280x720/3b82f6/ffffff?text=FB+VIDEO+{}",
                id
            ),
            duration,
            variants,
            variant_locators,
        };
        descriptor.validate()?;

        debug!(
            "Resolved {} as {} ({} variants, {})",
            descriptor.source_url,
            descriptor.id,
            descriptor.variants.len(),
            descriptor.duration_display()
        );
        Ok(descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::provider::StaticResourceProvider;

    fn seeded(seed: u64) -> PlaceholderResolver<StaticResourceProvider> {
        PlaceholderResolver::with_seed(StaticResourceProvider, seed)
    }

    #[tokio::test]
    async fn test_resolve_produces_valid_descriptor() {
        let resolver = seeded(1);
        let descriptor = resolver
            .resolve("https://example.com/watch?v=1")
            .await
            .unwrap();

        assert!(descriptor.validate().is_ok());
        assert_eq!(descriptor.variants, VariantTag::CANONICAL.to_vec());
        assert_eq!(descriptor.variant_locators.len(), 4);
        assert_eq!(descriptor.id.len(), 8);
        assert!(descriptor
            .id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[tokio::test]
    async fn test_resolve_duration_within_default_range() {
        let resolver = seeded(2);
        for _ in 0..20 {
            let descriptor = resolver
                .resolve("https://example.com/watch?v=1")
                .await
                .unwrap();
            assert!((30..=600).contains(&descriptor.duration));
        }
    }

    #[tokio::test]
    async fn test_resolve_respects_custom_duration_range() {
        let resolver = seeded(3).with_duration_range(10..=10);
        let descriptor = resolver
            .resolve("https://example.com/watch?v=1")
            .await
            .unwrap();
        assert_eq!(descriptor.duration, 10);
        assert_eq!(descriptor.duration_display(), "0:10");
    }

    #[tokio::test]
    async fn test_same_seed_same_identity() {
        let a = seeded(42)
            .resolve("https://example.com/watch?v=1")
            .await
            .unwrap();
        let b = seeded(42)
            .resolve("https://example.com/watch?v=1")
            .await
            .unwrap();
        assert_eq!(a.id, b.id);
        assert_eq!(a.duration, b.duration);
    }

    #[tokio::test]
    async fn test_fresh_ids_per_resolution() {
        let resolver = seeded(4);
        let a = resolver
            .resolve("https://example.com/watch?v=1")
            .await
            .unwrap();
        let b = resolver
            .resolve("https://example.com/watch?v=1")
            .await
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_resolve_rejects_blank_and_malformed_input() {
        let resolver = seeded(5);
        assert!(matches!(
            resolver.resolve("").await,
            Err(FbgetError::InvalidInput(_))
        ));
        assert!(matches!(
            resolver.resolve("   ").await,
            Err(FbgetError::InvalidInput(_))
        ));
        assert!(matches!(
            resolver.resolve("not a link").await,
            Err(FbgetError::InvalidInput(_))
        ));
    }
}
