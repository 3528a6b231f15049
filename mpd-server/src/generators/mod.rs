//! Artifact generators
//!
//! Market research, audience segmentation and brand positioning are pure
//! functions of the parameter set. Content generation calls the external
//! text-generation service and falls back to a fixed payload on failure.

pub mod audience_segmentation;
pub mod brand_positioning;
pub mod content;
pub mod market_research;

pub use content::{ContentGenerator, ContentOutcome, FallbackReason};

use mpd_common::models::{ArtifactKind, ArtifactPayload, ParameterSet};

/// Generator registered for each artifact kind
pub struct Generators {
    content: ContentGenerator,
}

impl Generators {
    pub fn new(content: ContentGenerator) -> Self {
        Self { content }
    }

    /// Compute the payload for `kind`
    ///
    /// Total: every kind yields a payload. `brand_context` is only read by
    /// content generation.
    pub async fn generate(
        &self,
        kind: ArtifactKind,
        params: &ParameterSet,
        brand_context: &str,
    ) -> ArtifactPayload {
        match kind {
            ArtifactKind::MarketResearch => {
                ArtifactPayload::MarketResearch(market_research::generate(params))
            }
            ArtifactKind::AudienceSegmentation => {
                ArtifactPayload::AudienceSegmentation(audience_segmentation::generate(params))
            }
            ArtifactKind::BrandPositioning => {
                ArtifactPayload::BrandPositioning(brand_positioning::generate(params))
            }
            ArtifactKind::ContentGeneration => ArtifactPayload::ContentGeneration(
                self.content.generate(params, brand_context).await.into_payload(),
            ),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_parameter_set(num_competitors: u32, timeframe: &str) -> ParameterSet {
    ParameterSet {
        id: mpd_common::uuid_utils::generate(),
        emerging_trends: vec!["Lab-grown Diamonds".to_string(), "Smart Jewelry".to_string()],
        timeframe: timeframe.to_string(),
        personas: vec!["Gen-Z Shopper".to_string(), "Bridal Market".to_string()],
        num_competitors,
        custom_parameters: Vec::new(),
        timestamp: mpd_common::time::now(),
    }
}
