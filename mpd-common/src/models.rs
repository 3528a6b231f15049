//! Parameter set and artifact models
//!
//! A parameter set is the user-submitted scope of one round of analysis.
//! Artifacts are the derived results, at most one per (parameter set, kind).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::{Error, Result};

/// Maximum number of trends accepted in one parameter set
pub const MAX_TRENDS: usize = 8;
/// Maximum number of personas accepted in one parameter set
pub const MAX_PERSONAS: usize = 6;
/// Maximum number of custom parameters accepted in one parameter set
pub const MAX_CUSTOM_PARAMETERS: usize = 5;

// ============================================================================
// Parameter sets
// ============================================================================

/// Immutable parameter selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub id: Uuid,
    pub emerging_trends: Vec<String>,
    pub timeframe: String,
    pub personas: Vec<String>,
    pub num_competitors: u32,
    pub custom_parameters: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Parameter selection as submitted by the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParameterSet {
    pub emerging_trends: Vec<String>,
    pub timeframe: String,
    pub personas: Vec<String>,
    pub num_competitors: u32,
    #[serde(default)]
    pub custom_parameters: Vec<String>,
}

impl NewParameterSet {
    /// Validate and normalize the submission into a stored parameter set
    ///
    /// Trends and personas must be non-empty: the content generator indexes
    /// them round-robin.
    pub fn into_parameter_set(self, id: Uuid, timestamp: DateTime<Utc>) -> Result<ParameterSet> {
        let emerging_trends = clean_labels("emerging_trends", self.emerging_trends, 1, MAX_TRENDS)?;
        let personas = clean_labels("personas", self.personas, 1, MAX_PERSONAS)?;
        let custom_parameters = clean_labels(
            "custom_parameters",
            self.custom_parameters,
            0,
            MAX_CUSTOM_PARAMETERS,
        )?;

        let timeframe = self.timeframe.trim().to_string();
        if timeframe.is_empty() {
            return Err(Error::InvalidInput("timeframe must not be blank".to_string()));
        }

        if self.num_competitors == 0 {
            return Err(Error::InvalidInput(
                "num_competitors must be at least 1".to_string(),
            ));
        }

        Ok(ParameterSet {
            id,
            emerging_trends,
            timeframe,
            personas,
            num_competitors: self.num_competitors,
            custom_parameters,
            timestamp,
        })
    }
}

fn clean_labels(field: &str, labels: Vec<String>, min: usize, max: usize) -> Result<Vec<String>> {
    if labels.len() < min {
        return Err(Error::InvalidInput(format!(
            "{} requires at least {} entr{}",
            field,
            min,
            if min == 1 { "y" } else { "ies" }
        )));
    }
    if labels.len() > max {
        return Err(Error::InvalidInput(format!(
            "{} accepts at most {} entries (got {})",
            field,
            max,
            labels.len()
        )));
    }

    labels
        .into_iter()
        .map(|label| {
            let trimmed = label.trim();
            if trimmed.is_empty() {
                Err(Error::InvalidInput(format!("{} contains a blank entry", field)))
            } else {
                Ok(trimmed.to_string())
            }
        })
        .collect()
}

// ============================================================================
// Artifact kinds
// ============================================================================

/// The four derived-analysis resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    MarketResearch,
    AudienceSegmentation,
    BrandPositioning,
    ContentGeneration,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::MarketResearch,
        ArtifactKind::AudienceSegmentation,
        ArtifactKind::BrandPositioning,
        ArtifactKind::ContentGeneration,
    ];

    /// Stable name used on the wire and in the `artifacts.kind` column
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::MarketResearch => "market-research",
            ArtifactKind::AudienceSegmentation => "audience-segmentation",
            ArtifactKind::BrandPositioning => "brand-positioning",
            ArtifactKind::ContentGeneration => "content-generation",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ArtifactKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown artifact kind: {}", s)))
    }
}

// ============================================================================
// Market research payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub market_share: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendInsight {
    pub trend: String,
    pub growth_rate: f64,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthsWeaknesses {
    #[serde(rename = "kalyan_strengths")]
    pub brand_strengths: Vec<String>,
    pub market_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendForecast {
    pub period: String,
    pub trend: String,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketResearch {
    pub competitors: Vec<Competitor>,
    pub emerging_trends: Vec<TrendInsight>,
    pub strengths_weaknesses: StrengthsWeaknesses,
    pub trend_forecast: Vec<TrendForecast>,
}

// ============================================================================
// Audience segmentation payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaProfile {
    pub name: String,
    pub age_range: String,
    pub income: String,
    pub behavior: String,
    pub drivers: String,
}

/// Percentage distributions keyed by bucket label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub age_distribution: BTreeMap<String, u8>,
    pub income_distribution: BTreeMap<String, u8>,
    pub geographic_spread: BTreeMap<String, u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehavioralPattern {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<u8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceSegmentation {
    pub personas: Vec<PersonaProfile>,
    pub demographics: Demographics,
    pub behavioral_patterns: Vec<BehavioralPattern>,
}

// ============================================================================
// Brand positioning payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quadrant {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<String>,
    /// (x, y) on the positioning axes, 0-10 scale
    pub position: [f64; 2],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub x_axis: String,
    pub y_axis: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositioningMap {
    pub quadrants: BTreeMap<String, Quadrant>,
    pub axes: Axes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorProfile {
    pub strength: String,
    pub weakness: String,
    pub market_position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPositioning {
    pub positioning_map: PositioningMap,
    pub competitor_analysis: BTreeMap<String, CompetitorProfile>,
    pub messaging_recommendations: Vec<String>,
}

// ============================================================================
// Content generation payload
// ============================================================================

/// Which branch of the content generator produced a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentOrigin {
    Ai,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostIdea {
    pub id: u32,
    pub title: String,
    pub concept: String,
    pub engagement_prediction: String,
    pub implementation: String,
    pub best_time: String,
    pub hashtags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_persona: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWeek {
    pub week: u32,
    pub theme: String,
    pub post_count: u32,
    pub focus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashtagStat {
    pub hashtag: String,
    pub reach: String,
    pub engagement: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementPrediction {
    pub average_engagement: String,
    pub viral_threshold: String,
    pub best_performing_content: String,
    pub ai_confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentGeneration {
    pub viral_post_ideas: Vec<PostIdea>,
    pub content_calendar: Vec<CalendarWeek>,
    pub hashtag_research: Vec<HashtagStat>,
    pub engagement_predictions: EngagementPrediction,
    #[serde(default)]
    pub strategy_notes: Vec<String>,
    pub origin: ContentOrigin,
}

// ============================================================================
// Artifacts
// ============================================================================

/// Kind-specific artifact substance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactPayload {
    MarketResearch(MarketResearch),
    AudienceSegmentation(AudienceSegmentation),
    BrandPositioning(BrandPositioning),
    ContentGeneration(ContentGeneration),
}

impl ArtifactPayload {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            ArtifactPayload::MarketResearch(_) => ArtifactKind::MarketResearch,
            ArtifactPayload::AudienceSegmentation(_) => ArtifactKind::AudienceSegmentation,
            ArtifactPayload::BrandPositioning(_) => ArtifactKind::BrandPositioning,
            ArtifactPayload::ContentGeneration(_) => ArtifactKind::ContentGeneration,
        }
    }

    /// Decode a stored payload, using the kind column to pick the variant
    pub fn from_json(kind: ArtifactKind, json: &str) -> Result<Self> {
        let payload = match kind {
            ArtifactKind::MarketResearch => {
                ArtifactPayload::MarketResearch(serde_json::from_str(json)?)
            }
            ArtifactKind::AudienceSegmentation => {
                ArtifactPayload::AudienceSegmentation(serde_json::from_str(json)?)
            }
            ArtifactKind::BrandPositioning => {
                ArtifactPayload::BrandPositioning(serde_json::from_str(json)?)
            }
            ArtifactKind::ContentGeneration => {
                ArtifactPayload::ContentGeneration(serde_json::from_str(json)?)
            }
        };
        Ok(payload)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// One persisted derived-analysis result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub id: Uuid,
    pub parameter_id: Uuid,
    pub kind: ArtifactKind,
    #[serde(flatten)]
    pub payload: ArtifactPayload,
    pub timestamp: DateTime<Utc>,
}

impl Artifact {
    /// Wrap a freshly generated payload for insertion
    pub fn new(parameter_id: Uuid, payload: ArtifactPayload) -> Self {
        Self {
            id: crate::uuid_utils::generate(),
            parameter_id,
            kind: payload.kind(),
            payload,
            timestamp: crate::time::now(),
        }
    }
}
