//! Dashboard summary
//!
//! Read-only composition of a parameter set and whatever artifacts have been
//! generated for it. Never triggers generation.

use mpd_common::db;
use mpd_common::models::{Artifact, ArtifactKind, ParameterSet};
use mpd_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Summary of one parameter set; `None` marks a kind not yet generated
#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub parameters: ParameterSet,
    pub market_research: Option<Artifact>,
    pub audience_segmentation: Option<Artifact>,
    pub brand_positioning: Option<Artifact>,
    pub content_generation: Option<Artifact>,
}

impl SummaryView {
    pub fn slot(&self, kind: ArtifactKind) -> Option<&Artifact> {
        match kind {
            ArtifactKind::MarketResearch => self.market_research.as_ref(),
            ArtifactKind::AudienceSegmentation => self.audience_segmentation.as_ref(),
            ArtifactKind::BrandPositioning => self.brand_positioning.as_ref(),
            ArtifactKind::ContentGeneration => self.content_generation.as_ref(),
        }
    }

    /// Kinds with no artifact yet
    pub fn missing_kinds(&self) -> Vec<ArtifactKind> {
        ArtifactKind::ALL
            .into_iter()
            .filter(|kind| self.slot(*kind).is_none())
            .collect()
    }
}

pub async fn summarize(pool: &SqlitePool, parameter_id: Uuid) -> Result<SummaryView> {
    let parameters = db::load_parameter_set(pool, parameter_id)
        .await?
        .ok_or_else(|| Error::parameter_set_not_found(parameter_id))?;

    let find = |kind| db::find_artifact(pool, parameter_id, kind);
    let view = SummaryView {
        parameters,
        market_research: find(ArtifactKind::MarketResearch).await?,
        audience_segmentation: find(ArtifactKind::AudienceSegmentation).await?,
        brand_positioning: find(ArtifactKind::BrandPositioning).await?,
        content_generation: find(ArtifactKind::ContentGeneration).await?,
    };

    tracing::debug!(
        %parameter_id,
        missing = view.missing_kinds().len(),
        "Summary assembled"
    );

    Ok(view)
}
