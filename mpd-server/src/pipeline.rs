//! Generate-or-fetch pipeline
//!
//! For a (parameter set, kind) pair the stored artifact is returned if one
//! exists; otherwise the registered generator runs and its result is stored.
//! Concurrent first requests for the same pair may both generate, but only
//! one insert wins the (parameter_id, kind) uniqueness constraint and every
//! caller receives the winning artifact.

use mpd_common::db::{self, InsertOutcome};
use mpd_common::models::{Artifact, ArtifactKind, NewParameterSet, ParameterSet};
use mpd_common::{time, uuid_utils, Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::generators::Generators;

/// Pipeline orchestrator with its store and generators injected
pub struct Pipeline {
    db: SqlitePool,
    generators: Generators,
    default_brand_context: String,
    max_lock_wait_ms: u64,
}

impl Pipeline {
    pub fn new(
        db: SqlitePool,
        generators: Generators,
        default_brand_context: impl Into<String>,
        max_lock_wait_ms: u64,
    ) -> Self {
        Self {
            db,
            generators,
            default_brand_context: default_brand_context.into(),
            max_lock_wait_ms,
        }
    }

    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    /// Validate and persist a new parameter set
    pub async fn create_parameter_set(&self, submission: NewParameterSet) -> Result<ParameterSet> {
        let params = submission.into_parameter_set(uuid_utils::generate(), time::now())?;
        db::insert_parameter_set(&self.db, &params, self.max_lock_wait_ms).await?;

        tracing::info!(
            parameter_id = %params.id,
            trends = params.emerging_trends.len(),
            personas = params.personas.len(),
            timeframe = %params.timeframe,
            "Parameter set created"
        );

        Ok(params)
    }

    pub async fn list_parameter_sets(&self) -> Result<Vec<ParameterSet>> {
        db::list_parameter_sets(&self.db, db::LIST_LIMIT).await
    }

    /// Load a parameter set or fail with NotFound
    pub async fn parameter_set(&self, parameter_id: Uuid) -> Result<ParameterSet> {
        db::load_parameter_set(&self.db, parameter_id)
            .await?
            .ok_or_else(|| Error::parameter_set_not_found(parameter_id))
    }

    /// Return the stored artifact for (parameter_id, kind), generating it on first request
    ///
    /// `brand_context` only affects content generation; `None` uses the
    /// configured default. Fails only with NotFound for an unknown parameter
    /// set or with a store error.
    pub async fn fetch_or_generate(
        &self,
        parameter_id: Uuid,
        kind: ArtifactKind,
        brand_context: Option<&str>,
    ) -> Result<Artifact> {
        let params = self.parameter_set(parameter_id).await?;

        if let Some(existing) = db::find_artifact(&self.db, parameter_id, kind).await? {
            tracing::debug!(%parameter_id, %kind, "Artifact cache hit");
            return Ok(existing);
        }

        let brand_context = brand_context
            .map(str::trim)
            .filter(|context| !context.is_empty())
            .unwrap_or(&self.default_brand_context);

        tracing::info!(%parameter_id, %kind, "Generating artifact");
        let payload = self.generators.generate(kind, &params, brand_context).await;
        let artifact = Artifact::new(parameter_id, payload);

        match db::insert_artifact(&self.db, &artifact, self.max_lock_wait_ms).await? {
            InsertOutcome::Inserted => Ok(artifact),
            InsertOutcome::AlreadyExists => {
                // A concurrent request stored its artifact first; return that one
                tracing::debug!(%parameter_id, %kind, "Artifact insert lost race, rereading");
                db::find_artifact(&self.db, parameter_id, kind)
                    .await?
                    .ok_or_else(|| {
                        Error::Internal(format!(
                            "{} artifact for {} vanished after insert conflict",
                            kind, parameter_id
                        ))
                    })
            }
        }
    }
}
