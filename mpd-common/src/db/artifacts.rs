//! Artifact store
//!
//! At most one artifact exists per (parameter_id, kind). The table's
//! uniqueness constraint enforces this; a losing concurrent insert is
//! reported as [`InsertOutcome::AlreadyExists`] instead of an error.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::retry::retry_on_lock;
use crate::models::{Artifact, ArtifactKind, ArtifactPayload};
use crate::{time, Error, Result};

/// Result of an insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// This artifact is now the stored one
    Inserted,
    /// Another artifact for the same (parameter_id, kind) was stored first
    AlreadyExists,
}

/// Look up the artifact for (parameter_id, kind)
pub async fn find_artifact(
    pool: &SqlitePool,
    parameter_id: Uuid,
    kind: ArtifactKind,
) -> Result<Option<Artifact>> {
    let row = sqlx::query(
        r#"
        SELECT id, parameter_id, kind, payload, created_at
        FROM artifacts
        WHERE parameter_id = ? AND kind = ?
        "#,
    )
    .bind(parameter_id.to_string())
    .bind(kind.as_str())
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let id: String = row.get("id");
    let payload: String = row.get("payload");
    let created_at: String = row.get("created_at");

    Ok(Some(Artifact {
        id: Uuid::parse_str(&id)
            .map_err(|e| Error::Internal(format!("Corrupt artifact id '{}': {}", id, e)))?,
        parameter_id,
        kind,
        payload: ArtifactPayload::from_json(kind, &payload)?,
        timestamp: time::from_storage(&created_at)?,
    }))
}

/// Insert an artifact unless one already exists for its (parameter_id, kind)
pub async fn insert_artifact(
    pool: &SqlitePool,
    artifact: &Artifact,
    max_wait_ms: u64,
) -> Result<InsertOutcome> {
    let id = artifact.id.to_string();
    let parameter_id = artifact.parameter_id.to_string();
    let payload = artifact.payload.to_json()?;
    let created_at = time::to_storage(&artifact.timestamp);

    let rows_affected = retry_on_lock("insert_artifact", max_wait_ms, || async {
        let result = sqlx::query(
            r#"
            INSERT INTO artifacts (id, parameter_id, kind, payload, created_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(parameter_id, kind) DO NOTHING
            "#,
        )
        .bind(&id)
        .bind(&parameter_id)
        .bind(artifact.kind.as_str())
        .bind(&payload)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok::<_, Error>(result.rows_affected())
    })
    .await?;

    if rows_affected == 0 {
        Ok(InsertOutcome::AlreadyExists)
    } else {
        Ok(InsertOutcome::Inserted)
    }
}

/// Number of stored artifacts for a parameter set
pub async fn count_artifacts(pool: &SqlitePool, parameter_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM artifacts WHERE parameter_id = ?")
        .bind(parameter_id.to_string())
        .fetch_one(pool)
        .await?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{init_memory_pool, insert_parameter_set};
    use crate::models::{BrandPositioning, Axes, NewParameterSet, PositioningMap};
    use std::collections::BTreeMap;

    async fn pool_with_parameter_set() -> (SqlitePool, Uuid) {
        let pool = init_memory_pool().await.unwrap();
        let params = NewParameterSet {
            emerging_trends: vec!["Ethical Sourcing".to_string()],
            timeframe: "30 days".to_string(),
            personas: vec!["Bridal Market".to_string()],
            num_competitors: 2,
            custom_parameters: vec![],
        }
        .into_parameter_set(Uuid::new_v4(), time::now())
        .unwrap();
        insert_parameter_set(&pool, &params, 100).await.unwrap();
        (pool, params.id)
    }

    fn positioning(recommendation: &str) -> ArtifactPayload {
        ArtifactPayload::BrandPositioning(BrandPositioning {
            positioning_map: PositioningMap {
                quadrants: BTreeMap::new(),
                axes: Axes {
                    x_axis: "Traditional ← → Modern".to_string(),
                    y_axis: "Affordable ← → Premium".to_string(),
                },
            },
            competitor_analysis: BTreeMap::new(),
            messaging_recommendations: vec![recommendation.to_string()],
        })
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let (pool, parameter_id) = pool_with_parameter_set().await;
        let found = find_artifact(&pool, parameter_id, ArtifactKind::BrandPositioning)
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let (pool, parameter_id) = pool_with_parameter_set().await;
        let artifact = Artifact::new(parameter_id, positioning("Heritage meets Innovation"));

        let outcome = insert_artifact(&pool, &artifact, 100).await.unwrap();
        assert_eq!(outcome, InsertOutcome::Inserted);

        let found = find_artifact(&pool, parameter_id, ArtifactKind::BrandPositioning)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, artifact.id);
        assert_eq!(found.payload, artifact.payload);
    }

    #[tokio::test]
    async fn test_second_insert_for_same_kind_is_conflict() {
        let (pool, parameter_id) = pool_with_parameter_set().await;
        let first = Artifact::new(parameter_id, positioning("first"));
        let second = Artifact::new(parameter_id, positioning("second"));

        assert_eq!(
            insert_artifact(&pool, &first, 100).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            insert_artifact(&pool, &second, 100).await.unwrap(),
            InsertOutcome::AlreadyExists
        );

        let stored = find_artifact(&pool, parameter_id, ArtifactKind::BrandPositioning)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, first.id);
        assert_eq!(count_artifacts(&pool, parameter_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_for_unknown_parameter_set_fails() {
        let (pool, _) = pool_with_parameter_set().await;
        let orphan = Artifact::new(Uuid::new_v4(), positioning("orphan"));
        assert!(insert_artifact(&pool, &orphan, 100).await.is_err());
    }
}
