//! Parameter set store
//!
//! Parameter sets are written once on submission and never updated.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::retry::retry_on_lock;
use crate::models::ParameterSet;
use crate::{time, Error, Result};

/// Maximum number of parameter sets returned by a listing
pub const LIST_LIMIT: i64 = 100;

/// Persist a validated parameter set
pub async fn insert_parameter_set(
    pool: &SqlitePool,
    params: &ParameterSet,
    max_wait_ms: u64,
) -> Result<()> {
    // Prepare all data before touching the database
    let id = params.id.to_string();
    let emerging_trends = serde_json::to_string(&params.emerging_trends)?;
    let personas = serde_json::to_string(&params.personas)?;
    let custom_parameters = serde_json::to_string(&params.custom_parameters)?;
    let created_at = time::to_storage(&params.timestamp);
    let num_competitors = i64::from(params.num_competitors);

    retry_on_lock("insert_parameter_set", max_wait_ms, || async {
        sqlx::query(
            r#"
            INSERT INTO parameter_sets (
                id, emerging_trends, timeframe, personas,
                num_competitors, custom_parameters, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&emerging_trends)
        .bind(&params.timeframe)
        .bind(&personas)
        .bind(num_competitors)
        .bind(&custom_parameters)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok::<_, Error>(())
    })
    .await
}

/// Load a parameter set by id
pub async fn load_parameter_set(pool: &SqlitePool, id: Uuid) -> Result<Option<ParameterSet>> {
    let row = sqlx::query(
        r#"
        SELECT id, emerging_trends, timeframe, personas,
               num_competitors, custom_parameters, created_at
        FROM parameter_sets
        WHERE id = ?
        "#,
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.map(|row| row_to_parameter_set(&row)).transpose()
}

/// List parameter sets, oldest first, capped at `limit`
pub async fn list_parameter_sets(pool: &SqlitePool, limit: i64) -> Result<Vec<ParameterSet>> {
    let rows = sqlx::query(
        r#"
        SELECT id, emerging_trends, timeframe, personas,
               num_competitors, custom_parameters, created_at
        FROM parameter_sets
        ORDER BY created_at ASC, rowid ASC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.iter().map(row_to_parameter_set).collect()
}

fn row_to_parameter_set(row: &SqliteRow) -> Result<ParameterSet> {
    let id: String = row.get("id");
    let id = Uuid::parse_str(&id)
        .map_err(|e| Error::Internal(format!("Corrupt parameter set id '{}': {}", id, e)))?;

    let emerging_trends: String = row.get("emerging_trends");
    let personas: String = row.get("personas");
    let custom_parameters: String = row.get("custom_parameters");
    let created_at: String = row.get("created_at");
    let num_competitors: i64 = row.get("num_competitors");

    Ok(ParameterSet {
        id,
        emerging_trends: serde_json::from_str(&emerging_trends)?,
        timeframe: row.get("timeframe"),
        personas: serde_json::from_str(&personas)?,
        num_competitors: u32::try_from(num_competitors).map_err(|_| {
            Error::Internal(format!("Corrupt num_competitors: {}", num_competitors))
        })?,
        custom_parameters: serde_json::from_str(&custom_parameters)?,
        timestamp: time::from_storage(&created_at)?,
    })
}
