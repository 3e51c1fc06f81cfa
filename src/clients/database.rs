use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::{debug, info};

use crate::models::profile::Profile;

/// Batched profile lookup used by the dispatch pipelines.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches the profiles whose id is in `ids`. Unknown ids are simply
    /// absent from the result; row order is not guaranteed, so callers
    /// re-associate rows by comparing ids.
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, Error>;
}

pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    pub async fn connect(database_url: &str) -> Result<Self, Error> {
        info!("Connecting to PostgreSQL database");

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

        info!("PostgreSQL connection established");

        Ok(Self { pool })
    }

    pub async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| anyhow!("Database health check failed: {}", e))?;

        Ok(())
    }
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Profile>, Error> {
        let profiles = sqlx::query_as::<_, Profile>(
            "SELECT id, full_name, fcm_token FROM profiles WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| anyhow!("Profile lookup failed: {}", e))?;

        debug!(
            requested = ids.len(),
            resolved = profiles.len(),
            "Fetched profile rows"
        );

        Ok(profiles)
    }
}
