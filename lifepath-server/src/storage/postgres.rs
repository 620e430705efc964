//! PostgreSQL Storage - personalization profile persistence
//!
//! Profiles are the only remote-table state; everything else is per-user
//! LMDB documents. Uses `sqlx` with runtime-checked queries so no live
//! database is needed at compile time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::FromRow;
use tracing::{debug, info};

use lifepath_core::profile::{EngagementLevel, PersonalizationProfile};

use super::migrations;
use super::repository::{ProfileRepo, RepoResult};

/// PostgreSQL connection pool wrapper
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

/// Error type for PostgreSQL operations
#[derive(Debug, thiserror::Error)]
pub enum PostgresError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(String),
}

#[derive(FromRow)]
struct ProfileRow {
    user_id: String,
    exploration: f32,
    mentorship: f32,
    community: f32,
    planning: f32,
    engagement: String,
    scenarios_viewed: i32,
    updated_at: DateTime<Utc>,
}

fn engagement_to_str(level: EngagementLevel) -> &'static str {
    match level {
        EngagementLevel::Low => "low",
        EngagementLevel::Medium => "medium",
        EngagementLevel::High => "high",
    }
}

fn engagement_from_str(s: &str) -> EngagementLevel {
    match s {
        "low" => EngagementLevel::Low,
        "high" => EngagementLevel::High,
        _ => EngagementLevel::Medium,
    }
}

impl From<ProfileRow> for PersonalizationProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user_id: row.user_id,
            exploration: row.exploration,
            mentorship: row.mentorship,
            community: row.community,
            planning: row.planning,
            engagement: engagement_from_str(&row.engagement),
            scenarios_viewed: row.scenarios_viewed.max(0) as u32,
            updated_at: row.updated_at,
        }
    }
}

impl PostgresStore {
    /// Connect to PostgreSQL and run migrations
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("PostgreSQL connected (max_connections={})", max_connections);

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Connect with an existing pool (for testing / shared pools)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations
    pub async fn run_migrations(&self) -> Result<(), PostgresError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name VARCHAR(100) PRIMARY KEY,
                applied_at TIMESTAMP WITH TIME ZONE DEFAULT NOW()
            )",
        )
        .execute(&self.pool)
        .await?;

        for (name, sql) in migrations::get_migrations() {
            let applied: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _migrations WHERE name = $1)")
                    .bind(name)
                    .fetch_one(&self.pool)
                    .await?;

            if !applied {
                info!("Running migration: {}", name);
                sqlx::raw_sql(sql)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| PostgresError::Migration(format!("{}: {}", name, e)))?;

                sqlx::query("INSERT INTO _migrations (name) VALUES ($1)")
                    .bind(name)
                    .execute(&self.pool)
                    .await?;
            } else {
                debug!("Migration already applied: {}", name);
            }
        }

        Ok(())
    }

    pub async fn get_profile(
        &self,
        user_id: &str,
    ) -> Result<Option<PersonalizationProfile>, PostgresError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT user_id, exploration, mentorship, community, planning,
                    engagement, scenarios_viewed, updated_at
             FROM profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PersonalizationProfile::from))
    }

    pub async fn upsert_profile(
        &self,
        profile: &PersonalizationProfile,
    ) -> Result<(), PostgresError> {
        sqlx::query(
            "INSERT INTO profiles (user_id, exploration, mentorship, community,
                                   planning, engagement, scenarios_viewed, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (user_id) DO UPDATE SET
                 exploration = EXCLUDED.exploration,
                 mentorship = EXCLUDED.mentorship,
                 community = EXCLUDED.community,
                 planning = EXCLUDED.planning,
                 engagement = EXCLUDED.engagement,
                 scenarios_viewed = EXCLUDED.scenarios_viewed,
                 updated_at = EXCLUDED.updated_at",
        )
        .bind(&profile.user_id)
        .bind(profile.exploration)
        .bind(profile.mentorship)
        .bind(profile.community)
        .bind(profile.planning)
        .bind(engagement_to_str(profile.engagement))
        .bind(profile.scenarios_viewed as i32)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileRepo for PostgresStore {
    async fn get(&self, user_id: &str) -> RepoResult<Option<PersonalizationProfile>> {
        Ok(self.get_profile(user_id).await?)
    }

    async fn upsert(&self, profile: &PersonalizationProfile) -> RepoResult<()> {
        self.upsert_profile(profile).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_strings_round_trip() {
        for level in [
            EngagementLevel::Low,
            EngagementLevel::Medium,
            EngagementLevel::High,
        ] {
            assert_eq!(engagement_from_str(engagement_to_str(level)), level);
        }
        assert_eq!(engagement_from_str("garbage"), EngagementLevel::Medium);
    }
}
