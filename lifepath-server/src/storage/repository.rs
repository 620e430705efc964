//! Repository traits - abstraction layer for data access
//!
//! All API handlers interact with persisted state through these traits,
//! making it easy to swap storage backends (LMDB/PostgreSQL in production,
//! in-memory for tests and degraded-mode operation).

use async_trait::async_trait;
use std::error::Error;

use lifepath_core::canvas::EventCanvas;
use lifepath_core::gamification::GamificationService;
use lifepath_core::profile::PersonalizationProfile;

/// Generic result type for repository operations
pub type RepoResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Per-user life-canvas documents, read and written wholesale.
/// Last writer wins; there is no optimistic concurrency.
#[async_trait]
pub trait CanvasRepo: Send + Sync {
    async fn load(&self, user_id: &str) -> RepoResult<Option<EventCanvas>>;
    async fn save(&self, user_id: &str, canvas: &EventCanvas) -> RepoResult<()>;
}

/// Per-user gamification state (tracker + stats + milestones), wholesale.
#[async_trait]
pub trait GamificationRepo: Send + Sync {
    async fn load(&self, user_id: &str) -> RepoResult<Option<GamificationService>>;
    async fn save(&self, user_id: &str, state: &GamificationService) -> RepoResult<()>;
}

/// Personalization profiles keyed by user id.
#[async_trait]
pub trait ProfileRepo: Send + Sync {
    async fn get(&self, user_id: &str) -> RepoResult<Option<PersonalizationProfile>>;
    async fn upsert(&self, profile: &PersonalizationProfile) -> RepoResult<()>;
}
