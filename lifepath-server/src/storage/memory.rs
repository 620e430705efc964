//! In-memory repositories.
//!
//! Used by integration tests and as the degraded-mode profile store when
//! PostgreSQL is unreachable at startup. State lives only for the process
//! lifetime.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use lifepath_core::canvas::EventCanvas;
use lifepath_core::gamification::GamificationService;
use lifepath_core::profile::PersonalizationProfile;

use super::repository::{CanvasRepo, GamificationRepo, ProfileRepo, RepoResult};

#[derive(Default)]
pub struct MemoryCanvasRepo {
    docs: RwLock<HashMap<String, EventCanvas>>,
}

#[derive(Default)]
pub struct MemoryGamificationRepo {
    docs: RwLock<HashMap<String, GamificationService>>,
}

#[derive(Default)]
pub struct MemoryProfileRepo {
    profiles: RwLock<HashMap<String, PersonalizationProfile>>,
}

#[async_trait]
impl CanvasRepo for MemoryCanvasRepo {
    async fn load(&self, user_id: &str) -> RepoResult<Option<EventCanvas>> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, canvas: &EventCanvas) -> RepoResult<()> {
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        docs.insert(user_id.to_string(), canvas.clone());
        Ok(())
    }
}

#[async_trait]
impl GamificationRepo for MemoryGamificationRepo {
    async fn load(&self, user_id: &str) -> RepoResult<Option<GamificationService>> {
        let docs = self.docs.read().unwrap_or_else(|e| e.into_inner());
        Ok(docs.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, state: &GamificationService) -> RepoResult<()> {
        let mut docs = self.docs.write().unwrap_or_else(|e| e.into_inner());
        docs.insert(user_id.to_string(), state.clone());
        Ok(())
    }
}

#[async_trait]
impl ProfileRepo for MemoryProfileRepo {
    async fn get(&self, user_id: &str) -> RepoResult<Option<PersonalizationProfile>> {
        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());
        Ok(profiles.get(user_id).cloned())
    }

    async fn upsert(&self, profile: &PersonalizationProfile) -> RepoResult<()> {
        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());
        profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }
}
