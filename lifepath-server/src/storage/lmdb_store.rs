//! LMDB Document Store - per-user state persisted wholesale
//!
//! Each user's life canvas and gamification state are stored as single
//! JSON documents under a user-namespaced key. Documents are read and
//! written whole on every mutation; last writer wins.

use async_trait::async_trait;
use heed::{Database, Env, EnvOpenOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use lifepath_core::canvas::EventCanvas;
use lifepath_core::gamification::GamificationService;

use super::repository::{CanvasRepo, GamificationRepo, RepoResult};

/// LMDB-backed store for per-user documents
pub struct LmdbDocumentStore {
    env: Arc<Env>,
    /// Database for life-canvas documents
    canvases: Database<heed::types::Str, heed::types::Bytes>,
    /// Database for gamification-state documents
    gamification: Database<heed::types::Str, heed::types::Bytes>,
}

/// Error type for document store operations
#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("LMDB error: {0}")]
    Heed(#[from] heed::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LmdbDocumentStore {
    /// Open or create the document store.
    ///
    /// # Arguments
    /// * `path` - Directory for LMDB data files
    /// * `max_size` - Maximum database size in bytes (page-size aligned)
    pub fn new<P: AsRef<Path>>(path: P, max_size: usize) -> Result<Self, DocumentStoreError> {
        std::fs::create_dir_all(&path)?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(max_size)
                .max_dbs(2)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let canvases =
            env.create_database::<heed::types::Str, heed::types::Bytes>(&mut wtxn, Some("canvases"))?;
        let gamification = env
            .create_database::<heed::types::Str, heed::types::Bytes>(&mut wtxn, Some("gamification"))?;
        wtxn.commit()?;

        info!(
            "LMDB document store initialized ({}MB)",
            max_size / (1024 * 1024)
        );

        Ok(Self {
            env: Arc::new(env),
            canvases,
            gamification,
        })
    }

    fn user_key(user_id: &str) -> String {
        format!("user:{user_id}")
    }

    fn get_doc<T: DeserializeOwned>(
        &self,
        db: Database<heed::types::Str, heed::types::Bytes>,
        key: &str,
    ) -> Result<Option<T>, DocumentStoreError> {
        let rtxn = self.env.read_txn()?;
        match db.get(&rtxn, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(bytes)?)),
            None => Ok(None),
        }
    }

    fn put_doc<T: Serialize>(
        &self,
        db: Database<heed::types::Str, heed::types::Bytes>,
        key: &str,
        value: &T,
    ) -> Result<(), DocumentStoreError> {
        let bytes = serde_json::to_vec(value)?;
        let mut wtxn = self.env.write_txn()?;
        db.put(&mut wtxn, key, &bytes)?;
        wtxn.commit()?;
        Ok(())
    }
}

#[async_trait]
impl CanvasRepo for LmdbDocumentStore {
    async fn load(&self, user_id: &str) -> RepoResult<Option<EventCanvas>> {
        Ok(self.get_doc(self.canvases, &Self::user_key(user_id))?)
    }

    async fn save(&self, user_id: &str, canvas: &EventCanvas) -> RepoResult<()> {
        self.put_doc(self.canvases, &Self::user_key(user_id), canvas)?;
        Ok(())
    }
}

#[async_trait]
impl GamificationRepo for LmdbDocumentStore {
    async fn load(&self, user_id: &str) -> RepoResult<Option<GamificationService>> {
        Ok(self.get_doc(self.gamification, &Self::user_key(user_id))?)
    }

    async fn save(&self, user_id: &str, state: &GamificationService) -> RepoResult<()> {
        self.put_doc(self.gamification, &Self::user_key(user_id), state)?;
        Ok(())
    }
}
