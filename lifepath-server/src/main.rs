use std::sync::Arc;
use tracing::{info, warn};

use lifepath_server::api::{self, ApiState};
use lifepath_server::market_client::MarketClient;
use lifepath_server::metrics::ServerMetrics;
use lifepath_server::storage::memory::MemoryProfileRepo;
use lifepath_server::storage::repository::ProfileRepo;
use lifepath_server::storage::{LmdbDocumentStore, PostgresStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lifepath_core::logging::init_tracing_default();

    // ========================================================================
    // 1. LMDB document store (synchronous, embedded DB)
    // ========================================================================
    let data_path =
        std::env::var("LIFEPATH_DATA_PATH").unwrap_or_else(|_| "data/lifepath".to_string());
    let lmdb_max_size: usize = {
        let raw = std::env::var("LIFEPATH_LMDB_MAX_SIZE")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(100_000_000);
        // LMDB requires map size to be a multiple of the OS page size (4096)
        let page_size = 4096_usize;
        (raw + page_size - 1) / page_size * page_size
    };

    let documents = Arc::new(LmdbDocumentStore::new(&data_path, lmdb_max_size)?);
    info!("LMDB document store initialized at: {}", data_path);

    // ========================================================================
    // 2. Profile store: PostgreSQL, degrading to memory when unreachable
    // ========================================================================
    let profiles: Arc<dyn ProfileRepo> = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let max_conns: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5);
            match PostgresStore::new(&url, max_conns).await {
                Ok(pg) => Arc::new(pg),
                Err(e) => {
                    warn!("PostgreSQL unavailable ({e}); serving profiles from memory");
                    Arc::new(MemoryProfileRepo::default())
                }
            }
        }
        Err(_) => {
            warn!("DATABASE_URL not set; serving profiles from memory");
            Arc::new(MemoryProfileRepo::default())
        }
    };

    // ========================================================================
    // 3. Start the HTTP API server
    // ========================================================================
    let market = Arc::new(MarketClient::from_env());
    let port: u16 = std::env::var("LIFEPATH_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);

    let state = ApiState {
        canvas: documents.clone(),
        gamification: documents,
        profiles,
        market,
        metrics: ServerMetrics::new(),
    };

    api::start_api_server(state, port).await
}
