//! Lifepath Server Library
//!
//! Core modules for the Lifepath API server:
//! - HTTP/JSON API endpoints (market data, canvas, gamification, profile)
//! - Storage layer (LMDB per-user documents + PostgreSQL profiles)
//! - Outbound client for the live labor-market source
//! - Server metrics (Prometheus + JSON export)

pub mod api; // HTTP/JSON API endpoints
pub mod market_client; // Live labor-market source client
pub mod metrics; // Server metrics (Prometheus + JSON export)
pub mod storage; // Unified data storage (LMDB + PostgreSQL + memory)

// Re-export commonly used types
pub use market_client::MarketClient;
pub use storage::lmdb_store::LmdbDocumentStore;
pub use storage::postgres::PostgresStore;
