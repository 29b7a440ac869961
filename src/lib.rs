//! Banner Stats - banner click tracking behind an in-memory TTL cache
//!
//! A caching repository layer over banner and click persistence, with typed
//! cache entries, cascading invalidation and a background expiry reaper.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, InMemoryCache};
pub use config::{CacheConfig, Config};
pub use error::{RepositoryError, Result};
pub use repository::{BannerRepository, CachedBannerRepository, InMemoryBannerRepository};
pub use tasks::spawn_cleanup_task;
