//! Cache Module
//!
//! In-memory caching with TTL expiration, typed per derived-data kind.

mod entry;
mod facade;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use facade::{Cache, CachedValue, InMemoryCache};
pub use key::{CacheKey, Namespace};
pub use stats::{CacheStats, StatsCounters};
pub use store::CacheStore;
