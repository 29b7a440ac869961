//! Cache Key Module
//!
//! Namespaced keys of the form `namespace:decimal-id`.

use std::fmt;

// == Namespace ==
/// Kind of derived data a cache key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Single banner by id
    Banner,
    /// Aggregate click statistics by banner id
    ClickStats,
    /// Banner together with its click count, by banner id
    BannerStats,
    /// Ranked banner list, by limit
    TopBanners,
}

impl Namespace {
    pub const ALL: [Namespace; 4] = [
        Namespace::Banner,
        Namespace::ClickStats,
        Namespace::BannerStats,
        Namespace::TopBanners,
    ];

    /// Bare namespace name.
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Banner => "banner",
            Namespace::ClickStats => "click_stats",
            Namespace::BannerStats => "banner_stats",
            Namespace::TopBanners => "top_banners",
        }
    }

    /// Prefix shared by every key in the namespace, delimiter included.
    pub fn prefix(self) -> String {
        format!("{}{}", self.as_str(), CacheKey::DELIMITER)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Key ==
/// A namespaced cache key.
///
/// The delimiter keeps namespaces from colliding with each other's suffix
/// space, and the decimal suffix keeps ids of any magnitude distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    namespace: Namespace,
    id: i64,
}

impl CacheKey {
    pub const DELIMITER: char = ':';

    pub fn new(namespace: Namespace, id: i64) -> Self {
        Self { namespace, id }
    }

    pub fn banner(id: i64) -> Self {
        Self::new(Namespace::Banner, id)
    }

    pub fn click_stats(banner_id: i64) -> Self {
        Self::new(Namespace::ClickStats, banner_id)
    }

    pub fn banner_stats(banner_id: i64) -> Self {
        Self::new(Namespace::BannerStats, banner_id)
    }

    pub fn top_banners(limit: usize) -> Self {
        Self::new(Namespace::TopBanners, limit as i64)
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn id(&self) -> i64 {
        self.id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.namespace, Self::DELIMITER, self.id)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.to_string()
    }
}
