//! In-process banner repository
//!
//! Keeps banners and clicks in ordered maps behind one RwLock. Mirrors the
//! relational store's semantics: unique banner names, clicks referencing an
//! existing banner, and clicks removed together with their banner.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Timelike, Utc};
use tokio::sync::RwLock;

use crate::error::{RepositoryError, Result};
use crate::models::{
    Banner, BannerClickCount, BannerWithStats, Click, ClickStats, DailyClicks, HourlyClicks,
    NewClick,
};
use crate::repository::BannerRepository;

#[derive(Debug, Default)]
struct Tables {
    banners: BTreeMap<i64, Banner>,
    clicks: BTreeMap<i64, Click>,
    next_banner_id: i64,
    next_click_id: i64,
}

impl Tables {
    fn banner(&self, id: i64) -> Result<&Banner> {
        self.banners
            .get(&id)
            .ok_or_else(|| RepositoryError::banner_not_found(id))
    }

    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.banners
            .values()
            .any(|b| b.name == name && Some(b.id) != except)
    }

    fn clicks_of(&self, banner_id: i64) -> impl Iterator<Item = &Click> {
        self.clicks.values().filter(move |c| c.banner_id == banner_id)
    }

    fn with_stats(&self, banner: &Banner) -> BannerWithStats {
        let mut click_count = 0;
        let mut last_click = None;
        for click in self.clicks_of(banner.id) {
            click_count += 1;
            last_click = last_click.max(Some(click.timestamp));
        }
        BannerWithStats {
            banner: banner.clone(),
            click_count,
            last_click,
        }
    }
}

/// [`BannerRepository`] kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryBannerRepository {
    tables: RwLock<Tables>,
}

impl InMemoryBannerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(RepositoryError::InvalidRequest(
            "Banner name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl BannerRepository for InMemoryBannerRepository {
    async fn create_banner(&self, name: &str) -> Result<Banner> {
        validate_name(name)?;

        let mut tables = self.tables.write().await;
        if tables.name_taken(name, None) {
            return Err(RepositoryError::Conflict(format!(
                "Banner with name '{}' already exists",
                name
            )));
        }

        tables.next_banner_id += 1;
        let now = Utc::now();
        let banner = Banner {
            id: tables.next_banner_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.banners.insert(banner.id, banner.clone());
        Ok(banner)
    }

    async fn get_banner(&self, id: i64) -> Result<Banner> {
        self.tables.read().await.banner(id).cloned()
    }

    async fn get_all_banners(&self) -> Result<Vec<Banner>> {
        Ok(self.tables.read().await.banners.values().cloned().collect())
    }

    async fn update_banner(&self, banner: &Banner) -> Result<Banner> {
        validate_name(&banner.name)?;

        let mut tables = self.tables.write().await;
        tables.banner(banner.id)?;
        if tables.name_taken(&banner.name, Some(banner.id)) {
            return Err(RepositoryError::Conflict(format!(
                "Banner with name '{}' already exists",
                banner.name
            )));
        }

        let stored = tables
            .banners
            .get_mut(&banner.id)
            .ok_or_else(|| RepositoryError::banner_not_found(banner.id))?;
        stored.name = banner.name.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_banner(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.banners.remove(&id).is_none() {
            return Err(RepositoryError::banner_not_found(id));
        }
        tables.clicks.retain(|_, click| click.banner_id != id);
        Ok(())
    }

    async fn get_banner_by_name(&self, name: &str) -> Result<Banner> {
        self.tables
            .read()
            .await
            .banners
            .values()
            .find(|b| b.name == name)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Banner with name '{}'", name)))
    }

    async fn search_banners(&self, pattern: &str) -> Result<Vec<Banner>> {
        let needle = pattern.to_lowercase();
        let tables = self.tables.read().await;

        let mut found: Vec<Banner> = tables
            .banners
            .values()
            .filter(|b| b.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    async fn get_banners_with_click_count(&self) -> Result<Vec<BannerWithStats>> {
        let tables = self.tables.read().await;

        let mut rows: Vec<BannerWithStats> =
            tables.banners.values().map(|b| tables.with_stats(b)).collect();
        rows.sort_by(|a, b| {
            b.click_count
                .cmp(&a.click_count)
                .then(b.banner.created_at.cmp(&a.banner.created_at))
                .then(b.banner.id.cmp(&a.banner.id))
        });
        Ok(rows)
    }

    async fn get_banner_with_stats(&self, id: i64) -> Result<BannerWithStats> {
        let tables = self.tables.read().await;
        let banner = tables.banner(id)?;
        Ok(tables.with_stats(banner))
    }

    async fn create_click(&self, click: NewClick) -> Result<Click> {
        let mut tables = self.tables.write().await;
        tables.banner(click.banner_id)?;

        tables.next_click_id += 1;
        let now = Utc::now();
        let click = Click {
            id: tables.next_click_id,
            banner_id: click.banner_id,
            timestamp: click.timestamp.unwrap_or(now),
            created_at: now,
        };
        tables.clicks.insert(click.id, click.clone());
        Ok(click)
    }

    async fn get_click(&self, id: i64) -> Result<Click> {
        self.tables
            .read()
            .await
            .clicks
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::click_not_found(id))
    }

    async fn get_all_clicks(&self) -> Result<Vec<Click>> {
        let mut clicks: Vec<Click> = self.tables.read().await.clicks.values().cloned().collect();
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(clicks)
    }

    async fn get_clicks_by_banner(&self, banner_id: i64) -> Result<Vec<Click>> {
        let tables = self.tables.read().await;
        let mut clicks: Vec<Click> = tables.clicks_of(banner_id).cloned().collect();
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(clicks)
    }

    async fn get_clicks_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>> {
        let mut clicks: Vec<Click> = self
            .tables
            .read()
            .await
            .clicks
            .values()
            .filter(|c| c.timestamp >= start && c.timestamp <= end)
            .cloned()
            .collect();
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(clicks)
    }

    async fn get_clicks_by_banner_and_date_range(
        &self,
        banner_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Click>> {
        let tables = self.tables.read().await;
        let mut clicks: Vec<Click> = tables
            .clicks_of(banner_id)
            .filter(|c| c.timestamp >= start && c.timestamp <= end)
            .cloned()
            .collect();
        clicks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(clicks)
    }

    async fn delete_click(&self, id: i64) -> Result<()> {
        self.tables
            .write()
            .await
            .clicks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::click_not_found(id))
    }

    async fn get_click_stats(&self, banner_id: i64) -> Result<ClickStats> {
        let tables = self.tables.read().await;

        let mut stats = ClickStats {
            banner_id,
            total_clicks: 0,
            first_click: None,
            last_click: None,
        };
        for click in tables.clicks_of(banner_id) {
            stats.total_clicks += 1;
            let ts = click.timestamp;
            stats.first_click = Some(stats.first_click.map_or(ts, |first| first.min(ts)));
            stats.last_click = stats.last_click.max(Some(ts));
        }
        Ok(stats)
    }

    async fn get_top_banners(&self, limit: usize) -> Result<Vec<BannerClickCount>> {
        let tables = self.tables.read().await;

        let mut counts: HashMap<i64, u64> = HashMap::new();
        for click in tables.clicks.values() {
            *counts.entry(click.banner_id).or_default() += 1;
        }

        let mut ranked: Vec<BannerClickCount> = tables
            .banners
            .values()
            .map(|b| BannerClickCount {
                banner_id: b.id,
                banner_name: b.name.clone(),
                click_count: counts.get(&b.id).copied().unwrap_or(0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.click_count
                .cmp(&a.click_count)
                .then_with(|| a.banner_name.cmp(&b.banner_name))
        });
        ranked.truncate(limit);
        Ok(ranked)
    }

    async fn get_clicks_by_hour(&self, banner_id: i64, date: NaiveDate) -> Result<Vec<HourlyClicks>> {
        let tables = self.tables.read().await;

        let mut hours: BTreeMap<u32, u64> = BTreeMap::new();
        for click in tables
            .clicks_of(banner_id)
            .filter(|c| c.timestamp.date_naive() == date)
        {
            *hours.entry(click.timestamp.hour()).or_default() += 1;
        }
        Ok(hours
            .into_iter()
            .map(|(hour, click_count)| HourlyClicks { hour, click_count })
            .collect())
    }

    async fn get_clicks_by_day(
        &self,
        banner_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyClicks>> {
        let tables = self.tables.read().await;

        let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for click in tables.clicks_of(banner_id) {
            let day = click.timestamp.date_naive();
            if day >= start && day <= end {
                *days.entry(day).or_default() += 1;
            }
        }
        Ok(days
            .into_iter()
            .map(|(date, click_count)| DailyClicks { date, click_count })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 15, 0).unwrap()
    }

    async fn click_at(repo: &InMemoryBannerRepository, banner_id: i64, ts: DateTime<Utc>) -> Click {
        repo.create_click(NewClick {
            banner_id,
            timestamp: Some(ts),
        })
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_banner() {
        let repo = InMemoryBannerRepository::new();

        let created = repo.create_banner("homepage").await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(repo.get_banner(1).await.unwrap(), created);
        assert_eq!(repo.get_banner_by_name("homepage").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_duplicate_and_blank_names_rejected() {
        let repo = InMemoryBannerRepository::new();
        repo.create_banner("homepage").await.unwrap();

        assert!(matches!(
            repo.create_banner("homepage").await,
            Err(RepositoryError::Conflict(_))
        ));
        assert!(matches!(
            repo.create_banner("  ").await,
            Err(RepositoryError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_update_banner() {
        let repo = InMemoryBannerRepository::new();
        let mut banner = repo.create_banner("old").await.unwrap();
        repo.create_banner("taken").await.unwrap();

        banner.name = "taken".to_string();
        assert!(matches!(
            repo.update_banner(&banner).await,
            Err(RepositoryError::Conflict(_))
        ));

        banner.name = "new".to_string();
        let stored = repo.update_banner(&banner).await.unwrap();
        assert_eq!(stored.name, "new");
        assert!(stored.updated_at >= stored.created_at);

        banner.id = 99;
        assert!(repo.update_banner(&banner).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_banner_removes_clicks() {
        let repo = InMemoryBannerRepository::new();
        let banner = repo.create_banner("gone").await.unwrap();
        let click = repo.create_click(NewClick::now(banner.id)).await.unwrap();

        repo.delete_banner(banner.id).await.unwrap();

        assert!(repo.get_banner(banner.id).await.unwrap_err().is_not_found());
        assert!(repo.get_click(click.id).await.unwrap_err().is_not_found());
        assert!(repo.delete_banner(banner.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_click_requires_banner() {
        let repo = InMemoryBannerRepository::new();
        let err = repo.create_click(NewClick::now(7)).await.unwrap_err();
        assert_eq!(err, RepositoryError::banner_not_found(7));
    }

    #[tokio::test]
    async fn test_click_stats() {
        let repo = InMemoryBannerRepository::new();
        let banner = repo.create_banner("stats").await.unwrap();

        let empty = repo.get_click_stats(banner.id).await.unwrap();
        assert_eq!(empty.total_clicks, 0);
        assert!(empty.first_click.is_none());

        click_at(&repo, banner.id, at(2, 10)).await;
        click_at(&repo, banner.id, at(1, 9)).await;
        click_at(&repo, banner.id, at(3, 8)).await;

        let stats = repo.get_click_stats(banner.id).await.unwrap();
        assert_eq!(stats.total_clicks, 3);
        assert_eq!(stats.first_click, Some(at(1, 9)));
        assert_eq!(stats.last_click, Some(at(3, 8)));

        let with_stats = repo.get_banner_with_stats(banner.id).await.unwrap();
        assert_eq!(with_stats.click_count, 3);
        assert_eq!(with_stats.last_click, Some(at(3, 8)));
    }

    #[tokio::test]
    async fn test_top_banners_ranking() {
        let repo = InMemoryBannerRepository::new();
        let a = repo.create_banner("alpha").await.unwrap();
        let b = repo.create_banner("bravo").await.unwrap();
        let c = repo.create_banner("charlie").await.unwrap();

        for _ in 0..2 {
            repo.create_click(NewClick::now(c.id)).await.unwrap();
        }
        repo.create_click(NewClick::now(b.id)).await.unwrap();

        let top = repo.get_top_banners(10).await.unwrap();
        let order: Vec<i64> = top.iter().map(|r| r.banner_id).collect();
        assert_eq!(order, vec![c.id, b.id, a.id]);
        assert_eq!(top[2].click_count, 0);

        assert_eq!(repo.get_top_banners(1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_search_and_ranges() {
        let repo = InMemoryBannerRepository::new();
        let banner = repo.create_banner("Summer Sale").await.unwrap();
        repo.create_banner("winter").await.unwrap();

        let found = repo.search_banners("summer").await.unwrap();
        assert_eq!(found.len(), 1);

        click_at(&repo, banner.id, at(1, 9)).await;
        click_at(&repo, banner.id, at(1, 9)).await;
        click_at(&repo, banner.id, at(1, 17)).await;
        click_at(&repo, banner.id, at(4, 12)).await;

        let in_range = repo
            .get_clicks_by_banner_and_date_range(banner.id, at(1, 0), at(2, 0))
            .await
            .unwrap();
        assert_eq!(in_range.len(), 3);
        assert_eq!(repo.get_clicks_by_date_range(at(3, 0), at(5, 0)).await.unwrap().len(), 1);

        let hourly = repo
            .get_clicks_by_hour(banner.id, at(1, 0).date_naive())
            .await
            .unwrap();
        assert_eq!(
            hourly,
            vec![
                HourlyClicks { hour: 9, click_count: 2 },
                HourlyClicks { hour: 17, click_count: 1 },
            ]
        );

        let daily = repo
            .get_clicks_by_day(banner.id, at(1, 0).date_naive(), at(4, 0).date_naive())
            .await
            .unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].click_count, 3);
    }
}
