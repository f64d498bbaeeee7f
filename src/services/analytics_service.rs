use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Duration, Utc};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::analytics::{DashboardStats, DateRange, DateRangePreset, WeekdayChartResponse};
use crate::models::weekday::WeekdayChartEntry;
use crate::services::api_client::ReservationsApi;
use crate::services::date_range::resolve_preset_today;
use crate::services::weekday_analytics::{aggregate, summarize};
use crate::services::weekday_normalizer::{
    extract_distribution_items, known_counts, normalize_items,
};

const CACHE_TTL_SECONDS: i64 = 5 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    restaurant_id: i64,
    range: Option<DateRange>,
}

#[derive(Clone)]
struct CachedDistribution {
    response: JsonValue,
    cached_at: DateTime<Utc>,
}

pub struct AnalyticsService<A: ReservationsApi> {
    api: Arc<A>,
    cache: RwLock<HashMap<CacheKey, CachedDistribution>>,
    cache_ttl: Duration,
}

impl<A: ReservationsApi> AnalyticsService<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            cache: RwLock::new(HashMap::new()),
            cache_ttl: Duration::seconds(CACHE_TTL_SECONDS),
        }
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Raw weekday payload, served from cache while fresh unless `force_refresh`.
    pub async fn weekday_distribution(
        &self,
        restaurant_id: i64,
        range: Option<&DateRange>,
        force_refresh: bool,
    ) -> AppResult<JsonValue> {
        let key = CacheKey {
            restaurant_id,
            range: range.cloned(),
        };

        if !force_refresh {
            if let Some(cached) = self.try_get_cache(&key) {
                debug!(target: "app::analytics", restaurant_id, "analytics cache hit");
                return Ok(cached);
            }
        }

        let response = self.api.weekday_distribution(restaurant_id, range).await?;
        self.insert_cache(key, response.clone());
        debug!(target: "app::analytics", restaurant_id, "analytics loaded and cached");
        Ok(response)
    }

    pub async fn weekday_chart(
        &self,
        restaurant_id: i64,
        range: Option<&DateRange>,
        force_refresh: bool,
    ) -> AppResult<WeekdayChartResponse> {
        let response = self
            .weekday_distribution(restaurant_id, range, force_refresh)
            .await?;
        let chart_data = chart_from_response(&response);
        Ok(WeekdayChartResponse {
            response,
            chart_data,
        })
    }

    pub async fn dashboard_stats(
        &self,
        restaurant_id: i64,
        range: Option<&DateRange>,
        force_refresh: bool,
    ) -> AppResult<DashboardStats> {
        let chart = self
            .weekday_chart(restaurant_id, range, force_refresh)
            .await?;
        Ok(summarize(&chart.chart_data))
    }

    pub fn range_for_preset(&self, preset: DateRangePreset) -> DateRange {
        resolve_preset_today(preset)
    }

    pub fn clear_cache(&self) {
        if let Ok(mut guard) = self.cache.write() {
            guard.clear();
        }
        debug!(target: "app::analytics", "analytics cache cleared");
    }

    pub fn clear_cache_for_restaurant(&self, restaurant_id: i64) {
        if let Ok(mut guard) = self.cache.write() {
            guard.retain(|key, _| key.restaurant_id != restaurant_id);
        }
        debug!(target: "app::analytics", restaurant_id, "analytics cache cleared for restaurant");
    }

    fn try_get_cache(&self, key: &CacheKey) -> Option<JsonValue> {
        let now = Utc::now();
        self.cache
            .read()
            .ok()
            .and_then(|guard| guard.get(key).cloned())
            .and_then(|entry| {
                if now - entry.cached_at < self.cache_ttl {
                    Some(entry.response)
                } else {
                    None
                }
            })
    }

    /// Stores a fresh entry and drops every expired one.
    fn insert_cache(&self, key: CacheKey, response: JsonValue) {
        let now = Utc::now();
        if let Ok(mut guard) = self.cache.write() {
            let before = guard.len();
            guard.retain(|_, entry| now - entry.cached_at < self.cache_ttl);
            let evicted = before - guard.len();
            if evicted > 0 {
                debug!(target: "app::analytics", evicted, "expired analytics entries evicted");
            }
            guard.insert(
                key,
                CachedDistribution {
                    response,
                    cached_at: now,
                },
            );
        }
    }
}

/// Envelope extraction, normalization and aggregation in one step. Payloads
/// with no item list produce a zero-filled week.
pub fn chart_from_response(response: &JsonValue) -> Vec<WeekdayChartEntry> {
    let records = match extract_distribution_items(response) {
        Some(items) => normalize_items(items),
        None => {
            warn!(
                target: "app::analytics",
                "weekday distribution has no item list, using an empty week"
            );
            Vec::new()
        }
    };
    aggregate(&known_counts(&records))
}
