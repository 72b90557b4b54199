use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::warn;

use crate::core::Result;
use crate::modules::discounts::models::{DiscountSettings, UpdateDiscountSettingsRequest};
use crate::modules::discounts::repositories::DiscountRepository;
use crate::modules::discounts::services::SettingsCache;

/// Service for reading and updating the global discount settings.
///
/// Reads go through the TTL cache; a failed store read falls back to the
/// last known value when one exists.
pub struct DiscountService {
    repo: Arc<DiscountRepository>,
    cache: SettingsCache,
}

impl DiscountService {
    pub fn new(repo: Arc<DiscountRepository>, cache_ttl: Duration) -> Self {
        Self {
            repo,
            cache: SettingsCache::new(cache_ttl),
        }
    }

    /// Current settings, cached up to the configured TTL.
    pub async fn get_settings(&self) -> Result<DiscountSettings> {
        if let Some(settings) = self.cache.get_fresh().await {
            return Ok(settings);
        }

        match self.repo.fetch().await {
            Ok(settings) => {
                self.cache.store(settings.clone()).await;
                Ok(settings)
            }
            Err(err) => {
                // Stale fallback keeps order pricing alive through brief outages
                if let Some(stale) = self.cache.get_stale().await {
                    warn!(error = %err, "Settings fetch failed, serving stale cached value");
                    return Ok(stale);
                }
                Err(err)
            }
        }
    }

    /// Persist new settings and invalidate the cache.
    pub async fn update_settings(
        &self,
        request: UpdateDiscountSettingsRequest,
    ) -> Result<DiscountSettings> {
        let settings = DiscountSettings {
            id: 1,
            ipi_rate: request.ipi_rate,
            st_rate: request.st_rate,
            delivery_fee_capital: request.delivery_fee_capital,
            delivery_fee_interior: request.delivery_fee_interior,
            max_discount: request.max_discount,
            updated_at: Utc::now(),
        };
        settings.validate()?;

        self.repo.save(&settings).await?;
        self.cache.invalidate().await;

        Ok(settings)
    }
}
