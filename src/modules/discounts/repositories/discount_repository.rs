use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::discounts::models::DiscountSettings;

/// Repository for the single `discount_settings` row
pub struct DiscountRepository {
    pool: MySqlPool,
}

impl DiscountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings row, falling back to defaults when absent.
    pub async fn fetch(&self) -> Result<DiscountSettings> {
        let settings = sqlx::query_as::<_, DiscountSettings>(
            r#"
            SELECT id, ipi_rate, st_rate, delivery_fee_capital,
                   delivery_fee_interior, max_discount, updated_at
            FROM discount_settings
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(settings.unwrap_or_default())
    }

    /// Upsert the settings row.
    pub async fn save(&self, settings: &DiscountSettings) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO discount_settings (
                id, ipi_rate, st_rate, delivery_fee_capital,
                delivery_fee_interior, max_discount, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                ipi_rate = VALUES(ipi_rate),
                st_rate = VALUES(st_rate),
                delivery_fee_capital = VALUES(delivery_fee_capital),
                delivery_fee_interior = VALUES(delivery_fee_interior),
                max_discount = VALUES(max_discount),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(settings.id)
        .bind(settings.ipi_rate)
        .bind(settings.st_rate)
        .bind(settings.delivery_fee_capital)
        .bind(settings.delivery_fee_interior)
        .bind(settings.max_discount)
        .bind(settings.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }
}
