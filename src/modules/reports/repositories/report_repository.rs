use rust_decimal::Decimal;
use sqlx::{MySqlPool, Row};

use crate::core::{AppError, Result};
use crate::modules::reports::models::StatusSummary;

/// Read-only aggregation queries for the dashboard
pub struct ReportRepository {
    pool: MySqlPool,
}

impl ReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Orders grouped by status: count and summed total.
    pub async fn orders_by_status(&self) -> Result<Vec<StatusSummary>> {
        sqlx::query_as::<_, StatusSummary>(
            r#"
            SELECT status, COUNT(*) AS order_count,
                   COALESCE(SUM(total), 0) AS revenue
            FROM orders
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    /// Sum of final values over unpaid duplicatas.
    pub async fn pending_receivables(&self) -> Result<Decimal> {
        let row = sqlx::query(
            "SELECT COALESCE(SUM(final_value), 0) AS pending FROM duplicatas WHERE paid = FALSE",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        row.try_get("pending").map_err(AppError::Database)
    }
}
