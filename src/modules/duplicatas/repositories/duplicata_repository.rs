use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::duplicatas::models::Duplicata;

/// Persistence seam for duplicatas.
///
/// A trait so the commission recompute loop can be exercised against an
/// in-memory implementation in tests, including its partial-failure path.
#[async_trait]
pub trait DuplicataRepository: Send + Sync {
    async fn create(&self, duplicata: &Duplicata) -> Result<Duplicata>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Duplicata>>;

    /// All duplicatas of one order, ordered by installment number.
    async fn list_for_order(&self, order_id: &str) -> Result<Vec<Duplicata>>;

    async fn update(&self, duplicata: &Duplicata) -> Result<()>;

    /// Persist only the recomputed commission value of one duplicata.
    async fn update_commission_value(&self, id: &str, value: Decimal) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

// `increase`/`decrease` are reserved words in MySQL 8, hence the backticks.
const DUPLICATA_COLUMNS: &str = r#"
    id, order_id, number, due_date, face_value, `increase`, `decrease`,
    final_value, commission_rate, commission_value, paid,
    invoice_pdf_url, boleto_pdf_url, created_at, updated_at
"#;

/// MySQL-backed duplicata repository
pub struct MySqlDuplicataRepository {
    pool: MySqlPool,
}

impl MySqlDuplicataRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DuplicataRepository for MySqlDuplicataRepository {
    async fn create(&self, duplicata: &Duplicata) -> Result<Duplicata> {
        let id = duplicata
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO duplicatas (
                id, order_id, number, due_date, face_value, `increase`,
                `decrease`, final_value, commission_rate, commission_value,
                paid, invoice_pdf_url, boleto_pdf_url, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&duplicata.order_id)
        .bind(duplicata.number)
        .bind(duplicata.due_date)
        .bind(duplicata.face_value)
        .bind(duplicata.increase)
        .bind(duplicata.decrease)
        .bind(duplicata.final_value)
        .bind(duplicata.commission_rate)
        .bind(duplicata.commission_value)
        .bind(duplicata.paid)
        .bind(&duplicata.invoice_pdf_url)
        .bind(&duplicata.boleto_pdf_url)
        .bind(duplicata.created_at)
        .bind(duplicata.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = duplicata.clone();
        created.id = Some(id);
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Duplicata>> {
        let query = format!("SELECT {} FROM duplicatas WHERE id = ?", DUPLICATA_COLUMNS);
        sqlx::query_as::<_, Duplicata>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_order(&self, order_id: &str) -> Result<Vec<Duplicata>> {
        let query = format!(
            "SELECT {} FROM duplicatas WHERE order_id = ? ORDER BY number",
            DUPLICATA_COLUMNS
        );
        sqlx::query_as::<_, Duplicata>(&query)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, duplicata: &Duplicata) -> Result<()> {
        let id = duplicata
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update a duplicata without an id"))?;

        let result = sqlx::query(
            r#"
            UPDATE duplicatas SET
                due_date = ?, face_value = ?, `increase` = ?, `decrease` = ?,
                final_value = ?, commission_rate = ?, commission_value = ?,
                paid = ?, invoice_pdf_url = ?, boleto_pdf_url = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(duplicata.due_date)
        .bind(duplicata.face_value)
        .bind(duplicata.increase)
        .bind(duplicata.decrease)
        .bind(duplicata.final_value)
        .bind(duplicata.commission_rate)
        .bind(duplicata.commission_value)
        .bind(duplicata.paid)
        .bind(&duplicata.invoice_pdf_url)
        .bind(&duplicata.boleto_pdf_url)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Duplicata '{}' not found", id)));
        }

        Ok(())
    }

    async fn update_commission_value(&self, id: &str, value: Decimal) -> Result<()> {
        let result =
            sqlx::query("UPDATE duplicatas SET commission_value = ?, updated_at = ? WHERE id = ?")
                .bind(value)
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Duplicata '{}' not found", id)));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM duplicatas WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Duplicata '{}' not found", id)));
        }

        Ok(())
    }
}
