use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::transport::models::TransportCompany;

const TRANSPORT_COLUMNS: &str = "id, name, cnpj, phone, email, created_at, updated_at";

/// MySQL repository for transport companies
pub struct TransportRepository {
    pool: MySqlPool,
}

impl TransportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, company: &TransportCompany) -> Result<TransportCompany> {
        let id = company
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO transport_companies (
                id, name, cnpj, phone, email, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&company.name)
        .bind(&company.cnpj)
        .bind(&company.phone)
        .bind(&company.email)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = company.clone();
        created.id = Some(id);
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<TransportCompany>> {
        let query = format!(
            "SELECT {} FROM transport_companies WHERE id = ?",
            TRANSPORT_COLUMNS
        );
        sqlx::query_as::<_, TransportCompany>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn list(&self) -> Result<Vec<TransportCompany>> {
        let query = format!(
            "SELECT {} FROM transport_companies ORDER BY name",
            TRANSPORT_COLUMNS
        );
        sqlx::query_as::<_, TransportCompany>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn update(&self, company: &TransportCompany) -> Result<()> {
        let id = company
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update a transport company without an id"))?;

        let result = sqlx::query(
            r#"
            UPDATE transport_companies SET
                name = ?, cnpj = ?, phone = ?, email = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&company.name)
        .bind(&company.cnpj)
        .bind(&company.phone)
        .bind(&company.email)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Transport company '{}' not found",
                id
            )));
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM transport_companies WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Transport company '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
