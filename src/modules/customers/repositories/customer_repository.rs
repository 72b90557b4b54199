use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::customers::models::Customer;

const CUSTOMER_COLUMNS: &str = r#"
    id, name, cnpj, email, phone, address, city, state, created_at, updated_at
"#;

/// MySQL repository for customers
pub struct CustomerRepository {
    pool: MySqlPool,
}

impl CustomerRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, customer: &Customer) -> Result<Customer> {
        let id = customer
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, cnpj, email, phone, address, city, state,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&customer.name)
        .bind(&customer.cnpj)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = customer.clone();
        created.id = Some(id);
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Customer>> {
        let query = format!("SELECT {} FROM customers WHERE id = ?", CUSTOMER_COLUMNS);
        sqlx::query_as::<_, Customer>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn list(&self) -> Result<Vec<Customer>> {
        let query = format!("SELECT {} FROM customers ORDER BY name", CUSTOMER_COLUMNS);
        sqlx::query_as::<_, Customer>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn update(&self, customer: &Customer) -> Result<()> {
        let id = customer
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update a customer without an id"))?;

        let result = sqlx::query(
            r#"
            UPDATE customers SET
                name = ?, cnpj = ?, email = ?, phone = ?, address = ?,
                city = ?, state = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.cnpj)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.address)
        .bind(&customer.city)
        .bind(&customer.state)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Customer '{}' not found", id)));
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Customer '{}' not found", id)));
        }

        Ok(())
    }
}
