use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::products::models::Product;

const PRODUCT_COLUMNS: &str = r#"
    id, name, list_price, weight, quantity_per_volume, category_id,
    subcategory_id, created_at, updated_at
"#;

/// MySQL repository for products
pub struct ProductRepository {
    pool: MySqlPool,
}

impl ProductRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, product: &Product) -> Result<Product> {
        let id = product
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, list_price, weight, quantity_per_volume,
                category_id, subcategory_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&product.name)
        .bind(product.list_price)
        .bind(product.weight)
        .bind(product.quantity_per_volume)
        .bind(&product.category_id)
        .bind(&product.subcategory_id)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = product.clone();
        created.id = Some(id);
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Product>> {
        let query = format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn list(&self) -> Result<Vec<Product>> {
        let query = format!("SELECT {} FROM products ORDER BY name", PRODUCT_COLUMNS);
        sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    /// Products filtered by category
    pub async fn list_by_category(&self, category_id: &str) -> Result<Vec<Product>> {
        let query = format!(
            "SELECT {} FROM products WHERE category_id = ? ORDER BY name",
            PRODUCT_COLUMNS
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn update(&self, product: &Product) -> Result<()> {
        let id = product
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update a product without an id"))?;

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?, list_price = ?, weight = ?, quantity_per_volume = ?,
                category_id = ?, subcategory_id = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&product.name)
        .bind(product.list_price)
        .bind(product.weight)
        .bind(product.quantity_per_volume)
        .bind(&product.category_id)
        .bind(&product.subcategory_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product '{}' not found", id)));
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product '{}' not found", id)));
        }

        Ok(())
    }
}
