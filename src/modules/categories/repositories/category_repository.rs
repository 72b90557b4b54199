use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::categories::models::{Category, Subcategory};

const CATEGORY_COLUMNS: &str = "id, name, created_at, updated_at";
const SUBCATEGORY_COLUMNS: &str = "id, category_id, name, created_at, updated_at";

/// MySQL repository for the category/subcategory tree
pub struct CategoryRepository {
    pool: MySqlPool,
}

impl CategoryRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, category: &Category) -> Result<Category> {
        let id = category
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            "INSERT INTO categories (id, name, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = category.clone();
        created.id = Some(id);
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = ?", CATEGORY_COLUMNS);
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match category {
            Some(mut category) => {
                category.subcategories = self.find_subcategories(id).await?;
                Ok(Some(category))
            }
            None => Ok(None),
        }
    }

    /// All categories with their subcategories attached.
    pub async fn list(&self) -> Result<Vec<Category>> {
        let query = format!("SELECT {} FROM categories ORDER BY name", CATEGORY_COLUMNS);
        let mut categories = sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let sub_query = format!(
            "SELECT {} FROM subcategories ORDER BY name",
            SUBCATEGORY_COLUMNS
        );
        let subcategories = sqlx::query_as::<_, Subcategory>(&sub_query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        for category in categories.iter_mut() {
            let id = category.id.as_deref().unwrap_or_default();
            category.subcategories = subcategories
                .iter()
                .filter(|s| s.category_id == id)
                .cloned()
                .collect();
        }

        Ok(categories)
    }

    pub async fn update(&self, category: &Category) -> Result<()> {
        let id = category
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update a category without an id"))?;

        let result = sqlx::query("UPDATE categories SET name = ?, updated_at = ? WHERE id = ?")
            .bind(&category.name)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Category '{}' not found", id)));
        }

        Ok(())
    }

    /// Delete a category and its subcategories atomically.
    pub async fn delete_cascade(&self, id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        sqlx::query("DELETE FROM subcategories WHERE category_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            tx.rollback().await.map_err(AppError::Database)?;
            return Err(AppError::not_found(format!("Category '{}' not found", id)));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    pub async fn create_subcategory(&self, subcategory: &Subcategory) -> Result<Subcategory> {
        let id = subcategory
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO subcategories (id, category_id, name, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&subcategory.category_id)
        .bind(&subcategory.name)
        .bind(subcategory.created_at)
        .bind(subcategory.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = subcategory.clone();
        created.id = Some(id);
        Ok(created)
    }

    pub async fn delete_subcategory(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM subcategories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Subcategory '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn find_subcategories(&self, category_id: &str) -> Result<Vec<Subcategory>> {
        let query = format!(
            "SELECT {} FROM subcategories WHERE category_id = ? ORDER BY name",
            SUBCATEGORY_COLUMNS
        );
        sqlx::query_as::<_, Subcategory>(&query)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
