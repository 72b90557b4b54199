use chrono::Utc;
use sqlx::MySqlPool;
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::users::models::{User, UserType};

const USER_COLUMNS: &str = "id, name, email, user_type_id, active, created_at, updated_at";

/// MySQL repository for users and user types
pub struct UserRepository {
    pool: MySqlPool,
}

impl UserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> Result<User> {
        let id = user.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());

        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, user_type_id, active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.user_type_id)
        .bind(user.active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let mut created = user.clone();
        created.id = Some(id);
        Ok(created)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        let query = format!("SELECT {} FROM users ORDER BY name", USER_COLUMNS);
        sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    pub async fn update(&self, user: &User) -> Result<()> {
        let id = user
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Cannot update a user without an id"))?;

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?, email = ?, user_type_id = ?, active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.user_type_id)
        .bind(user.active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }

    pub async fn list_types(&self) -> Result<Vec<UserType>> {
        sqlx::query_as::<_, UserType>("SELECT id, name FROM user_types ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
