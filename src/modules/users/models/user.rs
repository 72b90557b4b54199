use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// An application user (salesperson or administrator).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    pub name: String,

    pub email: String,

    /// Reference into `user_types`
    pub user_type_id: String,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl User {
    pub fn new(request: UserRequest) -> Result<Self> {
        Self::validate(&request)?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            name: request.name,
            email: request.email,
            user_type_id: request.user_type_id,
            active: request.active,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn apply(&mut self, request: UserRequest) -> Result<()> {
        Self::validate(&request)?;

        self.name = request.name;
        self.email = request.email;
        self.user_type_id = request.user_type_id;
        self.active = request.active;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    fn validate(request: &UserRequest) -> Result<()> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("User name cannot be empty"));
        }

        if !request.email.contains('@') {
            return Err(AppError::validation(format!(
                "Invalid email address: {}",
                request.email
            )));
        }

        if request.user_type_id.trim().is_empty() {
            return Err(AppError::validation("User type is required"));
        }

        Ok(())
    }
}

/// A user role record (administrator, salesperson)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserType {
    pub id: String,
    pub name: String,
}

/// Payload for creating or replacing a user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    pub name: String,
    pub email: String,
    pub user_type_id: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> UserRequest {
        UserRequest {
            name: "Ana Souza".to_string(),
            email: "ana@distriplast.example".to_string(),
            user_type_id: "salesperson".to_string(),
            active: true,
        }
    }

    #[test]
    fn test_new_accepts_valid_user() {
        assert!(User::new(request()).is_ok());
    }

    #[test]
    fn test_rejects_malformed_email() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        assert!(User::new(req).is_err());
    }

    #[test]
    fn test_rejects_missing_user_type() {
        let mut req = request();
        req.user_type_id = "".to_string();
        assert!(User::new(req).is_err());
    }
}
