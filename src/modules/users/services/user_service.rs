use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::users::models::{User, UserRequest, UserType};
use crate::modules::users::repositories::UserRepository;

pub struct UserService {
    repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_user(&self, request: UserRequest) -> Result<User> {
        let user = User::new(request)?;
        self.repo.create(&user).await
    }

    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{}' not found", id)))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.repo.list().await
    }

    pub async fn update_user(&self, id: &str, request: UserRequest) -> Result<User> {
        let mut user = self.get_user(id).await?;
        user.apply(request)?;
        self.repo.update(&user).await?;
        Ok(user)
    }

    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await
    }

    pub async fn list_user_types(&self) -> Result<Vec<UserType>> {
        self.repo.list_types().await
    }
}
