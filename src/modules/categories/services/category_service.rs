use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::categories::models::{Category, CategoryRequest, Subcategory};
use crate::modules::categories::repositories::CategoryRepository;

pub struct CategoryService {
    repo: Arc<CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_category(&self, request: CategoryRequest) -> Result<Category> {
        let category = Category::new(request.name)?;
        self.repo.create(&category).await
    }

    pub async fn get_category(&self, id: &str) -> Result<Category> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Category '{}' not found", id)))
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.repo.list().await
    }

    pub async fn rename_category(&self, id: &str, request: CategoryRequest) -> Result<Category> {
        let mut category = self.get_category(id).await?;
        category.rename(request.name)?;
        self.repo.update(&category).await?;
        Ok(category)
    }

    /// Delete a category; its subcategories go with it.
    pub async fn delete_category(&self, id: &str) -> Result<()> {
        self.repo.delete_cascade(id).await
    }

    /// Add a subcategory under an existing category.
    pub async fn create_subcategory(
        &self,
        category_id: &str,
        request: CategoryRequest,
    ) -> Result<Subcategory> {
        // Reject orphans up front rather than relying on the FK error.
        self.get_category(category_id).await?;

        let subcategory = Subcategory::new(category_id.to_string(), request.name)?;
        self.repo.create_subcategory(&subcategory).await
    }

    pub async fn delete_subcategory(&self, id: &str) -> Result<()> {
        self.repo.delete_subcategory(id).await
    }
}
