use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::products::models::{Product, ProductRequest};
use crate::modules::products::repositories::ProductRepository;

pub struct ProductService {
    repo: Arc<ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_product(&self, request: ProductRequest) -> Result<Product> {
        let product = Product::new(request)?;
        self.repo.create(&product).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product '{}' not found", id)))
    }

    pub async fn list_products(&self, category_id: Option<&str>) -> Result<Vec<Product>> {
        match category_id {
            Some(category_id) => self.repo.list_by_category(category_id).await,
            None => self.repo.list().await,
        }
    }

    pub async fn update_product(&self, id: &str, request: ProductRequest) -> Result<Product> {
        let mut product = self.get_product(id).await?;
        product.apply(request)?;
        self.repo.update(&product).await?;
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await
    }
}
