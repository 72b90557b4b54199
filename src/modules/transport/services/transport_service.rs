use std::sync::Arc;

use crate::core::{AppError, Result};
use crate::modules::transport::models::{TransportCompany, TransportCompanyRequest};
use crate::modules::transport::repositories::TransportRepository;

pub struct TransportService {
    repo: Arc<TransportRepository>,
}

impl TransportService {
    pub fn new(repo: Arc<TransportRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_company(
        &self,
        request: TransportCompanyRequest,
    ) -> Result<TransportCompany> {
        let company = TransportCompany::new(request)?;
        self.repo.create(&company).await
    }

    pub async fn get_company(&self, id: &str) -> Result<TransportCompany> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transport company '{}' not found", id)))
    }

    pub async fn list_companies(&self) -> Result<Vec<TransportCompany>> {
        self.repo.list().await
    }

    pub async fn update_company(
        &self,
        id: &str,
        request: TransportCompanyRequest,
    ) -> Result<TransportCompany> {
        let mut company = self.get_company(id).await?;
        company.apply(request)?;
        self.repo.update(&company).await?;
        Ok(company)
    }

    pub async fn delete_company(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await
    }
}
