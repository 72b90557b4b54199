use std::sync::Arc;

use crate::core::Result;
use crate::modules::reports::models::Dashboard;
use crate::modules::reports::repositories::ReportRepository;

pub struct ReportService {
    repo: Arc<ReportRepository>,
}

impl ReportService {
    pub fn new(repo: Arc<ReportRepository>) -> Self {
        Self { repo }
    }

    pub async fn dashboard(&self) -> Result<Dashboard> {
        let by_status = self.repo.orders_by_status().await?;
        let pending = self.repo.pending_receivables().await?;

        Ok(Dashboard::from_parts(by_status, pending))
    }
}
