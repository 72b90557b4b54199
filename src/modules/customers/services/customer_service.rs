use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::customers::models::{Customer, CustomerRequest};
use crate::modules::customers::repositories::CustomerRepository;

/// Per-id result of a bulk customer deletion.
///
/// Each deletion is attempted independently; a failure is recorded and the
/// batch continues, so callers see exactly which records remain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteOutcome {
    pub deleted: Vec<String>,
    pub failures: Vec<BulkDeleteFailure>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteFailure {
    pub customer_id: String,
    pub message: String,
}

pub struct CustomerService {
    repo: Arc<CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<CustomerRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_customer(&self, request: CustomerRequest) -> Result<Customer> {
        let customer = Customer::new(request)?;
        self.repo.create(&customer).await
    }

    pub async fn get_customer(&self, id: &str) -> Result<Customer> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer '{}' not found", id)))
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.repo.list().await
    }

    pub async fn update_customer(&self, id: &str, request: CustomerRequest) -> Result<Customer> {
        let mut customer = self.get_customer(id).await?;
        customer.apply(request)?;
        self.repo.update(&customer).await?;
        Ok(customer)
    }

    pub async fn delete_customer(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await
    }

    /// Delete several customers, one at a time, reporting per-id outcomes.
    pub async fn bulk_delete(&self, ids: &[String]) -> Result<BulkDeleteOutcome> {
        let mut deleted = Vec::new();
        let mut failures = Vec::new();

        for id in ids {
            match self.repo.delete(id).await {
                Ok(()) => deleted.push(id.clone()),
                Err(err) => {
                    warn!(customer_id = %id, error = %err, "Failed to delete customer");
                    failures.push(BulkDeleteFailure {
                        customer_id: id.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            deleted = deleted.len(),
            failed = failures.len(),
            "Bulk customer deletion finished"
        );

        Ok(BulkDeleteOutcome { deleted, failures })
    }
}
