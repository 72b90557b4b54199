use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::duplicatas::repositories::DuplicataRepository;
use crate::modules::duplicatas::services::commission;
use crate::modules::orders::repositories::OrderRepository;

/// Per-duplicata result of a commission recompute batch.
///
/// Writes are sequential and independent; a failed write does not roll back
/// the ones before it, so callers get the exact split of what was updated
/// and what is now stale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeOutcome {
    pub order_id: String,
    pub updated: Vec<String>,
    pub failures: Vec<RecomputeFailure>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeFailure {
    pub duplicata_id: String,
    pub message: String,
}

/// Rewrites the commission value of every duplicata of an order.
pub struct CommissionService {
    duplicatas: Arc<dyn DuplicataRepository>,
    orders: Arc<OrderRepository>,
}

impl CommissionService {
    pub fn new(duplicatas: Arc<dyn DuplicataRepository>, orders: Arc<OrderRepository>) -> Self {
        Self { duplicatas, orders }
    }

    /// Full recompute over the order's installment set.
    ///
    /// Every duplicata with an id and a commission rate is rewritten, no
    /// matter which edit triggered the call. Persistence failures are
    /// collected and reported; the loop never aborts early.
    pub async fn recompute_for_order(&self, order_id: &str) -> Result<RecomputeOutcome> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order '{}' not found", order_id)))?;

        self.recompute_with_total(order_id, order.products_total)
            .await
    }

    /// Recompute against an already-known products total.
    pub async fn recompute_with_total(
        &self,
        order_id: &str,
        products_total: rust_decimal::Decimal,
    ) -> Result<RecomputeOutcome> {
        let mut duplicatas = self.duplicatas.list_for_order(order_id).await?;
        let touched = commission::recompute_set(&mut duplicatas, products_total);

        let mut updated = Vec::new();
        let mut failures = Vec::new();

        for duplicata in &duplicatas {
            let (Some(id), Some(value)) = (duplicata.id.as_deref(), duplicata.commission_value)
            else {
                continue;
            };

            if !touched.iter().any(|t| t == id) {
                continue;
            }

            match self.duplicatas.update_commission_value(id, value).await {
                Ok(()) => updated.push(id.to_string()),
                Err(err) => {
                    warn!(
                        duplicata_id = %id,
                        order_id = %order_id,
                        error = %err,
                        "Failed to persist recomputed commission value"
                    );
                    failures.push(RecomputeFailure {
                        duplicata_id: id.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            order_id = %order_id,
            updated = updated.len(),
            failed = failures.len(),
            "Commission recompute finished"
        );

        Ok(RecomputeOutcome {
            order_id: order_id.to_string(),
            updated,
            failures,
        })
    }
}
