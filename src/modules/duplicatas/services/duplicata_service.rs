use std::sync::Arc;

use chrono::Utc;

use crate::core::{AppError, Result};
use crate::middleware::Identity;
use crate::modules::duplicatas::models::{
    CreateDuplicataRequest, Duplicata, UpdateDuplicataRequest,
};
use crate::modules::duplicatas::repositories::DuplicataRepository;
use crate::modules::duplicatas::services::commission_service::{
    CommissionService, RecomputeOutcome,
};
use crate::modules::orders::models::Order;
use crate::modules::orders::repositories::OrderRepository;

/// CRUD over duplicatas plus the recompute trigger: any edit to an
/// installment rewrites the commission values of the whole set.
///
/// Receivables inherit the owning order's access rule: a salesperson may
/// only touch installments of their own orders.
pub struct DuplicataService {
    repo: Arc<dyn DuplicataRepository>,
    orders: Arc<OrderRepository>,
    commissions: Arc<CommissionService>,
}

impl DuplicataService {
    pub fn new(
        repo: Arc<dyn DuplicataRepository>,
        orders: Arc<OrderRepository>,
        commissions: Arc<CommissionService>,
    ) -> Self {
        Self {
            repo,
            orders,
            commissions,
        }
    }

    pub async fn list_for_order(
        &self,
        order_id: &str,
        identity: &Identity,
    ) -> Result<Vec<Duplicata>> {
        self.authorized_order(order_id, identity).await?;
        self.repo.list_for_order(order_id).await
    }

    /// Create an installment under an order and recompute the set: adding
    /// one changes the even split for all of them.
    pub async fn create_duplicata(
        &self,
        order_id: &str,
        request: CreateDuplicataRequest,
        identity: &Identity,
    ) -> Result<(Duplicata, RecomputeOutcome)> {
        let order = self.authorized_order(order_id, identity).await?;

        let duplicata = Duplicata::new(
            order_id.to_string(),
            request.number,
            request.due_date,
            request.face_value,
            request.increase,
            request.decrease,
            request.commission_rate,
        )?;

        let created = self.repo.create(&duplicata).await?;
        let outcome = self
            .commissions
            .recompute_with_total(order_id, order.products_total)
            .await?;

        Ok((created, outcome))
    }

    /// Edit an installment and recompute commissions for its whole order.
    ///
    /// Payment status is deliberately not editable here; settlement goes
    /// through `settle_duplicata` so a paid installment can never be
    /// silently reverted.
    pub async fn update_duplicata(
        &self,
        id: &str,
        request: UpdateDuplicataRequest,
        identity: &Identity,
    ) -> Result<(Duplicata, RecomputeOutcome)> {
        let mut duplicata = self.find_duplicata(id).await?;
        let order = self
            .authorized_order(&duplicata.order_id, identity)
            .await?;

        if request.face_value <= rust_decimal::Decimal::ZERO {
            return Err(AppError::validation("Face value must be positive"));
        }

        if let Some(rate) = request.commission_rate {
            Duplicata::validate_commission_rate(rate)?;
        }

        duplicata.due_date = request.due_date;
        duplicata.face_value = request.face_value;
        duplicata.apply_adjustments(request.increase, request.decrease)?;
        duplicata.commission_rate = request.commission_rate;
        duplicata.updated_at = Some(Utc::now());

        self.repo.update(&duplicata).await?;

        let outcome = self
            .commissions
            .recompute_with_total(&duplicata.order_id, order.products_total)
            .await?;

        Ok((duplicata, outcome))
    }

    /// Settle an installment. Payment status does not touch commission
    /// values, so no recompute here.
    pub async fn settle_duplicata(&self, id: &str, identity: &Identity) -> Result<Duplicata> {
        let mut duplicata = self.find_duplicata(id).await?;
        self.authorized_order(&duplicata.order_id, identity).await?;

        duplicata.mark_paid()?;
        self.repo.update(&duplicata).await?;

        Ok(duplicata)
    }

    /// Remove an installment and recompute the remaining set.
    pub async fn delete_duplicata(
        &self,
        id: &str,
        identity: &Identity,
    ) -> Result<RecomputeOutcome> {
        let duplicata = self.find_duplicata(id).await?;
        let order = self
            .authorized_order(&duplicata.order_id, identity)
            .await?;

        self.repo.delete(id).await?;
        self.commissions
            .recompute_with_total(&duplicata.order_id, order.products_total)
            .await
    }

    /// Explicit full recompute, exposed for the order edit flow and the UI
    /// refresh button.
    pub async fn recompute_for_order(
        &self,
        order_id: &str,
        identity: &Identity,
    ) -> Result<RecomputeOutcome> {
        let order = self.authorized_order(order_id, identity).await?;
        self.commissions
            .recompute_with_total(order_id, order.products_total)
            .await
    }

    async fn find_duplicata(&self, id: &str) -> Result<Duplicata> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Duplicata '{}' not found", id)))
    }

    /// Resolve the owning order and enforce the salesperson scoping rule.
    async fn authorized_order(&self, order_id: &str, identity: &Identity) -> Result<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order '{}' not found", order_id)))?;

        ensure_order_access(&order.user_id, identity)?;
        Ok(order)
    }
}

fn ensure_order_access(order_user_id: &str, identity: &Identity) -> Result<()> {
    if !identity.can_access_order_of(order_user_id) {
        return Err(AppError::unauthorized(
            "Salespeople may only access receivables of their own orders",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Role;

    fn identity(user_id: &str, role: Role) -> Identity {
        Identity {
            user_id: user_id.to_string(),
            role,
        }
    }

    #[test]
    fn test_owner_accesses_own_receivables() {
        let seller = identity("user-1", Role::Salesperson);
        assert!(ensure_order_access("user-1", &seller).is_ok());
    }

    #[test]
    fn test_foreign_salesperson_is_rejected() {
        let seller = identity("user-1", Role::Salesperson);
        let result = ensure_order_access("user-2", &seller);

        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_admin_accesses_any_receivables() {
        let admin = identity("admin-1", Role::Admin);
        assert!(ensure_order_access("user-2", &admin).is_ok());
    }
}
