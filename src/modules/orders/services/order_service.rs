use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::middleware::Identity;
use crate::modules::discounts::models::DiscountSettings;
use crate::modules::discounts::services::DiscountService;
use crate::modules::duplicatas::services::CommissionService;
use crate::modules::orders::models::{
    CreateOrderRequest, DeliveryRegion, Order, OrderItem, OrderStatus, ShippingMode,
    UpdateOrderRequest,
};
use crate::modules::orders::repositories::OrderRepository;
use crate::modules::orders::services::pricing::{self, PricingRates, TaxConfig};

/// Service for order business logic: pricing, persistence, status flow and
/// salesperson scoping.
pub struct OrderService {
    repo: Arc<OrderRepository>,
    discounts: Arc<DiscountService>,
    commissions: Arc<CommissionService>,
}

impl OrderService {
    pub fn new(
        repo: Arc<OrderRepository>,
        discounts: Arc<DiscountService>,
        commissions: Arc<CommissionService>,
    ) -> Self {
        Self {
            repo,
            discounts,
            commissions,
        }
    }

    /// Price and persist a new order submitted by a salesperson.
    pub async fn create_order(
        &self,
        request: CreateOrderRequest,
        identity: &Identity,
    ) -> Result<Order> {
        let settings = self.discounts.get_settings().await?;
        let order = Self::build_priced_order(request, &identity.user_id, &settings)?;

        self.repo.create(&order).await
    }

    /// Fetch one order, enforcing the salesperson scoping rule.
    pub async fn get_order(&self, id: &str, identity: &Identity) -> Result<Order> {
        let order = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Order '{}' not found", id)))?;

        if !identity.can_access_order_of(&order.user_id) {
            return Err(AppError::unauthorized(
                "Salespeople may only view their own orders",
            ));
        }

        Ok(order)
    }

    /// List orders; non-admin callers only see their own.
    pub async fn list_orders(
        &self,
        identity: &Identity,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Order>> {
        let scope = if identity.is_admin() {
            None
        } else {
            Some(identity.user_id.as_str())
        };

        self.repo.list(scope, limit, offset).await
    }

    /// Replace items/flags, reprice, and recompute duplicata commissions
    /// since the order total may have changed.
    pub async fn update_order(
        &self,
        id: &str,
        request: UpdateOrderRequest,
        identity: &Identity,
    ) -> Result<Order> {
        let existing = self.get_order(id, identity).await?;

        if existing.status.is_terminal() {
            return Err(AppError::validation(format!(
                "Cannot edit an order in status {}",
                existing.status
            )));
        }

        let settings = self.discounts.get_settings().await?;
        let mut updated = Self::build_priced_order(request, &existing.user_id, &settings)?;
        updated.id = existing.id.clone();
        updated.status = existing.status;
        updated.created_at = existing.created_at;

        self.repo.update(&updated).await?;

        // Commission values depend on the products total; rewrite them all.
        // Failures are reported, not rolled back.
        match self.commissions.recompute_for_order(id).await {
            Ok(outcome) if !outcome.failures.is_empty() => {
                warn!(
                    order_id = %id,
                    failed = outcome.failures.len(),
                    "Commission recompute finished with failures"
                );
            }
            Ok(_) => {}
            Err(err) => {
                warn!(order_id = %id, error = %err, "Commission recompute failed");
            }
        }

        self.get_order(id, identity).await
    }

    /// Apply a validated status transition.
    pub async fn update_status(
        &self,
        id: &str,
        new_status: OrderStatus,
        identity: &Identity,
    ) -> Result<Order> {
        let mut order = self.get_order(id, identity).await?;

        order.update_status(new_status)?;
        self.repo.update_status(id, new_status).await?;

        Ok(order)
    }

    /// Build a fully priced order from a request. Pure except for clock reads.
    fn build_priced_order(
        request: CreateOrderRequest,
        user_id: &str,
        settings: &DiscountSettings,
    ) -> Result<Order> {
        let tax = TaxConfig {
            tax_substitution: request.tax_substitution,
            with_ipi: request.with_ipi,
        };
        let rates = PricingRates::from_settings(settings);

        for item in &request.items {
            if item.discount > settings.max_discount {
                return Err(AppError::validation(format!(
                    "Discount {}% exceeds the allowed maximum of {}%",
                    item.discount, settings.max_discount
                )));
            }
        }

        let items = request
            .items
            .into_iter()
            .map(|item| OrderItem::new(item, &tax, &rates))
            .collect::<Result<Vec<_>>>()?;

        let delivery_fee = Self::resolve_delivery_fee(
            request.shipping,
            request.delivery_region,
            settings,
        );
        let totals = pricing::aggregate_order(&items, delivery_fee);

        let now = Utc::now();
        let order = Order {
            id: None,
            customer_id: request.customer_id,
            user_id: user_id.to_string(),
            status: OrderStatus::Pending,
            payment_method: request.payment_method,
            shipping: request.shipping,
            delivery_region: request.delivery_region,
            transport_company_id: request.transport_company_id,
            tax_substitution: request.tax_substitution,
            with_ipi: request.with_ipi,
            full_invoice: request.full_invoice,
            half_invoice_percentage: request.half_invoice_percentage,
            half_invoice_type: request.half_invoice_type,
            delivery_fee: totals.delivery_fee,
            subtotal: totals.subtotal,
            total_discount: totals.total_discount,
            tax_total: totals.tax_total,
            products_total: totals.products_total,
            total: totals.total,
            created_at: Some(now),
            updated_at: Some(now),
            items,
        };

        order.validate()?;
        Ok(order)
    }

    fn resolve_delivery_fee(
        shipping: ShippingMode,
        region: Option<DeliveryRegion>,
        settings: &DiscountSettings,
    ) -> Decimal {
        match (shipping, region) {
            (ShippingMode::Pickup, _) => Decimal::ZERO,
            (ShippingMode::Delivery, Some(DeliveryRegion::Capital)) => {
                settings.delivery_fee_capital
            }
            (ShippingMode::Delivery, Some(DeliveryRegion::Interior)) => {
                settings.delivery_fee_interior
            }
            // Missing region is rejected later by Order::validate
            (ShippingMode::Delivery, None) => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::orders::models::{CreateOrderItemRequest, PaymentMethod};
    use rust_decimal_macros::dec;

    fn settings() -> DiscountSettings {
        DiscountSettings {
            delivery_fee_capital: dec!(50),
            delivery_fee_interior: dec!(80),
            st_rate: dec!(18),
            ..DiscountSettings::default()
        }
    }

    fn request(items: Vec<CreateOrderItemRequest>) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: "cust-1".to_string(),
            payment_method: PaymentMethod::Cash,
            shipping: ShippingMode::Pickup,
            delivery_region: None,
            transport_company_id: None,
            tax_substitution: false,
            with_ipi: false,
            full_invoice: true,
            half_invoice_percentage: None,
            half_invoice_type: None,
            items,
        }
    }

    fn item(list_price: Decimal, quantity: i32, discount: Decimal) -> CreateOrderItemRequest {
        CreateOrderItemRequest {
            product_id: "p".to_string(),
            product_name: "Product".to_string(),
            list_price,
            weight: Decimal::ZERO,
            quantity_per_volume: Decimal::ZERO,
            quantity,
            discount,
        }
    }

    #[test]
    fn test_two_item_pickup_scenario() {
        // Product A: 100 x2 at 10% off, Product B: 50 x1 full price
        let order = OrderService::build_priced_order(
            request(vec![item(dec!(100), 2, dec!(10)), item(dec!(50), 1, dec!(0))]),
            "user-1",
            &settings(),
        )
        .unwrap();

        assert_eq!(order.subtotal, dec!(230.00));
        assert_eq!(order.total_discount, dec!(20.00));
        assert_eq!(order.delivery_fee, dec!(0));
        assert_eq!(order.total, dec!(210.00));
        assert_eq!(order.products_total, dec!(230.00));
    }

    #[test]
    fn test_delivery_fee_from_region_table() {
        let mut req = request(vec![item(dec!(100), 1, dec!(0))]);
        req.shipping = ShippingMode::Delivery;
        req.delivery_region = Some(DeliveryRegion::Interior);

        let order = OrderService::build_priced_order(req, "user-1", &settings()).unwrap();

        assert_eq!(order.delivery_fee, dec!(80));
        assert_eq!(order.total, dec!(180.00));
    }

    #[test]
    fn test_repricing_is_idempotent() {
        let build = || {
            OrderService::build_priced_order(
                request(vec![item(dec!(33.33), 3, dec!(7.5)), item(dec!(12), 10, dec!(0))]),
                "user-1",
                &settings(),
            )
            .unwrap()
        };

        let first = build();
        let second = build();

        assert_eq!(first.subtotal, second.subtotal);
        assert_eq!(first.total_discount, second.total_discount);
        assert_eq!(first.tax_total, second.tax_total);
        assert_eq!(first.total, second.total);
    }

    #[test]
    fn test_discount_above_maximum_rejected() {
        let mut config = settings();
        config.max_discount = dec!(15);

        let result = OrderService::build_priced_order(
            request(vec![item(dec!(100), 1, dec!(20))]),
            "user-1",
            &config,
        );

        assert!(result.is_err());
    }
}
