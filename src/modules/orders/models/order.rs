use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::order_item::{CreateOrderItemRequest, OrderItem};
use crate::core::{AppError, Result};

/// Order status lifecycle
///
/// pending → confirmed → invoiced → completed, with canceled reachable from
/// any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Invoiced,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Invoiced => "invoiced",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }

    /// Whether `next` is a legal successor of this status.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return true;
        }

        match (*self, next) {
            (OrderStatus::Pending, OrderStatus::Confirmed)
            | (OrderStatus::Confirmed, OrderStatus::Invoiced)
            | (OrderStatus::Invoiced, OrderStatus::Completed) => true,
            (from, OrderStatus::Canceled) => !from.is_terminal(),
            _ => false,
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "invoiced" => Ok(OrderStatus::Invoiced),
            "completed" => Ok(OrderStatus::Completed),
            "canceled" => Ok(OrderStatus::Canceled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ShippingMode {
    Delivery,
    Pickup,
}

/// Region used to pick the delivery fee from the rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DeliveryRegion {
    Capital,
    Interior,
}

/// How a half invoice splits the order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HalfInvoiceType {
    Price,
    Quantity,
}

impl HalfInvoiceType {
    /// Portuguese label shown on printed documents
    pub fn label(&self) -> &'static str {
        match self {
            HalfInvoiceType::Price => "No Preço",
            HalfInvoiceType::Quantity => "Na Quantidade",
        }
    }
}

/// A sale: customer, salesperson, line items and derived totals.
///
/// Orders are never physically deleted; the lifecycle runs through `status`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    pub customer_id: String,

    /// Salesperson who owns this sale
    pub user_id: String,

    #[serde(skip_deserializing)]
    pub status: OrderStatus,

    pub payment_method: PaymentMethod,
    pub shipping: ShippingMode,
    pub delivery_region: Option<DeliveryRegion>,
    pub transport_company_id: Option<String>,

    pub tax_substitution: bool,
    pub with_ipi: bool,

    pub full_invoice: bool,
    pub half_invoice_percentage: Option<Decimal>,
    pub half_invoice_type: Option<HalfInvoiceType>,

    #[serde(skip_deserializing)]
    pub delivery_fee: Decimal,

    #[serde(skip_deserializing)]
    pub subtotal: Decimal,

    #[serde(skip_deserializing)]
    pub total_discount: Decimal,

    #[serde(skip_deserializing)]
    pub tax_total: Decimal,

    /// Basis for duplicata commission calculation
    #[serde(skip_deserializing)]
    pub products_total: Decimal,

    #[serde(skip_deserializing)]
    pub total: Decimal,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Line items (joined from order_items)
    #[sqlx(skip)]
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Cross-field validation run on create and update.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(AppError::validation("Order must have at least one item"));
        }

        if self.shipping == ShippingMode::Delivery && self.delivery_region.is_none() {
            return Err(AppError::validation(
                "Delivery orders must specify a delivery region",
            ));
        }

        if self.full_invoice {
            if self.half_invoice_percentage.is_some() || self.half_invoice_type.is_some() {
                return Err(AppError::validation(
                    "Full invoice orders cannot carry half invoice settings",
                ));
            }
        } else {
            let percentage = self.half_invoice_percentage.ok_or_else(|| {
                AppError::validation("Half invoice orders require halfInvoicePercentage")
            })?;

            if percentage <= Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
                return Err(AppError::validation(format!(
                    "halfInvoicePercentage must be within (0, 100], got {}",
                    percentage
                )));
            }

            if self.half_invoice_type.is_none() {
                return Err(AppError::validation(
                    "Half invoice orders require halfInvoiceType",
                ));
            }
        }

        Ok(())
    }

    /// Apply a status change, rejecting illegal transitions.
    pub fn update_status(&mut self, new_status: OrderStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(AppError::validation(format!(
                "Invalid status transition from {} to {}",
                self.status, new_status
            )));
        }

        self.status = new_status;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

/// Payload for creating an order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub payment_method: PaymentMethod,
    pub shipping: ShippingMode,
    pub delivery_region: Option<DeliveryRegion>,
    pub transport_company_id: Option<String>,
    #[serde(default)]
    pub tax_substitution: bool,
    #[serde(default)]
    pub with_ipi: bool,
    #[serde(default = "default_full_invoice")]
    pub full_invoice: bool,
    pub half_invoice_percentage: Option<Decimal>,
    pub half_invoice_type: Option<HalfInvoiceType>,
    pub items: Vec<CreateOrderItemRequest>,
}

fn default_full_invoice() -> bool {
    true
}

/// Payload for replacing an order's items and flags (triggers repricing)
pub type UpdateOrderRequest = CreateOrderRequest;

/// Payload for a status transition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base_order() -> Order {
        Order {
            id: Some("ord-1".to_string()),
            customer_id: "cust-1".to_string(),
            user_id: "user-1".to_string(),
            status: OrderStatus::Pending,
            payment_method: PaymentMethod::Cash,
            shipping: ShippingMode::Pickup,
            delivery_region: None,
            transport_company_id: None,
            tax_substitution: false,
            with_ipi: false,
            full_invoice: true,
            half_invoice_percentage: None,
            half_invoice_type: None,
            delivery_fee: Decimal::ZERO,
            subtotal: Decimal::ZERO,
            total_discount: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            products_total: Decimal::ZERO,
            total: Decimal::ZERO,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            items: vec![OrderItem {
                id: None,
                order_id: None,
                product_id: "p".to_string(),
                product_name: "p".to_string(),
                list_price: dec!(10),
                weight: Decimal::ZERO,
                quantity_per_volume: Decimal::ZERO,
                quantity: 1,
                discount: Decimal::ZERO,
                final_price: dec!(10),
                ipi_value: Decimal::ZERO,
                tax_substitution_value: Decimal::ZERO,
                subtotal: dec!(10),
                total_with_taxes: dec!(10),
            }],
        }
    }

    #[test]
    fn test_status_happy_path() {
        let mut order = base_order();

        assert!(order.update_status(OrderStatus::Confirmed).is_ok());
        assert!(order.update_status(OrderStatus::Invoiced).is_ok());
        assert!(order.update_status(OrderStatus::Completed).is_ok());
    }

    #[test]
    fn test_status_cannot_skip_ahead() {
        let mut order = base_order();
        let result = order.update_status(OrderStatus::Invoiced);

        assert!(result.is_err());
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn test_status_cannot_leave_terminal() {
        let mut order = base_order();
        order.status = OrderStatus::Completed;

        assert!(order.update_status(OrderStatus::Pending).is_err());
        assert!(order.update_status(OrderStatus::Canceled).is_err());
    }

    #[test]
    fn test_cancel_from_any_non_terminal() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Invoiced,
        ] {
            let mut order = base_order();
            order.status = status;
            assert!(order.update_status(OrderStatus::Canceled).is_ok());
        }
    }

    #[test]
    fn test_delivery_requires_region() {
        let mut order = base_order();
        order.shipping = ShippingMode::Delivery;

        assert!(order.validate().is_err());

        order.delivery_region = Some(DeliveryRegion::Capital);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_half_invoice_requires_percentage_and_type() {
        let mut order = base_order();
        order.full_invoice = false;
        assert!(order.validate().is_err());

        order.half_invoice_percentage = Some(dec!(50));
        assert!(order.validate().is_err());

        order.half_invoice_type = Some(HalfInvoiceType::Price);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_half_invoice_percentage_range() {
        let mut order = base_order();
        order.full_invoice = false;
        order.half_invoice_type = Some(HalfInvoiceType::Quantity);

        order.half_invoice_percentage = Some(dec!(0));
        assert!(order.validate().is_err());

        order.half_invoice_percentage = Some(dec!(100.5));
        assert!(order.validate().is_err());

        order.half_invoice_percentage = Some(dec!(100));
        assert!(order.validate().is_ok());
    }

    #[test]
    fn test_half_invoice_labels() {
        assert_eq!(HalfInvoiceType::Price.label(), "No Preço");
        assert_eq!(HalfInvoiceType::Quantity.label(), "Na Quantidade");
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut order = base_order();
        order.items.clear();
        assert!(order.validate().is_err());
    }
}
