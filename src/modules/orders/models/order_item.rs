use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};
use crate::modules::orders::services::pricing::{self, PricingRates, TaxConfig};

/// A single line of an order, carrying a snapshot of the product at sale
/// time plus the derived monetary fields.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    #[serde(skip_deserializing)]
    pub order_id: Option<String>,

    pub product_id: String,

    /// Product snapshot: edits to the catalog do not rewrite past orders
    pub product_name: String,
    pub list_price: Decimal,
    pub weight: Decimal,
    pub quantity_per_volume: Decimal,

    pub quantity: i32,

    /// Discount percentage granted on this line
    pub discount: Decimal,

    /// Derived: list_price * (1 - discount/100)
    #[serde(skip_deserializing)]
    pub final_price: Decimal,

    #[serde(skip_deserializing)]
    pub ipi_value: Decimal,

    #[serde(skip_deserializing)]
    pub tax_substitution_value: Decimal,

    /// Derived: final_price * quantity
    #[serde(skip_deserializing)]
    pub subtotal: Decimal,

    #[serde(skip_deserializing)]
    pub total_with_taxes: Decimal,
}

/// Incoming line item on order creation/update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemRequest {
    pub product_id: String,
    pub product_name: String,
    pub list_price: Decimal,
    #[serde(default)]
    pub weight: Decimal,
    #[serde(default)]
    pub quantity_per_volume: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub discount: Decimal,
}

impl OrderItem {
    /// Build a priced line item from a request, validating the inputs the
    /// pricer itself does not check.
    pub fn new(
        request: CreateOrderItemRequest,
        tax: &TaxConfig,
        rates: &PricingRates,
    ) -> Result<Self> {
        Self::validate_quantity(request.quantity)?;
        Self::validate_discount(request.discount)?;
        Self::validate_list_price(request.list_price)?;

        if request.product_name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        let priced = pricing::price_item(
            request.list_price,
            request.quantity,
            request.discount,
            tax,
            rates,
        );

        Ok(Self {
            id: None,
            order_id: None,
            product_id: request.product_id,
            product_name: request.product_name,
            list_price: request.list_price,
            weight: request.weight,
            quantity_per_volume: request.quantity_per_volume,
            quantity: request.quantity,
            discount: request.discount,
            final_price: priced.final_price,
            ipi_value: priced.ipi_value,
            tax_substitution_value: priced.tax_substitution_value,
            subtotal: priced.subtotal,
            total_with_taxes: priced.total_with_taxes,
        })
    }

    fn validate_quantity(quantity: i32) -> Result<()> {
        if quantity <= 0 {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_discount(discount: Decimal) -> Result<()> {
        if discount < Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Discount must be between 0 and 100, got: {}",
                discount
            )));
        }

        Ok(())
    }

    fn validate_list_price(list_price: Decimal) -> Result<()> {
        if list_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "List price must be non-negative, got: {}",
                list_price
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(list_price: Decimal, quantity: i32, discount: Decimal) -> CreateOrderItemRequest {
        CreateOrderItemRequest {
            product_id: "prod-1".to_string(),
            product_name: "PVC pipe 50mm".to_string(),
            list_price,
            weight: dec!(1.2),
            quantity_per_volume: dec!(10),
            quantity,
            discount,
        }
    }

    fn rates() -> PricingRates {
        PricingRates {
            ipi_rate: dec!(10),
            st_rate: dec!(18),
        }
    }

    #[test]
    fn test_item_creation_prices_immediately() {
        let item = OrderItem::new(request(dec!(100), 2, dec!(10)), &TaxConfig::default(), &rates())
            .unwrap();

        assert_eq!(item.final_price, dec!(90.00));
        assert_eq!(item.subtotal, dec!(180.00));
    }

    #[test]
    fn test_item_rejects_zero_quantity() {
        let result =
            OrderItem::new(request(dec!(100), 0, dec!(0)), &TaxConfig::default(), &rates());

        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Quantity must be positive"));
    }

    #[test]
    fn test_item_rejects_discount_out_of_range() {
        let result =
            OrderItem::new(request(dec!(100), 1, dec!(101)), &TaxConfig::default(), &rates());
        assert!(result.is_err());

        let result =
            OrderItem::new(request(dec!(100), 1, dec!(-1)), &TaxConfig::default(), &rates());
        assert!(result.is_err());
    }

    #[test]
    fn test_item_rejects_negative_list_price() {
        let result =
            OrderItem::new(request(dec!(-5), 1, dec!(0)), &TaxConfig::default(), &rates());
        assert!(result.is_err());
    }

    #[test]
    fn test_item_rejects_blank_product_name() {
        let mut req = request(dec!(10), 1, dec!(0));
        req.product_name = "  ".to_string();

        let result = OrderItem::new(req, &TaxConfig::default(), &rates());
        assert!(result.is_err());
    }
}
