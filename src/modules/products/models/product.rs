use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// A sellable product. Orders copy these fields into item snapshots at
/// pricing time, so later edits here never reshape past orders.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    pub name: String,

    pub list_price: Decimal,

    /// Unit weight in kilograms
    pub weight: Option<Decimal>,

    /// Units packed per volume (box, bag)
    pub quantity_per_volume: Option<i32>,

    pub category_id: Option<String>,

    pub subcategory_id: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn new(request: ProductRequest) -> Result<Self> {
        Self::validate(&request)?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            name: request.name,
            list_price: request.list_price,
            weight: request.weight,
            quantity_per_volume: request.quantity_per_volume,
            category_id: request.category_id,
            subcategory_id: request.subcategory_id,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn apply(&mut self, request: ProductRequest) -> Result<()> {
        Self::validate(&request)?;

        self.name = request.name;
        self.list_price = request.list_price;
        self.weight = request.weight;
        self.quantity_per_volume = request.quantity_per_volume;
        self.category_id = request.category_id;
        self.subcategory_id = request.subcategory_id;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    fn validate(request: &ProductRequest) -> Result<()> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("Product name cannot be empty"));
        }

        if request.list_price < Decimal::ZERO {
            return Err(AppError::validation("List price cannot be negative"));
        }

        if let Some(weight) = request.weight {
            if weight < Decimal::ZERO {
                return Err(AppError::validation("Weight cannot be negative"));
            }
        }

        if let Some(qty) = request.quantity_per_volume {
            if qty < 1 {
                return Err(AppError::validation(
                    "Quantity per volume must be at least 1",
                ));
            }
        }

        Ok(())
    }
}

/// Payload for creating or replacing a product
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub list_price: Decimal,
    pub weight: Option<Decimal>,
    pub quantity_per_volume: Option<i32>,
    pub category_id: Option<String>,
    pub subcategory_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> ProductRequest {
        ProductRequest {
            name: "Saco plástico 30x40".to_string(),
            list_price: dec!(125.50),
            weight: Some(dec!(0.02)),
            quantity_per_volume: Some(1000),
            category_id: None,
            subcategory_id: None,
        }
    }

    #[test]
    fn test_new_accepts_valid_product() {
        let product = Product::new(request()).unwrap();
        assert_eq!(product.list_price, dec!(125.50));
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut req = request();
        req.list_price = dec!(-1);
        assert!(Product::new(req).is_err());
    }

    #[test]
    fn test_rejects_zero_quantity_per_volume() {
        let mut req = request();
        req.quantity_per_volume = Some(0);
        assert!(Product::new(req).is_err());
    }
}
