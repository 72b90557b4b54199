use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Global pricing configuration: tax rates and the delivery fee table.
///
/// A single row in `discount_settings`; every order is priced against the
/// values in force at pricing time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSettings {
    pub id: i32,
    /// IPI percentage applied on top of the discounted price
    pub ipi_rate: Decimal,
    /// ST (tax substitution / MVA) percentage applied on the discounted price
    pub st_rate: Decimal,
    /// Delivery fee for capital-region addresses
    pub delivery_fee_capital: Decimal,
    /// Delivery fee for interior-region addresses
    pub delivery_fee_interior: Decimal,
    /// Maximum discount a salesperson may grant, in percent
    pub max_discount: Decimal,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl DiscountSettings {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [("ipiRate", self.ipi_rate), ("stRate", self.st_rate)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                return Err(AppError::validation(format!(
                    "{} must be between 0 and 100, got {}",
                    name, rate
                )));
            }
        }

        if self.max_discount < Decimal::ZERO || self.max_discount > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "maxDiscount must be between 0 and 100, got {}",
                self.max_discount
            )));
        }

        if self.delivery_fee_capital < Decimal::ZERO || self.delivery_fee_interior < Decimal::ZERO
        {
            return Err(AppError::validation("Delivery fees cannot be negative"));
        }

        Ok(())
    }
}

impl Default for DiscountSettings {
    fn default() -> Self {
        Self {
            id: 1,
            ipi_rate: Decimal::new(10, 0),
            st_rate: Decimal::ZERO,
            delivery_fee_capital: Decimal::ZERO,
            delivery_fee_interior: Decimal::ZERO,
            max_discount: Decimal::ONE_HUNDRED,
            updated_at: chrono::Utc::now(),
        }
    }
}

/// Payload for updating the settings row
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDiscountSettingsRequest {
    pub ipi_rate: Decimal,
    pub st_rate: Decimal,
    pub delivery_fee_capital: Decimal,
    pub delivery_fee_interior: Decimal,
    pub max_discount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_ipi_rate() {
        let settings = DiscountSettings::default();
        assert_eq!(settings.ipi_rate, dec!(10));
    }

    #[test]
    fn test_validate_rejects_out_of_range_rates() {
        let mut settings = DiscountSettings::default();
        settings.ipi_rate = dec!(101);
        assert!(settings.validate().is_err());

        settings.ipi_rate = dec!(-1);
        assert!(settings.validate().is_err());

        settings.ipi_rate = dec!(10);
        settings.delivery_fee_capital = dec!(-5);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(DiscountSettings::default().validate().is_ok());
    }
}
