use rust_decimal::Decimal;

use crate::core::money::{pct, round2};
use crate::modules::discounts::models::DiscountSettings;
use crate::modules::orders::models::OrderItem;

/// Order-level tax flags that drive per-item add-ons
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxConfig {
    pub tax_substitution: bool,
    pub with_ipi: bool,
}

/// Rates resolved from discount settings at pricing time
#[derive(Debug, Clone, Copy)]
pub struct PricingRates {
    /// IPI percentage (default 10)
    pub ipi_rate: Decimal,
    /// ST/MVA percentage applied to the discounted price
    pub st_rate: Decimal,
}

impl PricingRates {
    pub fn from_settings(settings: &DiscountSettings) -> Self {
        Self {
            ipi_rate: settings.ipi_rate,
            st_rate: settings.st_rate,
        }
    }
}

/// Derived monetary fields of a single line item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedItem {
    pub final_price: Decimal,
    pub ipi_value: Decimal,
    pub tax_substitution_value: Decimal,
    pub subtotal: Decimal,
    pub total_with_taxes: Decimal,
}

/// Prices one line item.
///
/// `final_price = list_price * (1 - discount/100)`, tax add-ons only when the
/// order-level flag is set, `subtotal = final_price * quantity`. Input
/// validation (quantity > 0, discount within [0, 100]) is the caller's
/// responsibility; `OrderItem::new` enforces it before reaching here.
pub fn price_item(
    list_price: Decimal,
    quantity: i32,
    discount: Decimal,
    tax: &TaxConfig,
    rates: &PricingRates,
) -> PricedItem {
    let qty = Decimal::from(quantity);
    let final_price = round2(list_price * (Decimal::ONE - pct(discount)));

    let ipi_value = if tax.with_ipi {
        round2(final_price * pct(rates.ipi_rate))
    } else {
        Decimal::ZERO
    };

    let tax_substitution_value = if tax.tax_substitution {
        round2(final_price * pct(rates.st_rate))
    } else {
        Decimal::ZERO
    };

    let subtotal = round2(final_price * qty);
    let total_with_taxes = round2((final_price + ipi_value + tax_substitution_value) * qty);

    PricedItem {
        final_price,
        ipi_value,
        tax_substitution_value,
        subtotal,
        total_with_taxes,
    }
}

/// Aggregated monetary totals of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub total_discount: Decimal,
    pub tax_total: Decimal,
    pub delivery_fee: Decimal,
    /// Basis for duplicata commissions
    pub products_total: Decimal,
    pub total: Decimal,
}

/// Sums priced items into order totals.
///
/// Pure function of the item set and the resolved delivery fee: recomputing
/// from the same inputs always yields the same totals. The delivery fee must
/// already be zero for pickup orders; resolving it from the shipping mode and
/// region table is the order service's job.
pub fn aggregate_order(items: &[OrderItem], delivery_fee: Decimal) -> OrderTotals {
    let mut subtotal = Decimal::ZERO;
    let mut total_discount = Decimal::ZERO;
    let mut tax_total = Decimal::ZERO;

    for item in items {
        let qty = Decimal::from(item.quantity);
        subtotal += item.subtotal;
        total_discount += (item.list_price - item.final_price) * qty;
        tax_total += (item.ipi_value + item.tax_substitution_value) * qty;
    }

    let total_discount = round2(total_discount);
    let tax_total = round2(tax_total);
    let total = round2(subtotal - total_discount + tax_total + delivery_fee);

    OrderTotals {
        subtotal,
        total_discount,
        tax_total,
        delivery_fee,
        products_total: subtotal,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn no_tax() -> TaxConfig {
        TaxConfig::default()
    }

    fn rates() -> PricingRates {
        PricingRates {
            ipi_rate: dec!(10),
            st_rate: dec!(18),
        }
    }

    #[test]
    fn test_price_item_discount_only() {
        let priced = price_item(dec!(100), 2, dec!(10), &no_tax(), &rates());

        assert_eq!(priced.final_price, dec!(90.00));
        assert_eq!(priced.ipi_value, dec!(0));
        assert_eq!(priced.tax_substitution_value, dec!(0));
        assert_eq!(priced.subtotal, dec!(180.00));
        assert_eq!(priced.total_with_taxes, dec!(180.00));
    }

    #[test]
    fn test_price_item_with_ipi() {
        let tax = TaxConfig {
            with_ipi: true,
            tax_substitution: false,
        };
        let priced = price_item(dec!(100), 1, dec!(0), &tax, &rates());

        assert_eq!(priced.final_price, dec!(100.00));
        assert_eq!(priced.ipi_value, dec!(10.00));
        assert_eq!(priced.total_with_taxes, dec!(110.00));
    }

    #[test]
    fn test_price_item_with_tax_substitution() {
        let tax = TaxConfig {
            with_ipi: false,
            tax_substitution: true,
        };
        let priced = price_item(dec!(50), 3, dec!(0), &tax, &rates());

        assert_eq!(priced.tax_substitution_value, dec!(9.00));
        assert_eq!(priced.subtotal, dec!(150.00));
        assert_eq!(priced.total_with_taxes, dec!(177.00));
    }

    #[test]
    fn test_price_item_all_taxes() {
        let tax = TaxConfig {
            with_ipi: true,
            tax_substitution: true,
        };
        let priced = price_item(dec!(200), 1, dec!(25), &tax, &rates());

        // final 150, IPI 15, ST 27
        assert_eq!(priced.final_price, dec!(150.00));
        assert_eq!(priced.ipi_value, dec!(15.00));
        assert_eq!(priced.tax_substitution_value, dec!(27.00));
        assert_eq!(priced.total_with_taxes, dec!(192.00));
    }

    #[test]
    fn test_subtotal_matches_final_price_times_quantity() {
        let priced = price_item(dec!(33.33), 7, dec!(12.5), &no_tax(), &rates());
        assert_eq!(priced.subtotal, round2(priced.final_price * dec!(7)));
    }
}
