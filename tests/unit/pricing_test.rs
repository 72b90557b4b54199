use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use distriplast::modules::orders::models::{CreateOrderItemRequest, OrderItem};
use distriplast::modules::orders::services::pricing::{
    aggregate_order, price_item, PricingRates, TaxConfig,
};

fn rates() -> PricingRates {
    PricingRates {
        ipi_rate: dec!(10),
        st_rate: dec!(18),
    }
}

fn item(list_price: Decimal, quantity: i32, discount: Decimal) -> OrderItem {
    OrderItem::new(
        CreateOrderItemRequest {
            product_id: "prod-1".to_string(),
            product_name: "Saco plástico".to_string(),
            list_price,
            weight: Decimal::ZERO,
            quantity_per_volume: Decimal::ONE,
            quantity,
            discount,
        },
        &TaxConfig::default(),
        &rates(),
    )
    .unwrap()
}

#[test]
fn test_two_item_order_scenario() {
    // Product A: 100 x2 at 10% off; Product B: 50 x1 at no discount.
    // No taxes, pickup shipping.
    let items = vec![item(dec!(100), 2, dec!(10)), item(dec!(50), 1, dec!(0))];

    assert_eq!(items[0].final_price, dec!(90.00));
    assert_eq!(items[0].subtotal, dec!(180.00));
    assert_eq!(items[1].subtotal, dec!(50.00));

    let totals = aggregate_order(&items, Decimal::ZERO);

    assert_eq!(totals.subtotal, dec!(230.00));
    assert_eq!(totals.total_discount, dec!(20.00));
    assert_eq!(totals.total, dec!(210.00));
    assert_eq!(totals.products_total, dec!(230.00));
}

#[test]
fn test_pickup_order_has_no_delivery_fee() {
    let items = vec![item(dec!(100), 1, dec!(0))];
    let totals = aggregate_order(&items, Decimal::ZERO);

    assert_eq!(totals.delivery_fee, dec!(0));
    assert_eq!(totals.total, dec!(100.00));
}

#[test]
fn test_delivery_fee_enters_the_total() {
    let items = vec![item(dec!(100), 1, dec!(0))];
    let totals = aggregate_order(&items, dec!(35.00));

    assert_eq!(totals.delivery_fee, dec!(35.00));
    assert_eq!(totals.total, dec!(135.00));
}

#[test]
fn test_tax_total_feeds_the_order_total() {
    let tax = TaxConfig {
        with_ipi: true,
        tax_substitution: false,
    };
    let priced = OrderItem::new(
        CreateOrderItemRequest {
            product_id: "prod-1".to_string(),
            product_name: "Bobina".to_string(),
            list_price: dec!(100),
            weight: Decimal::ZERO,
            quantity_per_volume: Decimal::ONE,
            quantity: 2,
            discount: dec!(0),
        },
        &tax,
        &rates(),
    )
    .unwrap();

    let totals = aggregate_order(std::slice::from_ref(&priced), Decimal::ZERO);

    // IPI 10 per unit over 2 units
    assert_eq!(totals.tax_total, dec!(20.00));
    assert_eq!(totals.total, dec!(220.00));
}

#[test]
fn test_aggregation_is_idempotent() {
    let items = vec![item(dec!(73.90), 4, dec!(7.5)), item(dec!(12.35), 11, dec!(0))];

    let first = aggregate_order(&items, dec!(20));
    let second = aggregate_order(&items, dec!(20));

    assert_eq!(first, second);
}

proptest! {
    #[test]
    fn prop_pricer_never_negative(
        cents in 0i64..10_000_000,
        quantity in 1i32..10_000,
        discount_bp in 0i64..10_000,
    ) {
        let list_price = Decimal::new(cents, 2);
        let discount = Decimal::new(discount_bp, 2);
        let tax = TaxConfig { with_ipi: true, tax_substitution: true };

        let priced = price_item(list_price, quantity, discount, &tax, &rates());

        prop_assert!(priced.final_price >= Decimal::ZERO);
        prop_assert!(priced.ipi_value >= Decimal::ZERO);
        prop_assert!(priced.tax_substitution_value >= Decimal::ZERO);
        prop_assert!(priced.subtotal >= Decimal::ZERO);
        prop_assert!(priced.total_with_taxes >= priced.subtotal);
    }

    #[test]
    fn prop_subtotal_is_final_price_times_quantity(
        cents in 0i64..1_000_000,
        quantity in 1i32..1_000,
        discount_bp in 0i64..10_000,
    ) {
        let list_price = Decimal::new(cents, 2);
        let discount = Decimal::new(discount_bp, 2);

        let priced = price_item(list_price, quantity, discount, &TaxConfig::default(), &rates());

        // final_price is already rounded to cents, so the product is exact
        prop_assert_eq!(priced.subtotal, priced.final_price * Decimal::from(quantity));
    }
}
