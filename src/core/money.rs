use rust_decimal::{Decimal, RoundingStrategy};

/// Monetary scale used across the system (BRL, two decimal places)
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary amount to two decimal places.
///
/// Uses standard commercial rounding (midpoint away from zero), not the
/// banker's rounding that `Decimal::round_dp` defaults to. Commission values
/// and item prices must match what the sales team sees on paper.
pub fn round2(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a percentage (e.g. `10` for 10%) into a multiplier fraction.
pub fn pct(value: Decimal) -> Decimal {
    value / Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round2_standard_rounding() {
        // Midpoint rounds away from zero, not to even
        assert_eq!(round2(dec!(16.665)), dec!(16.67));
        assert_eq!(round2(dec!(16.664)), dec!(16.66));
        assert_eq!(round2(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_round2_not_bankers() {
        // Banker's rounding would give 2.34 here
        assert_eq!(round2(dec!(2.345)), dec!(2.35));
    }

    #[test]
    fn test_pct() {
        assert_eq!(pct(dec!(10)), dec!(0.1));
        assert_eq!(pct(dec!(0)), dec!(0));
    }
}
