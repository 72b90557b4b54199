use rust_decimal::Decimal;

use crate::core::money::{pct, round2};
use crate::modules::duplicatas::models::Duplicata;

/// Commission value of one installment.
///
/// The commission percentage applies to the full products total of the
/// order, split evenly across all installments; it is NOT a percentage of
/// the individual installment's value. Rounded to two decimals, midpoint
/// away from zero.
pub fn commission_value(
    commission_rate: Decimal,
    products_total: Decimal,
    installment_count: usize,
) -> Decimal {
    if installment_count == 0 {
        return Decimal::ZERO;
    }

    round2(pct(commission_rate) * products_total / Decimal::from(installment_count))
}

/// Rewrites the commission value of every duplicata in the set.
///
/// Full recompute by design: each invocation touches all installments of
/// the order regardless of which one triggered it. Installments without a
/// commission rate or without an id are skipped, matching the persistence
/// rule that only saved rows with a configured rate earn commission.
/// Returns the ids of the duplicatas whose value was (re)assigned.
pub fn recompute_set(duplicatas: &mut [Duplicata], products_total: Decimal) -> Vec<String> {
    let count = duplicatas.len();
    let mut touched = Vec::new();

    for duplicata in duplicatas.iter_mut() {
        let (Some(id), Some(rate)) = (duplicata.id.clone(), duplicata.commission_rate) else {
            continue;
        };

        duplicata.commission_value = Some(commission_value(rate, products_total, count));
        touched.push(id);
    }

    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn duplicata(id: Option<&str>, rate: Option<Decimal>) -> Duplicata {
        let mut d = Duplicata::new(
            "ord-1".to_string(),
            1,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            dec!(100),
            Decimal::ZERO,
            Decimal::ZERO,
            rate,
        )
        .unwrap();
        d.id = id.map(|s| s.to_string());
        d
    }

    #[test]
    fn test_commission_split_three_ways() {
        // 5% of 1000 over 3 installments: 50/3 = 16.666... -> 16.67
        assert_eq!(commission_value(dec!(5), dec!(1000), 3), dec!(16.67));
    }

    #[test]
    fn test_commission_single_installment() {
        assert_eq!(commission_value(dec!(5), dec!(1000), 1), dec!(50.00));
    }

    #[test]
    fn test_commission_zero_count() {
        assert_eq!(commission_value(dec!(5), dec!(1000), 0), Decimal::ZERO);
    }

    #[test]
    fn test_recompute_skips_unsaved_and_unrated() {
        let mut set = vec![
            duplicata(Some("d1"), Some(dec!(5))),
            duplicata(None, Some(dec!(5))),
            duplicata(Some("d3"), None),
        ];

        let touched = recompute_set(&mut set, dec!(1000));

        assert_eq!(touched, vec!["d1".to_string()]);
        // Count still divides by the full set size
        assert_eq!(set[0].commission_value, Some(dec!(16.67)));
        assert_eq!(set[1].commission_value, None);
        assert_eq!(set[2].commission_value, None);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut set = vec![
            duplicata(Some("d1"), Some(dec!(5))),
            duplicata(Some("d2"), Some(dec!(5))),
            duplicata(Some("d3"), Some(dec!(5))),
        ];

        recompute_set(&mut set, dec!(1000));
        let first: Vec<_> = set.iter().map(|d| d.commission_value).collect();

        recompute_set(&mut set, dec!(1000));
        let second: Vec<_> = set.iter().map(|d| d.commission_value).collect();

        assert_eq!(first, second);
        assert_eq!(set[0].commission_value, Some(dec!(16.67)));
    }
}
