use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::modules::orders::models::OrderStatus;

/// Order count and revenue for one status bucket
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusSummary {
    pub status: OrderStatus,
    pub order_count: i64,
    pub revenue: Decimal,
}

/// The dashboard payload: per-status order figures plus the total of
/// unpaid duplicata final values.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub by_status: Vec<StatusSummary>,
    pub total_orders: i64,
    pub total_revenue: Decimal,
    pub pending_receivables: Decimal,
}

impl Dashboard {
    /// Roll the per-status rows up into the grand totals. Revenue counts
    /// every non-canceled order.
    pub fn from_parts(by_status: Vec<StatusSummary>, pending_receivables: Decimal) -> Self {
        let total_orders = by_status.iter().map(|s| s.order_count).sum();
        let total_revenue = by_status
            .iter()
            .filter(|s| s.status != OrderStatus::Canceled)
            .map(|s| s.revenue)
            .sum();

        Self {
            by_status,
            total_orders,
            total_revenue,
            pending_receivables,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_exclude_canceled_revenue() {
        let dashboard = Dashboard::from_parts(
            vec![
                StatusSummary {
                    status: OrderStatus::Pending,
                    order_count: 2,
                    revenue: dec!(500),
                },
                StatusSummary {
                    status: OrderStatus::Completed,
                    order_count: 1,
                    revenue: dec!(300),
                },
                StatusSummary {
                    status: OrderStatus::Canceled,
                    order_count: 4,
                    revenue: dec!(1000),
                },
            ],
            dec!(150),
        );

        assert_eq!(dashboard.total_orders, 7);
        assert_eq!(dashboard.total_revenue, dec!(800));
        assert_eq!(dashboard.pending_receivables, dec!(150));
    }
}
