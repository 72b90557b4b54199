use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// A receivable installment ("duplicata") of an order.
///
/// Face value plus increase/decrease adjustments give the final value. The
/// commission value is derived from the order's products total, split evenly
/// across all installments of the order, and rewritten on every recompute.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Duplicata {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    #[serde(skip_deserializing)]
    pub order_id: String,

    /// Sequence within the order (1, 2, 3...)
    pub number: i32,

    pub due_date: NaiveDate,

    pub face_value: Decimal,

    /// Additions to the face value (interest, fees)
    #[serde(default)]
    pub increase: Decimal,

    /// Deductions from the face value (rebates, early payment)
    #[serde(default)]
    pub decrease: Decimal,

    /// Derived: face_value + increase - decrease
    #[serde(skip_deserializing)]
    pub final_value: Decimal,

    /// Commission percentage over the order's products total
    pub commission_rate: Option<Decimal>,

    /// Derived: (commission_rate/100) * products_total / installment count
    #[serde(skip_deserializing)]
    pub commission_value: Option<Decimal>,

    #[serde(default)]
    pub paid: bool,

    /// Public URL of the uploaded invoice PDF, when one exists
    pub invoice_pdf_url: Option<String>,

    /// Public URL of the uploaded bank slip PDF, when one exists
    pub boleto_pdf_url: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Duplicata {
    pub fn new(
        order_id: String,
        number: i32,
        due_date: NaiveDate,
        face_value: Decimal,
        increase: Decimal,
        decrease: Decimal,
        commission_rate: Option<Decimal>,
    ) -> Result<Self> {
        if number < 1 {
            return Err(AppError::validation(format!(
                "Duplicata number must be positive, got {}",
                number
            )));
        }

        if face_value <= Decimal::ZERO {
            return Err(AppError::validation("Face value must be positive"));
        }

        if increase < Decimal::ZERO || decrease < Decimal::ZERO {
            return Err(AppError::validation(
                "Adjustments cannot be negative; use the opposite field instead",
            ));
        }

        if let Some(rate) = commission_rate {
            Self::validate_commission_rate(rate)?;
        }

        let final_value = face_value + increase - decrease;
        if final_value < Decimal::ZERO {
            return Err(AppError::validation(
                "Adjustments cannot drive the final value below zero",
            ));
        }

        let now = Utc::now();

        Ok(Self {
            id: None,
            order_id,
            number,
            due_date,
            face_value,
            increase,
            decrease,
            final_value,
            commission_rate,
            commission_value: None,
            paid: false,
            invoice_pdf_url: None,
            boleto_pdf_url: None,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn validate_commission_rate(rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Commission rate must be between 0 and 100, got {}",
                rate
            )));
        }

        Ok(())
    }

    /// Recompute the final value after editing adjustments.
    pub fn apply_adjustments(&mut self, increase: Decimal, decrease: Decimal) -> Result<()> {
        if increase < Decimal::ZERO || decrease < Decimal::ZERO {
            return Err(AppError::validation("Adjustments cannot be negative"));
        }

        let final_value = self.face_value + increase - decrease;
        if final_value < Decimal::ZERO {
            return Err(AppError::validation(
                "Adjustments cannot drive the final value below zero",
            ));
        }

        self.increase = increase;
        self.decrease = decrease;
        self.final_value = final_value;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    pub fn mark_paid(&mut self) -> Result<()> {
        if self.paid {
            return Err(AppError::validation(format!(
                "Duplicata {} is already settled",
                self.number
            )));
        }

        self.paid = true;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

/// Storage filename for an uploaded bank slip PDF.
///
/// Pattern `boleto_<duplicataId>_<timestamp>.pdf`; the timestamp keeps
/// re-uploads from clobbering earlier artifacts.
pub fn boleto_filename(duplicata_id: &str, uploaded_at: DateTime<Utc>) -> String {
    format!("boleto_{}_{}.pdf", duplicata_id, uploaded_at.timestamp_millis())
}

/// Payload for creating a duplicata under an order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDuplicataRequest {
    pub number: i32,
    pub due_date: NaiveDate,
    pub face_value: Decimal,
    #[serde(default)]
    pub increase: Decimal,
    #[serde(default)]
    pub decrease: Decimal,
    pub commission_rate: Option<Decimal>,
}

/// Payload for editing a duplicata (triggers a full commission recompute).
///
/// Carries no payment flag: settlement is a separate one-way operation, so
/// an edit can never flip a settled installment back to open.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDuplicataRequest {
    pub due_date: NaiveDate,
    pub face_value: Decimal,
    #[serde(default)]
    pub increase: Decimal,
    #[serde(default)]
    pub decrease: Decimal,
    pub commission_rate: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn duplicata() -> Duplicata {
        Duplicata::new(
            "ord-1".to_string(),
            1,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            dec!(500),
            Decimal::ZERO,
            Decimal::ZERO,
            Some(dec!(5)),
        )
        .unwrap()
    }

    #[test]
    fn test_final_value_derivation() {
        let d = Duplicata::new(
            "ord-1".to_string(),
            1,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            dec!(500),
            dec!(25),
            dec!(10),
            None,
        )
        .unwrap();

        assert_eq!(d.final_value, dec!(515));
    }

    #[test]
    fn test_rejects_nonpositive_face_value() {
        let result = Duplicata::new(
            "ord-1".to_string(),
            1,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            dec!(0),
            Decimal::ZERO,
            Decimal::ZERO,
            None,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_commission_rate_out_of_range() {
        let result = Duplicata::new(
            "ord-1".to_string(),
            1,
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            dec!(100),
            Decimal::ZERO,
            Decimal::ZERO,
            Some(dec!(120)),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_apply_adjustments() {
        let mut d = duplicata();
        d.apply_adjustments(dec!(10), dec!(5)).unwrap();

        assert_eq!(d.final_value, dec!(505));
        assert!(d.apply_adjustments(Decimal::ZERO, dec!(600)).is_err());
    }

    #[test]
    fn test_cannot_settle_twice() {
        let mut d = duplicata();
        d.mark_paid().unwrap();

        assert!(d.mark_paid().is_err());
    }

    #[test]
    fn test_update_payload_cannot_revert_settlement() {
        // A client sending "paid": false on an edit must not unsettle the
        // installment; the field is simply not part of the payload.
        let request: UpdateDuplicataRequest = serde_json::from_str(
            r#"{"dueDate":"2026-01-15","faceValue":500,"paid":false}"#,
        )
        .unwrap();

        let mut d = duplicata();
        d.mark_paid().unwrap();

        d.due_date = request.due_date;
        d.face_value = request.face_value;
        d.apply_adjustments(request.increase, request.decrease).unwrap();

        assert!(d.paid);
    }

    #[test]
    fn test_boleto_filename_pattern() {
        let uploaded = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let name = boleto_filename("dup-42", uploaded);

        assert!(name.starts_with("boleto_dup-42_"));
        assert!(name.ends_with(".pdf"));
        assert_eq!(name, format!("boleto_dup-42_{}.pdf", uploaded.timestamp_millis()));
    }
}
