use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::document::normalize_cnpj;
use crate::core::{AppError, Result};

/// A freight carrier used on delivery orders. CNPJ stored normalized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransportCompany {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    pub name: String,

    pub cnpj: String,

    pub phone: Option<String>,

    pub email: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TransportCompany {
    pub fn new(request: TransportCompanyRequest) -> Result<Self> {
        let cnpj = Self::validate(&request)?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            name: request.name,
            cnpj,
            phone: request.phone,
            email: request.email,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn apply(&mut self, request: TransportCompanyRequest) -> Result<()> {
        let cnpj = Self::validate(&request)?;

        self.name = request.name;
        self.cnpj = cnpj;
        self.phone = request.phone;
        self.email = request.email;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    fn validate(request: &TransportCompanyRequest) -> Result<String> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation(
                "Transport company name cannot be empty",
            ));
        }

        normalize_cnpj(&request.cnpj)
    }
}

/// Payload for creating or replacing a transport company
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportCompanyRequest {
    pub name: String,
    pub cnpj: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_cnpj() {
        let company = TransportCompany::new(TransportCompanyRequest {
            name: "Transportes Rápido".to_string(),
            cnpj: "11.222.333/0001-81".to_string(),
            phone: None,
            email: None,
        })
        .unwrap();

        assert_eq!(company.cnpj, "11222333000181");
    }

    #[test]
    fn test_rejects_invalid_cnpj() {
        let result = TransportCompany::new(TransportCompanyRequest {
            name: "Transportes Rápido".to_string(),
            cnpj: "00000000000000".to_string(),
            phone: None,
            email: None,
        });

        assert!(result.is_err());
    }
}
