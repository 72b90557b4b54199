use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::document::normalize_cnpj;
use crate::core::{AppError, Result};

/// A buying customer (company). The CNPJ is stored normalized (digits only).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    pub name: String,

    pub cnpj: String,

    pub email: Option<String>,

    pub phone: Option<String>,

    pub address: Option<String>,

    pub city: Option<String>,

    pub state: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(request: CustomerRequest) -> Result<Self> {
        let cnpj = Self::validate(&request)?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            name: request.name,
            cnpj,
            email: request.email,
            phone: request.phone,
            address: request.address,
            city: request.city,
            state: request.state,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn apply(&mut self, request: CustomerRequest) -> Result<()> {
        let cnpj = Self::validate(&request)?;

        self.name = request.name;
        self.cnpj = cnpj;
        self.email = request.email;
        self.phone = request.phone;
        self.address = request.address;
        self.city = request.city;
        self.state = request.state;
        self.updated_at = Some(Utc::now());
        Ok(())
    }

    fn validate(request: &CustomerRequest) -> Result<String> {
        if request.name.trim().is_empty() {
            return Err(AppError::validation("Customer name cannot be empty"));
        }

        normalize_cnpj(&request.cnpj)
    }
}

/// Payload for creating or replacing a customer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub name: String,
    pub cnpj: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CustomerRequest {
        CustomerRequest {
            name: "Plásticos União Ltda".to_string(),
            cnpj: "11.222.333/0001-81".to_string(),
            email: Some("compras@uniao.example".to_string()),
            phone: None,
            address: None,
            city: Some("São Paulo".to_string()),
            state: Some("SP".to_string()),
        }
    }

    #[test]
    fn test_new_normalizes_cnpj() {
        let customer = Customer::new(request()).unwrap();
        assert_eq!(customer.cnpj, "11222333000181");
    }

    #[test]
    fn test_rejects_invalid_cnpj() {
        let mut req = request();
        req.cnpj = "11.222.333/0001-80".to_string();
        assert!(Customer::new(req).is_err());
    }

    #[test]
    fn test_rejects_blank_name() {
        let mut req = request();
        req.name = "   ".to_string();
        assert!(Customer::new(req).is_err());
    }
}
