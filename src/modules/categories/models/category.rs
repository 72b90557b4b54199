use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Top level of the strict two-level product taxonomy.
///
/// Deleting a category removes its subcategories in the same transaction;
/// subcategories never exist without a parent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    pub name: String,

    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub subcategories: Vec<Subcategory>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(name: String) -> Result<Self> {
        validate_name(&name, "Category")?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            name,
            subcategories: Vec::new(),
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    pub fn rename(&mut self, name: String) -> Result<()> {
        validate_name(&name, "Category")?;
        self.name = name;
        self.updated_at = Some(Utc::now());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    #[serde(skip_deserializing)]
    pub category_id: String,

    pub name: String,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Subcategory {
    pub fn new(category_id: String, name: String) -> Result<Self> {
        validate_name(&name, "Subcategory")?;
        let now = Utc::now();

        Ok(Self {
            id: None,
            category_id,
            name,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }
}

fn validate_name(name: &str, kind: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation(format!("{} name cannot be empty", kind)));
    }
    Ok(())
}

/// Payload for creating or renaming a category or subcategory
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_requires_name() {
        assert!(Category::new("  ".to_string()).is_err());
        assert!(Category::new("Embalagens".to_string()).is_ok());
    }

    #[test]
    fn test_subcategory_binds_to_parent() {
        let sub = Subcategory::new("cat-1".to_string(), "Sacos".to_string()).unwrap();
        assert_eq!(sub.category_id, "cat-1");
    }
}
