//! Brand records and input payloads

use crate::core::entity::{CatalogRecord, SortKey};
use crate::core::error::FeriaResult;
use crate::core::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord for Brand {
    const UNIQUE_NAME: bool = true;

    fn resource_name() -> &'static str {
        "brands"
    }

    fn label() -> &'static str {
        "marca"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn search_terms(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.slug.as_str()]
    }

    fn sort_value(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.clone())),
            "slug" => Some(SortKey::Text(self.slug.clone())),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "updated_at" => Some(SortKey::Time(self.updated_at)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewBrand {
    pub name: String,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewBrand {
    pub fn validate(&self) -> FeriaResult<()> {
        validate::required("name", &self.name)?;
        validate::string_length("name", &self.name, 2, 100)?;
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo_url: Option<String>,
    pub active: Option<bool>,
}

impl BrandPatch {
    pub fn validate(&self) -> FeriaResult<()> {
        if let Some(name) = &self.name {
            validate::required("name", name)?;
            validate::string_length("name", name, 2, 100)?;
        }
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrandFilter {
    pub active: Option<bool>,
}

impl BrandFilter {
    pub fn matches(&self, brand: &Brand) -> bool {
        self.active.is_none_or(|a| brand.active == a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_sort_values() {
        let now = Utc::now();
        let brand = Brand {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            logo_url: None,
            active: true,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(brand.sort_value("name"), Some(SortKey::Text("Acme".to_string())));
        assert_eq!(brand.sort_value("nonexistent"), None);
    }

    #[test]
    fn test_new_brand_requires_name() {
        let brand = NewBrand {
            name: "".to_string(),
            slug: None,
            logo_url: None,
            active: true,
        };
        assert!(brand.validate().is_err());
    }
}
