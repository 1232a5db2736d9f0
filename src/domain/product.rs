//! Product records, status enum, and input payloads
//!
//! Products always belong to a category and a store; the brand reference is
//! optional but must exist when supplied. SKU and barcode are unique within
//! the collection (barcode only when present).

use crate::core::entity::{CatalogRecord, SortKey};
use crate::core::error::FeriaResult;
use crate::core::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Product lifecycle status
///
/// The transition graph is deliberately unconstrained: `update_status` moves
/// a product from any status to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
    Archived,
    Exhausted,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Draft => "draft",
            ProductStatus::Published => "published",
            ProductStatus::Archived => "archived",
            ProductStatus::Exhausted => "exhausted",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub sku: String,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    pub status: ProductStatus,
    pub featured: bool,
    pub category_id: Uuid,
    pub brand_id: Option<Uuid>,
    pub store_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord for Product {
    const UNIQUE_NAME: bool = false;

    fn resource_name() -> &'static str {
        "products"
    }

    fn label() -> &'static str {
        "producto"
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
        let mut terms = vec![self.name.as_str(), self.slug.as_str(), self.sku.as_str()];
        if let Some(barcode) = &self.barcode {
            terms.push(barcode.as_str());
        }
        if let Some(desc) = &self.description {
            terms.push(desc.as_str());
        }
        terms
    }

    fn sort_value(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.clone())),
            "slug" => Some(SortKey::Text(self.slug.clone())),
            "sku" => Some(SortKey::Text(self.sku.clone())),
            "price" => Some(SortKey::Number(self.price)),
            "stock" => Some(SortKey::Number(self.stock as f64)),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "updated_at" => Some(SortKey::Time(self.updated_at)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub slug: Option<String>,
    pub sku: String,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub featured: bool,
    pub category_id: Uuid,
    pub brand_id: Option<Uuid>,
    pub store_id: Uuid,
}

impl NewProduct {
    pub fn validate(&self) -> FeriaResult<()> {
        validate::required("name", &self.name)?;
        validate::string_length("name", &self.name, 2, 200)?;
        validate::required("sku", &self.sku)?;
        validate::non_negative("price", self.price)?;
        validate::non_negative("stock", self.stock as f64)?;
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
    pub category_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
}

impl ProductPatch {
    pub fn validate(&self) -> FeriaResult<()> {
        if let Some(name) = &self.name {
            validate::required("name", name)?;
            validate::string_length("name", name, 2, 200)?;
        }
        if let Some(sku) = &self.sku {
            validate::required("sku", sku)?;
        }
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        if let Some(price) = self.price {
            validate::non_negative("price", price)?;
        }
        if let Some(stock) = self.stock {
            validate::non_negative("stock", stock as f64)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub store_id: Option<Uuid>,
    pub brand_id: Option<Uuid>,
    pub status: Option<ProductStatus>,
    pub featured: Option<bool>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        self.category_id.is_none_or(|c| product.category_id == c)
            && self.store_id.is_none_or(|s| product.store_id == s)
            && self.brand_id.is_none_or(|b| product.brand_id == Some(b))
            && self.status.is_none_or(|s| product.status == s)
            && self.featured.is_none_or(|f| product.featured == f)
    }
}
