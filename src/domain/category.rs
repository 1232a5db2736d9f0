//! Category records and input payloads
//!
//! Categories are hierarchical: `parent_id` points at another category, and
//! the tree endpoint groups them recursively. A category can never be its
//! own parent; that is rejected at write time.

use crate::core::entity::{CatalogRecord, SortKey};
use crate::core::error::FeriaResult;
use crate::core::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord for Category {
    const UNIQUE_NAME: bool = true;

    fn resource_name() -> &'static str {
        "categories"
    }

    fn label() -> &'static str {
        "categoría"
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
        let mut terms = vec![self.name.as_str(), self.slug.as_str()];
        if let Some(desc) = &self.description {
            terms.push(desc.as_str());
        }
        terms
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

/// Payload for creating a category; slug is derived from the name when
/// omitted
#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewCategory {
    pub fn validate(&self) -> FeriaResult<()> {
        validate::required("name", &self.name)?;
        validate::string_length("name", &self.name, 2, 100)?;
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        Ok(())
    }
}

/// Partial update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub active: Option<bool>,
}

impl CategoryPatch {
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

/// Optional listing filters, AND'ed together
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryFilter {
    pub active: Option<bool>,
    pub parent_id: Option<Uuid>,
}

impl CategoryFilter {
    pub fn matches(&self, category: &Category) -> bool {
        self.active.is_none_or(|a| category.active == a)
            && self.parent_id.is_none_or(|p| category.parent_id == Some(p))
    }
}

/// A category with its nested children, produced by the tree endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryNode>,
}
