//! Store records, status enum, and input payloads
//!
//! Stores carry the geolocation shown on the registration map and always
//! reference a category.

use crate::core::entity::{CatalogRecord, SortKey};
use crate::core::error::FeriaResult;
use crate::core::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Store lifecycle status; transitions are unconstrained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Active,
    #[default]
    Pending,
    Inactive,
    Suspended,
}

impl StoreStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreStatus::Active => "active",
            StoreStatus::Pending => "pending",
            StoreStatus::Inactive => "inactive",
            StoreStatus::Suspended => "suspended",
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub owner_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub status: StoreStatus,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CatalogRecord for Store {
    const UNIQUE_NAME: bool = false;

    fn resource_name() -> &'static str {
        "stores"
    }

    fn label() -> &'static str {
        "tienda"
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
        vec![
            self.name.as_str(),
            self.owner_name.as_str(),
            self.email.as_str(),
        ]
    }

    fn sort_value(&self, field: &str) -> Option<SortKey> {
        match field {
            "name" => Some(SortKey::Text(self.name.clone())),
            "owner_name" => Some(SortKey::Text(self.owner_name.clone())),
            "created_at" => Some(SortKey::Time(self.created_at)),
            "updated_at" => Some(SortKey::Time(self.updated_at)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStore {
    pub name: String,
    pub slug: Option<String>,
    pub owner_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub status: StoreStatus,
    pub category_id: Uuid,
}

impl NewStore {
    pub fn validate(&self) -> FeriaResult<()> {
        validate::required("name", &self.name)?;
        validate::string_length("name", &self.name, 2, 100)?;
        validate::required("owner_name", &self.owner_name)?;
        validate::required("email", &self.email)?;
        validate::latitude("latitude", self.latitude)?;
        validate::longitude("longitude", self.longitude)?;
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorePatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub owner_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub category_id: Option<Uuid>,
}

impl StorePatch {
    pub fn validate(&self) -> FeriaResult<()> {
        if let Some(name) = &self.name {
            validate::required("name", name)?;
            validate::string_length("name", name, 2, 100)?;
        }
        if let Some(owner) = &self.owner_name {
            validate::required("owner_name", owner)?;
        }
        if let Some(slug) = &self.slug {
            validate::slug_format("slug", slug)?;
        }
        if let Some(lat) = self.latitude {
            validate::latitude("latitude", lat)?;
        }
        if let Some(lng) = self.longitude {
            validate::longitude("longitude", lng)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreFilter {
    pub status: Option<StoreStatus>,
    pub category_id: Option<Uuid>,
}

impl StoreFilter {
    pub fn matches(&self, store: &Store) -> bool {
        self.status.is_none_or(|s| store.status == s)
            && self.category_id.is_none_or(|c| store.category_id == c)
    }
}
