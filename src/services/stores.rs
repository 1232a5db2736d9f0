//! Store query and mutation service, plus the public map listing

use crate::core::entity::CatalogRecord;
use crate::core::error::{FeriaError, FeriaResult};
use crate::core::events::ListingBus;
use crate::core::query::{ListParams, Page};
use crate::domain::{NewStore, Store, StoreFilter, StorePatch, StoreStatus};
use crate::services::engine;
use crate::services::QueryService;
use crate::storage::Catalog;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// One entry of the public `GET /api/stores` map listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePin {
    pub id: Uuid,
    pub name: String,
    pub owner_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub status: StoreStatus,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub category: Option<PinCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PinCategory {
    pub name: String,
}

#[derive(Clone)]
pub struct StoreService {
    catalog: Catalog,
    bus: ListingBus,
}

impl StoreService {
    pub fn new(catalog: Catalog, bus: ListingBus) -> Self {
        Self { catalog, bus }
    }

    pub async fn create(&self, input: NewStore) -> FeriaResult<Store> {
        input.validate()?;
        let slug = engine::resolve_slug(input.slug.clone(), &input.name);

        engine::ensure_slug_free(&self.catalog.stores, &slug, None)?;
        engine::ensure_ref(&self.catalog.categories, input.category_id)?;

        let now = Utc::now();
        let store = Store {
            id: Uuid::new_v4(),
            name: input.name,
            slug,
            owner_name: input.owner_name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            latitude: input.latitude,
            longitude: input.longitude,
            status: input.status,
            category_id: input.category_id,
            created_at: now,
            updated_at: now,
        };
        let created = self.catalog.stores.insert(store)?;
        self.bus.revalidate(&Store::collection_path());
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: StorePatch) -> FeriaResult<Store> {
        patch.validate()?;
        let mut current = engine::fetch(&self.catalog.stores, id)?;

        if let Some(slug) = &patch.slug {
            if slug != &current.slug {
                engine::ensure_slug_free(&self.catalog.stores, slug, Some(id))?;
            }
        }
        if let Some(category_id) = patch.category_id {
            if category_id != current.category_id {
                engine::ensure_ref(&self.catalog.categories, category_id)?;
            }
        }

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(slug) = patch.slug {
            current.slug = slug;
        }
        if let Some(owner_name) = patch.owner_name {
            current.owner_name = owner_name;
        }
        if let Some(email) = patch.email {
            current.email = email;
        }
        if let Some(phone) = patch.phone {
            current.phone = Some(phone);
        }
        if let Some(address) = patch.address {
            current.address = Some(address);
        }
        if let Some(latitude) = patch.latitude {
            current.latitude = latitude;
        }
        if let Some(longitude) = patch.longitude {
            current.longitude = longitude;
        }
        if let Some(category_id) = patch.category_id {
            current.category_id = category_id;
        }
        current.updated_at = Utc::now();

        let updated = self.catalog.stores.replace(current)?;
        self.bus.revalidate(&Store::collection_path());
        Ok(updated)
    }

    /// Delete a store; blocked while products still reference it
    pub async fn delete(&self, id: Uuid) -> FeriaResult<()> {
        engine::fetch(&self.catalog.stores, id)?;

        let products = self
            .catalog
            .products
            .count_matching(|p| p.store_id == id)?;
        if products > 0 {
            return Err(FeriaError::HasDependents {
                entity: Store::label(),
                dependents: "productos",
                count: products,
            });
        }

        self.catalog.stores.remove(id)?;
        self.bus.revalidate(&Store::collection_path());
        Ok(())
    }

    /// Unconditional status transition; any status may move to any other
    pub async fn update_status(&self, id: Uuid, status: StoreStatus) -> FeriaResult<Store> {
        let mut current = engine::fetch(&self.catalog.stores, id)?;
        current.status = status;
        current.updated_at = Utc::now();
        let updated = self.catalog.stores.replace(current)?;
        self.bus.revalidate(&Store::collection_path());
        Ok(updated)
    }

    /// All stores as map pins with their category name resolved, sorted by
    /// store name
    pub async fn map_pins(&self) -> FeriaResult<Vec<StorePin>> {
        let mut stores = self.catalog.stores.all()?;
        stores.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

        let mut pins = Vec::with_capacity(stores.len());
        for store in stores {
            let category = self
                .catalog
                .categories
                .get(store.category_id)?
                .map(|c| PinCategory { name: c.name });
            pins.push(StorePin {
                id: store.id,
                name: store.name,
                owner_name: store.owner_name,
                latitude: store.latitude,
                longitude: store.longitude,
                status: store.status,
                address: store.address,
                phone: store.phone,
                email: store.email,
                category,
            });
        }
        Ok(pins)
    }
}

#[async_trait]
impl QueryService for StoreService {
    type Record = Store;
    type Filter = StoreFilter;

    async fn list(&self, filter: &StoreFilter, params: &ListParams) -> FeriaResult<Page<Store>> {
        engine::list_page(&self.catalog.stores, params, |s| filter.matches(s), None)
    }

    async fn get(&self, id: Uuid) -> FeriaResult<Store> {
        engine::fetch(&self.catalog.stores, id)
    }
}
