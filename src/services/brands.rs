//! Brand query and mutation service

use crate::core::entity::{CatalogRecord, SortKey};
use crate::core::error::{FeriaError, FeriaResult};
use crate::core::events::ListingBus;
use crate::core::query::{ListParams, Page};
use crate::domain::{Brand, BrandFilter, BrandPatch, NewBrand};
use crate::services::engine;
use crate::services::QueryService;
use crate::storage::Catalog;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Clone)]
pub struct BrandService {
    catalog: Catalog,
    bus: ListingBus,
}

impl BrandService {
    pub fn new(catalog: Catalog, bus: ListingBus) -> Self {
        Self { catalog, bus }
    }

    pub async fn create(&self, input: NewBrand) -> FeriaResult<Brand> {
        input.validate()?;
        let slug = engine::resolve_slug(input.slug.clone(), &input.name);

        engine::ensure_slug_free(&self.catalog.brands, &slug, None)?;
        engine::ensure_name_free(&self.catalog.brands, &input.name, None)?;

        let now = Utc::now();
        let brand = Brand {
            id: Uuid::new_v4(),
            name: input.name,
            slug,
            logo_url: input.logo_url,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        let created = self.catalog.brands.insert(brand)?;
        self.bus.revalidate(&Brand::collection_path());
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: BrandPatch) -> FeriaResult<Brand> {
        patch.validate()?;
        let mut current = engine::fetch(&self.catalog.brands, id)?;

        if let Some(slug) = &patch.slug {
            if slug != &current.slug {
                engine::ensure_slug_free(&self.catalog.brands, slug, Some(id))?;
            }
        }
        if let Some(name) = &patch.name {
            if name != &current.name {
                engine::ensure_name_free(&self.catalog.brands, name, Some(id))?;
            }
        }

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(slug) = patch.slug {
            current.slug = slug;
        }
        if let Some(logo_url) = patch.logo_url {
            current.logo_url = Some(logo_url);
        }
        if let Some(active) = patch.active {
            current.active = active;
        }
        current.updated_at = Utc::now();

        let updated = self.catalog.brands.replace(current)?;
        self.bus.revalidate(&Brand::collection_path());
        Ok(updated)
    }

    /// Delete a brand; blocked while products still reference it
    pub async fn delete(&self, id: Uuid) -> FeriaResult<()> {
        engine::fetch(&self.catalog.brands, id)?;

        let products = self
            .catalog
            .products
            .count_matching(|p| p.brand_id == Some(id))?;
        if products > 0 {
            return Err(FeriaError::HasDependents {
                entity: Brand::label(),
                dependents: "productos",
                count: products,
            });
        }

        self.catalog.brands.remove(id)?;
        self.bus.revalidate(&Brand::collection_path());
        Ok(())
    }

    pub async fn toggle_active(&self, id: Uuid) -> FeriaResult<Brand> {
        let mut current = engine::fetch(&self.catalog.brands, id)?;
        current.active = !current.active;
        current.updated_at = Utc::now();
        let updated = self.catalog.brands.replace(current)?;
        self.bus.revalidate(&Brand::collection_path());
        Ok(updated)
    }
}

#[async_trait]
impl QueryService for BrandService {
    type Record = Brand;
    type Filter = BrandFilter;

    /// `sort_by=products` orders brands by their associated-product count
    /// instead of a scalar field
    async fn list(&self, filter: &BrandFilter, params: &ListParams) -> FeriaResult<Page<Brand>> {
        let mut counts: HashMap<Uuid, usize> = HashMap::new();
        if params.sort_by.as_deref() == Some("products") {
            for product in self.catalog.products.all()? {
                if let Some(brand_id) = product.brand_id {
                    *counts.entry(brand_id).or_insert(0) += 1;
                }
            }
        }
        let by_products = |b: &Brand| SortKey::Count(counts.get(&b.id).copied().unwrap_or(0));

        engine::list_page(
            &self.catalog.brands,
            params,
            |b| filter.matches(b),
            Some(("products", &by_products)),
        )
    }

    async fn get(&self, id: Uuid) -> FeriaResult<Brand> {
        engine::fetch(&self.catalog.brands, id)
    }
}
