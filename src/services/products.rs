//! Product query and mutation service
//!
//! Products are the leaf of the reference graph: they point at a category,
//! a store, and optionally a brand, and nothing points back at them, so
//! deletion is unconditional.

use crate::core::entity::CatalogRecord;
use crate::core::error::{FeriaError, FeriaResult};
use crate::core::events::ListingBus;
use crate::core::query::{ListParams, Page};
use crate::domain::{NewProduct, Product, ProductFilter, ProductPatch, ProductStatus};
use crate::services::engine;
use crate::services::QueryService;
use crate::storage::Catalog;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[derive(Clone)]
pub struct ProductService {
    catalog: Catalog,
    bus: ListingBus,
}

impl ProductService {
    pub fn new(catalog: Catalog, bus: ListingBus) -> Self {
        Self { catalog, bus }
    }

    fn ensure_sku_free(&self, sku: &str, exclude: Option<Uuid>) -> FeriaResult<()> {
        let taken = self
            .catalog
            .products
            .count_matching(|p| Some(p.id) != exclude && p.sku == sku)?;
        if taken > 0 {
            return Err(FeriaError::DuplicateField {
                entity: Product::label(),
                field: "SKU",
                value: sku.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_barcode_free(&self, barcode: &str, exclude: Option<Uuid>) -> FeriaResult<()> {
        let taken = self
            .catalog
            .products
            .count_matching(|p| Some(p.id) != exclude && p.barcode.as_deref() == Some(barcode))?;
        if taken > 0 {
            return Err(FeriaError::DuplicateField {
                entity: Product::label(),
                field: "código de barras",
                value: barcode.to_string(),
            });
        }
        Ok(())
    }

    pub async fn create(&self, input: NewProduct) -> FeriaResult<Product> {
        input.validate()?;
        let slug = engine::resolve_slug(input.slug.clone(), &input.name);

        engine::ensure_slug_free(&self.catalog.products, &slug, None)?;
        self.ensure_sku_free(&input.sku, None)?;
        if let Some(barcode) = &input.barcode {
            self.ensure_barcode_free(barcode, None)?;
        }
        engine::ensure_ref(&self.catalog.categories, input.category_id)?;
        engine::ensure_ref(&self.catalog.stores, input.store_id)?;
        if let Some(brand_id) = input.brand_id {
            engine::ensure_ref(&self.catalog.brands, brand_id)?;
        }

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            slug,
            sku: input.sku,
            barcode: input.barcode,
            description: input.description,
            price: input.price,
            stock: input.stock,
            status: input.status,
            featured: input.featured,
            category_id: input.category_id,
            brand_id: input.brand_id,
            store_id: input.store_id,
            created_at: now,
            updated_at: now,
        };
        let created = self.catalog.products.insert(product)?;
        self.bus.revalidate(&Product::collection_path());
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> FeriaResult<Product> {
        patch.validate()?;
        let mut current = engine::fetch(&self.catalog.products, id)?;

        if let Some(slug) = &patch.slug {
            if slug != &current.slug {
                engine::ensure_slug_free(&self.catalog.products, slug, Some(id))?;
            }
        }
        if let Some(sku) = &patch.sku {
            if sku != &current.sku {
                self.ensure_sku_free(sku, Some(id))?;
            }
        }
        if let Some(barcode) = &patch.barcode {
            if current.barcode.as_deref() != Some(barcode) {
                self.ensure_barcode_free(barcode, Some(id))?;
            }
        }
        if let Some(category_id) = patch.category_id {
            if category_id != current.category_id {
                engine::ensure_ref(&self.catalog.categories, category_id)?;
            }
        }
        if let Some(store_id) = patch.store_id {
            if store_id != current.store_id {
                engine::ensure_ref(&self.catalog.stores, store_id)?;
            }
        }
        if let Some(brand_id) = patch.brand_id {
            if current.brand_id != Some(brand_id) {
                engine::ensure_ref(&self.catalog.brands, brand_id)?;
            }
        }

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(slug) = patch.slug {
            current.slug = slug;
        }
        if let Some(sku) = patch.sku {
            current.sku = sku;
        }
        if let Some(barcode) = patch.barcode {
            current.barcode = Some(barcode);
        }
        if let Some(description) = patch.description {
            current.description = Some(description);
        }
        if let Some(price) = patch.price {
            current.price = price;
        }
        if let Some(stock) = patch.stock {
            current.stock = stock;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        if let Some(featured) = patch.featured {
            current.featured = featured;
        }
        if let Some(category_id) = patch.category_id {
            current.category_id = category_id;
        }
        if let Some(store_id) = patch.store_id {
            current.store_id = store_id;
        }
        if let Some(brand_id) = patch.brand_id {
            current.brand_id = Some(brand_id);
        }
        current.updated_at = Utc::now();

        let updated = self.catalog.products.replace(current)?;
        self.bus.revalidate(&Product::collection_path());
        Ok(updated)
    }

    /// Products have no dependents; deletion always succeeds when the id
    /// exists
    pub async fn delete(&self, id: Uuid) -> FeriaResult<()> {
        self.catalog.products.remove(id)?;
        self.bus.revalidate(&Product::collection_path());
        Ok(())
    }

    pub async fn toggle_featured(&self, id: Uuid) -> FeriaResult<Product> {
        let mut current = engine::fetch(&self.catalog.products, id)?;
        current.featured = !current.featured;
        current.updated_at = Utc::now();
        let updated = self.catalog.products.replace(current)?;
        self.bus.revalidate(&Product::collection_path());
        Ok(updated)
    }

    /// Unconditional status transition; any status may move to any other
    pub async fn update_status(&self, id: Uuid, status: ProductStatus) -> FeriaResult<Product> {
        let mut current = engine::fetch(&self.catalog.products, id)?;
        current.status = status;
        current.updated_at = Utc::now();
        let updated = self.catalog.products.replace(current)?;
        self.bus.revalidate(&Product::collection_path());
        Ok(updated)
    }
}

#[async_trait]
impl QueryService for ProductService {
    type Record = Product;
    type Filter = ProductFilter;

    async fn list(
        &self,
        filter: &ProductFilter,
        params: &ListParams,
    ) -> FeriaResult<Page<Product>> {
        engine::list_page(&self.catalog.products, params, |p| filter.matches(p), None)
    }

    async fn get(&self, id: Uuid) -> FeriaResult<Product> {
        engine::fetch(&self.catalog.products, id)
    }
}
