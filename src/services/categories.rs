//! Category query and mutation service

use crate::core::entity::CatalogRecord;
use crate::core::error::{FeriaError, FeriaResult};
use crate::core::events::ListingBus;
use crate::core::query::{ListParams, Page};
use crate::domain::{Category, CategoryFilter, CategoryNode, CategoryPatch, NewCategory};
use crate::services::engine;
use crate::services::QueryService;
use crate::storage::Catalog;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// Recursion bound for the tree builder. Parent links form a DAG by
/// construction (self-parenting is rejected at write time), but the read
/// path does not trust that invariant.
pub const MAX_TREE_DEPTH: usize = 32;

#[derive(Clone)]
pub struct CategoryService {
    catalog: Catalog,
    bus: ListingBus,
}

impl CategoryService {
    pub fn new(catalog: Catalog, bus: ListingBus) -> Self {
        Self { catalog, bus }
    }

    /// Nested tree of active categories, grouped in memory by parent id
    pub async fn tree(&self) -> FeriaResult<Vec<CategoryNode>> {
        let mut records: Vec<Category> = self
            .catalog
            .categories
            .all()?
            .into_iter()
            .filter(|c| c.active)
            .collect();
        records.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(build_tree(&records, None, 0))
    }

    pub async fn create(&self, input: NewCategory) -> FeriaResult<Category> {
        input.validate()?;
        let slug = engine::resolve_slug(input.slug.clone(), &input.name);

        engine::ensure_slug_free(&self.catalog.categories, &slug, None)?;
        engine::ensure_name_free(&self.catalog.categories, &input.name, None)?;
        if let Some(parent_id) = input.parent_id {
            engine::ensure_ref(&self.catalog.categories, parent_id)?;
        }

        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name,
            slug,
            description: input.description,
            parent_id: input.parent_id,
            active: input.active,
            created_at: now,
            updated_at: now,
        };
        let created = self.catalog.categories.insert(category)?;
        self.bus.revalidate(&Category::collection_path());
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, patch: CategoryPatch) -> FeriaResult<Category> {
        patch.validate()?;
        let mut current = engine::fetch(&self.catalog.categories, id)?;

        if let Some(slug) = &patch.slug {
            if slug != &current.slug {
                engine::ensure_slug_free(&self.catalog.categories, slug, Some(id))?;
            }
        }
        if let Some(name) = &patch.name {
            if name != &current.name {
                engine::ensure_name_free(&self.catalog.categories, name, Some(id))?;
            }
        }
        if let Some(parent_id) = patch.parent_id {
            if parent_id == id {
                return Err(FeriaError::SelfReference);
            }
            engine::ensure_ref(&self.catalog.categories, parent_id)?;
        }

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(slug) = patch.slug {
            current.slug = slug;
        }
        if let Some(description) = patch.description {
            current.description = Some(description);
        }
        if let Some(parent_id) = patch.parent_id {
            current.parent_id = Some(parent_id);
        }
        if let Some(active) = patch.active {
            current.active = active;
        }
        current.updated_at = Utc::now();

        let updated = self.catalog.categories.replace(current)?;
        self.bus.revalidate(&Category::collection_path());
        Ok(updated)
    }

    /// Delete a category; blocked while products or subcategories still
    /// reference it
    pub async fn delete(&self, id: Uuid) -> FeriaResult<()> {
        engine::fetch(&self.catalog.categories, id)?;

        let products = self
            .catalog
            .products
            .count_matching(|p| p.category_id == id)?;
        if products > 0 {
            return Err(FeriaError::HasDependents {
                entity: Category::label(),
                dependents: "productos",
                count: products,
            });
        }

        let children = self
            .catalog
            .categories
            .count_matching(|c| c.parent_id == Some(id))?;
        if children > 0 {
            return Err(FeriaError::HasDependents {
                entity: Category::label(),
                dependents: "subcategorías",
                count: children,
            });
        }

        self.catalog.categories.remove(id)?;
        self.bus.revalidate(&Category::collection_path());
        Ok(())
    }

    /// Flip the active flag; applying twice restores the original value
    pub async fn toggle_active(&self, id: Uuid) -> FeriaResult<Category> {
        let mut current = engine::fetch(&self.catalog.categories, id)?;
        current.active = !current.active;
        current.updated_at = Utc::now();
        let updated = self.catalog.categories.replace(current)?;
        self.bus.revalidate(&Category::collection_path());
        Ok(updated)
    }
}

#[async_trait]
impl QueryService for CategoryService {
    type Record = Category;
    type Filter = CategoryFilter;

    async fn list(
        &self,
        filter: &CategoryFilter,
        params: &ListParams,
    ) -> FeriaResult<Page<Category>> {
        engine::list_page(&self.catalog.categories, params, |c| filter.matches(c), None)
    }

    async fn get(&self, id: Uuid) -> FeriaResult<Category> {
        engine::fetch(&self.catalog.categories, id)
    }
}

/// Group a flat category list into a nested tree under `parent`
///
/// Pure function; `depth` bounds the recursion regardless of what the data
/// looks like.
pub fn build_tree(records: &[Category], parent: Option<Uuid>, depth: usize) -> Vec<CategoryNode> {
    if depth >= MAX_TREE_DEPTH {
        return Vec::new();
    }
    records
        .iter()
        .filter(|c| c.parent_id == parent)
        .map(|c| CategoryNode {
            category: c.clone(),
            children: build_tree(records, Some(c.id), depth + 1),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> CategoryService {
        CategoryService::new(Catalog::new(), ListingBus::new(16))
    }

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: None,
            description: None,
            parent_id: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_create_derives_slug() {
        let service = service();
        let created = service.create(new_category("Frutas Secas")).await.unwrap();
        assert_eq!(created.slug, "frutas-secas");
    }

    #[tokio::test]
    async fn test_create_duplicate_name_rejected() {
        let service = service();
        service.create(new_category("Frutas")).await.unwrap();
        let err = service
            .create(NewCategory {
                slug: Some("otra-cosa".to_string()),
                ..new_category("frutas")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, FeriaError::DuplicateName { .. }));
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let service = service();
        let created = service.create(new_category("Frutas")).await.unwrap();
        let err = service
            .update(
                created.id,
                CategoryPatch {
                    parent_id: Some(created.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, FeriaError::SelfReference);
    }

    #[tokio::test]
    async fn test_update_missing_parent_is_invalid_reference() {
        let service = service();
        let created = service.create(new_category("Frutas")).await.unwrap();
        let err = service
            .update(
                created.id,
                CategoryPatch {
                    parent_id: Some(Uuid::new_v4()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FeriaError::InvalidReference { .. }));
    }

    #[tokio::test]
    async fn test_delete_blocked_by_subcategories() {
        let service = service();
        let parent = service.create(new_category("Frutas")).await.unwrap();
        service
            .create(NewCategory {
                parent_id: Some(parent.id),
                ..new_category("Cítricos")
            })
            .await
            .unwrap();

        let err = service.delete(parent.id).await.unwrap_err();
        assert!(matches!(
            err,
            FeriaError::HasDependents {
                dependents: "subcategorías",
                count: 1,
                ..
            }
        ));
        // The category is still there
        assert!(service.get(parent.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_toggle_round_trip() {
        let service = service();
        let created = service.create(new_category("Frutas")).await.unwrap();
        assert!(created.active);
        let once = service.toggle_active(created.id).await.unwrap();
        assert!(!once.active);
        let twice = service.toggle_active(created.id).await.unwrap();
        assert!(twice.active);
    }

    #[tokio::test]
    async fn test_tree_nests_children() {
        let service = service();
        let parent = service.create(new_category("Frutas")).await.unwrap();
        service
            .create(NewCategory {
                parent_id: Some(parent.id),
                ..new_category("Cítricos")
            })
            .await
            .unwrap();
        // Inactive categories stay out of the tree
        let hidden = service.create(new_category("Oculta")).await.unwrap();
        service.toggle_active(hidden.id).await.unwrap();

        let tree = service.tree().await.unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].category.name, "Frutas");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].category.name, "Cítricos");
    }

    #[test]
    fn test_build_tree_depth_bound() {
        // Fabricate a parent cycle that write-time checks would never allow
        let now = Utc::now();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let make = |id: Uuid, parent: Uuid, name: &str| Category {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: None,
            parent_id: Some(parent),
            active: true,
            created_at: now,
            updated_at: now,
        };
        let records = vec![make(a, b, "A"), make(b, a, "B")];
        // Must terminate; the bound cuts the cycle
        let tree = build_tree(&records, Some(a), 0);
        assert_eq!(tree.len(), 1);
    }

    #[tokio::test]
    async fn test_mutations_publish_listing_events() {
        let catalog = Catalog::new();
        let bus = ListingBus::new(16);
        let mut rx = bus.subscribe();
        let service = CategoryService::new(catalog, bus);

        service.create(new_category("Frutas")).await.unwrap();
        assert_eq!(rx.recv().await.unwrap().path, "/categories");
    }
}
