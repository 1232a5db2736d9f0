//! # Feria
//!
//! Catalog and administration backend for the La Feria multi-vendor
//! marketplace: categories, brands, products, and stores, each served by a
//! query service (filter/sort/paginate) and a mutation service
//! (create/update/delete/toggle/status) over one injected catalog handle.
//!
//! ## Features
//!
//! - **Uniform envelopes**: every operation answers `{ok, data?, error?}`
//!   and every listing answers the same page envelope
//! - **Typed errors**: duplicate slug, invalid reference, dependent-count
//!   and the rest are enum variants, not strings to match on
//! - **AND filters + OR search**: optional per-field filters combined with
//!   case-insensitive free-text search across designated fields
//! - **Deletion guards**: entities with dependent children refuse deletion
//!   with the exact count in the error
//! - **Listing bus**: successful mutations broadcast the collection path so
//!   cached views can refetch
//! - **No ambient state**: services take the catalog and the bus at
//!   construction
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feria::prelude::*;
//!
//! let catalog = Catalog::new();
//! let bus = ListingBus::new(1024);
//! let state = AppState::new(catalog, bus);
//!
//! let router = build_router(state);
//! serve(&AppConfig::default(), router).await?;
//! ```

pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod services;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{CatalogRecord, SortKey},
        envelope::ActionResult,
        error::{FeriaError, FeriaResult},
        events::{ListingBus, ListingEvent},
        query::{ListParams, Page, SortOrder},
    };

    // === Domain ===
    pub use crate::domain::{
        Brand, BrandFilter, BrandPatch, Category, CategoryFilter, CategoryNode, CategoryPatch,
        NewBrand, NewCategory, NewProduct, NewStore, Product, ProductFilter, ProductPatch,
        ProductStatus, Store, StoreFilter, StorePatch, StoreStatus,
    };

    // === Services ===
    pub use crate::services::{
        BrandService, CategoryService, ProductService, QueryService, StoreService,
    };

    // === Storage ===
    pub use crate::storage::{Catalog, MemTable};

    // === Config & server ===
    pub use crate::config::AppConfig;
    pub use crate::server::{build_router, init_tracing, serve, AppState};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
