//! HTTP exposure of the catalog services
//!
//! Two surfaces share one router: the back-office CRUD routes under
//! `/admin`, which always answer with the `{ok, data?, error?, code?}`
//! envelope, and the public map listing at `GET /api/stores`, which returns
//! a bare JSON array (or `500 {error}` when the catalog is unreachable).

use crate::config::AppConfig;
use crate::core::envelope::ActionResult;
use crate::core::error::FeriaResult;
use crate::core::events::ListingBus;
use crate::core::query::ListParams;
use crate::domain::{
    BrandFilter, BrandPatch, CategoryFilter, CategoryPatch, NewBrand, NewCategory, NewProduct,
    NewStore, ProductFilter, ProductPatch, ProductStatus, StoreFilter, StorePatch, StoreStatus,
};
use crate::services::{
    BrandService, CategoryService, ProductService, QueryService, StoreService,
};
use crate::storage::Catalog;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// One service instance per entity, shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub brands: BrandService,
    pub products: ProductService,
    pub stores: StoreService,
    pub bus: ListingBus,
}

impl AppState {
    /// Wire all services over one catalog handle and one listing bus
    pub fn new(catalog: Catalog, bus: ListingBus) -> Self {
        Self {
            categories: CategoryService::new(catalog.clone(), bus.clone()),
            brands: BrandService::new(catalog.clone(), bus.clone()),
            products: ProductService::new(catalog.clone(), bus.clone()),
            stores: StoreService::new(catalog, bus.clone()),
            bus,
        }
    }
}

/// Initialize tracing from `RUST_LOG`; safe to call more than once
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Build the full router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stores", get(public_stores))
        .route("/admin/categories", get(list_categories).post(create_category))
        .route("/admin/categories/tree", get(category_tree))
        .route(
            "/admin/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/admin/categories/{id}/toggle", post(toggle_category))
        .route("/admin/brands", get(list_brands).post(create_brand))
        .route(
            "/admin/brands/{id}",
            get(get_brand).put(update_brand).delete(delete_brand),
        )
        .route("/admin/brands/{id}/toggle", post(toggle_brand))
        .route("/admin/products", get(list_products).post(create_product))
        .route(
            "/admin/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/admin/products/{id}/toggle", post(toggle_product))
        .route("/admin/products/{id}/status", put(product_status))
        .route("/admin/stores", get(list_stores).post(create_store))
        .route(
            "/admin/stores/{id}",
            get(get_store).put(update_store).delete(delete_store),
        )
        .route("/admin/stores/{id}/status", put(store_status))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and run the server
pub async fn serve(config: &AppConfig, router: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);
    axum::serve(listener, router).await?;
    Ok(())
}

/// Wrap a service result in the uniform envelope with the matching status
fn respond<T: Serialize>(result: FeriaResult<T>) -> Response {
    match result {
        Ok(data) => (StatusCode::OK, Json(ActionResult::success(data))).into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(ActionResult::<T>::failure(&err))).into_response()
        }
    }
}

fn respond_done(result: FeriaResult<()>) -> Response {
    match result {
        Ok(()) => (StatusCode::OK, Json(ActionResult::done())).into_response(),
        Err(err) => {
            let status = err.status_code();
            (status, Json(ActionResult::<()>::failure(&err))).into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "service": "feria"}))
}

/// Public map listing: bare array, camelCase fields, sorted by name
async fn public_stores(State(state): State<AppState>) -> Response {
    match state.stores.map_pins().await {
        Ok(pins) => (StatusCode::OK, Json(pins)).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": err.to_string()})),
        )
            .into_response(),
    }
}

#[derive(Deserialize)]
struct StatusBody<S> {
    status: S,
}

// --- categories ---

async fn list_categories(
    State(state): State<AppState>,
    Query(filter): Query<CategoryFilter>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(state.categories.list(&filter, &params).await)
}

async fn category_tree(State(state): State<AppState>) -> Response {
    respond(state.categories.tree().await)
}

async fn get_category(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.categories.get(id).await)
}

async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<NewCategory>,
) -> Response {
    respond(state.categories.create(input).await)
}

async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CategoryPatch>,
) -> Response {
    respond(state.categories.update(id, patch).await)
}

async fn delete_category(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond_done(state.categories.delete(id).await)
}

async fn toggle_category(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.categories.toggle_active(id).await)
}

// --- brands ---

async fn list_brands(
    State(state): State<AppState>,
    Query(filter): Query<BrandFilter>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(state.brands.list(&filter, &params).await)
}

async fn get_brand(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.brands.get(id).await)
}

async fn create_brand(State(state): State<AppState>, Json(input): Json<NewBrand>) -> Response {
    respond(state.brands.create(input).await)
}

async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<BrandPatch>,
) -> Response {
    respond(state.brands.update(id, patch).await)
}

async fn delete_brand(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond_done(state.brands.delete(id).await)
}

async fn toggle_brand(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.brands.toggle_active(id).await)
}

// --- products ---

async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(state.products.list(&filter, &params).await)
}

async fn get_product(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.products.get(id).await)
}

async fn create_product(State(state): State<AppState>, Json(input): Json<NewProduct>) -> Response {
    respond(state.products.create(input).await)
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProductPatch>,
) -> Response {
    respond(state.products.update(id, patch).await)
}

async fn delete_product(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond_done(state.products.delete(id).await)
}

async fn toggle_product(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.products.toggle_featured(id).await)
}

async fn product_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody<ProductStatus>>,
) -> Response {
    respond(state.products.update_status(id, body.status).await)
}

// --- stores ---

async fn list_stores(
    State(state): State<AppState>,
    Query(filter): Query<StoreFilter>,
    Query(params): Query<ListParams>,
) -> Response {
    respond(state.stores.list(&filter, &params).await)
}

async fn get_store(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond(state.stores.get(id).await)
}

async fn create_store(State(state): State<AppState>, Json(input): Json<NewStore>) -> Response {
    respond(state.stores.create(input).await)
}

async fn update_store(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<StorePatch>,
) -> Response {
    respond(state.stores.update(id, patch).await)
}

async fn delete_store(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    respond_done(state.stores.delete(id).await)
}

async fn store_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<StatusBody<StoreStatus>>,
) -> Response {
    respond(state.stores.update_status(id, body.status).await)
}
