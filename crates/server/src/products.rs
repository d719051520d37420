//! Product catalog routes.
//!
//! - `GET    /api/products`            — filtered, sorted, paginated listing
//! - `GET    /api/products/categories` — sorted distinct category names
//! - `GET    /api/products/{id}`       — fetch one active product
//! - `POST   /api/products`            — create (201 on success)
//! - `PUT    /api/products/{id}`       — partial update
//! - `DELETE /api/products/{id}`       — soft delete

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use tienda_core::config::PaginationConfig;
use tienda_core::domain::product::{Product, ProductDraft, ProductPatch};
use tienda_core::pagination::paginate;
use tienda_store::ProductRepository;

use crate::response::{ApiError, DataBody, MessageBody, PagedBody};
use crate::validation::{parse_list_params, parse_product_id, ListParams};

#[derive(Clone)]
pub struct CatalogState {
    pub repository: Arc<dyn ProductRepository>,
    pub pagination: PaginationConfig,
}

pub fn router(state: CatalogState) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/categories", get(list_categories))
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

pub async fn list_products(
    State(state): State<CatalogState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PagedBody<Product>>, ApiError> {
    let query = parse_list_params(params, &state.pagination)
        .map_err(|details| ApiError::InvalidInput { details })?;

    let results = state.repository.search(&query.filters).await?;
    let page = paginate(results, query.page, query.limit);

    Ok(Json(PagedBody::new(page.items, page.pagination)))
}

pub async fn get_product(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<DataBody<Product>>, ApiError> {
    let id = parse_product_id(&id).map_err(|details| ApiError::InvalidInput { details })?;

    match state.repository.get(id).await? {
        Some(product) => Ok(Json(DataBody::new(product))),
        None => Err(ApiError::not_found("product not found")),
    }
}

pub async fn create_product(
    State(state): State<CatalogState>,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<DataBody<Product>>), ApiError> {
    let product = state.repository.create(draft).await?;
    Ok((StatusCode::CREATED, Json(DataBody::new(product))))
}

pub async fn update_product(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<DataBody<Product>>, ApiError> {
    let id = parse_product_id(&id).map_err(|details| ApiError::InvalidInput { details })?;

    let product = state.repository.update(id, patch).await?;
    Ok(Json(DataBody::new(product)))
}

pub async fn delete_product(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> Result<Json<MessageBody>, ApiError> {
    let id = parse_product_id(&id).map_err(|details| ApiError::InvalidInput { details })?;

    state.repository.soft_delete(id).await?;
    Ok(Json(MessageBody::new("product deleted")))
}

pub async fn list_categories(
    State(state): State<CatalogState>,
) -> Result<Json<DataBody<Vec<String>>>, ApiError> {
    let categories = state.repository.categories().await?;
    Ok(Json(DataBody::new(categories)))
}
