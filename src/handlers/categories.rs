//! Category handlers.

use crate::error::{AppError, Entity, ErrorBody};
use crate::handlers::{filter_id, resource_id};
use crate::model::{Category, CategoryInput, ProductSummary};
use crate::response;
use crate::service::InventoryService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = [Category]),
        (status = 204, description = "No categories yet"),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = InventoryService::list_categories(state.store()).await?;
    Ok(response::listing(rows))
}

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryInput,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid body or missing name", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let category = InventoryService::create_category(state.store(), input).await?;
    Ok(response::created(category))
}

/// GET /categories/:id
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "No such category", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = resource_id(path, Entity::Category)?;
    let category = InventoryService::get_category(state.store(), &id).await?;
    Ok(response::ok(category))
}

/// PUT /categories/:id: existence is checked before the body is looked at.
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    request_body = CategoryInput,
    responses(
        (status = 200, description = "Category replaced", body = Category),
        (status = 400, description = "Invalid body or missing name", body = ErrorBody),
        (status = 404, description = "No such category", body = ErrorBody),
        (status = 409, description = "Name already taken", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<CategoryInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = resource_id(path, Entity::Category)?;
    let current = InventoryService::get_category(state.store(), &id).await?;
    let Json(input) = payload?;
    let category = InventoryService::update_category(state.store(), &current, input).await?;
    Ok(response::ok(category))
}

/// DELETE /categories/:id
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "No such category", body = ErrorBody),
        (status = 409, description = "Category still has products", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = resource_id(path, Entity::Category)?;
    InventoryService::delete_category(state.store(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /categories/:id/products
#[utoipa::path(
    get,
    path = "/categories/{id}/products",
    params(("id" = String, Path, description = "Category id")),
    responses(
        (status = 200, description = "Products in the category", body = [ProductSummary]),
        (status = 204, description = "Category has no products"),
        (status = 400, description = "Malformed category id", body = ErrorBody)
    ),
    tag = "categories"
)]
pub async fn list_category_products(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let id = filter_id(path, "category_id")?;
    let rows = InventoryService::products_in_category(state.store(), &id).await?;
    tracing::debug!(category_id = %id, count = rows.len(), "fetched category products");
    Ok(response::listing(rows))
}
