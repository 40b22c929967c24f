//! Product handlers. Responses always carry the resolved category and supplier, never raw ids.

use crate::error::{AppError, Entity, ErrorBody};
use crate::handlers::resource_id;
use crate::model::{ProductDetail, ProductInput};
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

/// GET /products
#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All products with category and supplier", body = [ProductDetail]),
        (status = 204, description = "No products yet"),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = InventoryService::list_products(state.store()).await?;
    tracing::debug!(count = rows.len(), "fetched products");
    Ok(response::listing(rows))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = ProductDetail),
        (status = 400, description = "Invalid body, missing field or malformed id", body = ErrorBody),
        (status = 409, description = "Category or supplier does not exist", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let product = InventoryService::create_product(state.store(), input).await?;
    Ok(response::created(product))
}

/// GET /products/:id
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product", body = ProductDetail),
        (status = 404, description = "No such product", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = resource_id(path, Entity::Product)?;
    let product = InventoryService::get_product(state.store(), &id).await?;
    Ok(response::ok(product))
}

/// PUT /products/:id: partial update, omitted fields keep their stored values.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = ProductDetail),
        (status = 400, description = "Invalid body or field", body = ErrorBody),
        (status = 404, description = "No such product", body = ErrorBody),
        (status = 409, description = "Category or supplier does not exist", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = resource_id(path, Entity::Product)?;
    let current = InventoryService::get_product_row(state.store(), &id).await?;
    let Json(input) = payload?;
    let product = InventoryService::update_product(state.store(), &current, input).await?;
    Ok(response::ok(product))
}

/// DELETE /products/:id
#[utoipa::path(
    delete,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No such product", body = ErrorBody)
    ),
    tag = "products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = resource_id(path, Entity::Product)?;
    InventoryService::delete_product(state.store(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
