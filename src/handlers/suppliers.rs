//! Supplier handlers. PUT replaces the whole record, so omitted email or phone are cleared.

use crate::error::{AppError, Entity, ErrorBody};
use crate::handlers::{filter_id, resource_id};
use crate::model::{ProductSummary, Supplier, SupplierInput};
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

/// GET /suppliers
#[utoipa::path(
    get,
    path = "/suppliers",
    responses(
        (status = 200, description = "All suppliers", body = [Supplier]),
        (status = 204, description = "No suppliers yet"),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "suppliers"
)]
pub async fn list_suppliers(State(state): State<AppState>) -> Result<Response, AppError> {
    let rows = InventoryService::list_suppliers(state.store()).await?;
    Ok(response::listing(rows))
}

/// POST /suppliers
#[utoipa::path(
    post,
    path = "/suppliers",
    request_body = SupplierInput,
    responses(
        (status = 201, description = "Supplier created", body = Supplier),
        (status = 400, description = "Invalid body, missing name or malformed email", body = ErrorBody),
        (status = 409, description = "Name or email already taken", body = ErrorBody),
        (status = 500, description = "Store failure", body = ErrorBody)
    ),
    tag = "suppliers"
)]
pub async fn create_supplier(
    State(state): State<AppState>,
    payload: Result<Json<SupplierInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(input) = payload?;
    let supplier = InventoryService::create_supplier(state.store(), input).await?;
    Ok(response::created(supplier))
}

/// GET /suppliers/:id
#[utoipa::path(
    get,
    path = "/suppliers/{id}",
    params(("id" = String, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Supplier", body = Supplier),
        (status = 404, description = "No such supplier", body = ErrorBody)
    ),
    tag = "suppliers"
)]
pub async fn get_supplier(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = resource_id(path, Entity::Supplier)?;
    let supplier = InventoryService::get_supplier(state.store(), &id).await?;
    Ok(response::ok(supplier))
}

/// PUT /suppliers/:id
#[utoipa::path(
    put,
    path = "/suppliers/{id}",
    params(("id" = String, Path, description = "Supplier id")),
    request_body = SupplierInput,
    responses(
        (status = 200, description = "Supplier replaced", body = Supplier),
        (status = 400, description = "Invalid body, missing name or malformed email", body = ErrorBody),
        (status = 404, description = "No such supplier", body = ErrorBody),
        (status = 409, description = "Name or email already taken", body = ErrorBody)
    ),
    tag = "suppliers"
)]
pub async fn update_supplier(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SupplierInput>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = resource_id(path, Entity::Supplier)?;
    let current = InventoryService::get_supplier(state.store(), &id).await?;
    let Json(input) = payload?;
    let supplier = InventoryService::update_supplier(state.store(), &current, input).await?;
    Ok(response::ok(supplier))
}

/// DELETE /suppliers/:id
#[utoipa::path(
    delete,
    path = "/suppliers/{id}",
    params(("id" = String, Path, description = "Supplier id")),
    responses(
        (status = 204, description = "Supplier deleted"),
        (status = 404, description = "No such supplier", body = ErrorBody),
        (status = 409, description = "Supplier still has products", body = ErrorBody)
    ),
    tag = "suppliers"
)]
pub async fn delete_supplier(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = resource_id(path, Entity::Supplier)?;
    InventoryService::delete_supplier(state.store(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /suppliers/:id/products: id and name of each product the supplier provides.
#[utoipa::path(
    get,
    path = "/suppliers/{id}/products",
    params(("id" = String, Path, description = "Supplier id")),
    responses(
        (status = 200, description = "Products from the supplier", body = [ProductSummary]),
        (status = 204, description = "Supplier has no products yet"),
        (status = 400, description = "Malformed supplier id", body = ErrorBody)
    ),
    tag = "suppliers"
)]
pub async fn list_supplier_products(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let id = filter_id(path, "supplier_id")?;
    let rows = InventoryService::products_from_supplier(state.store(), &id).await?;
    tracing::debug!(supplier_id = %id, count = rows.len(), "fetched supplier products");
    Ok(response::listing(rows))
}
