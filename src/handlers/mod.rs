//! HTTP handlers for category, supplier and product CRUD.

pub mod categories;
pub mod products;
pub mod suppliers;

use crate::error::{AppError, Entity};
use axum::extract::{rejection::PathRejection, Path};

/// Raw id of a resource path. A segment that does not decode cannot name a row.
pub(crate) fn resource_id(path: Result<Path<String>, PathRejection>, entity: Entity) -> Result<String, AppError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "undecodable resource id");
        AppError::NotFound(entity)
    })
}

/// Raw id that filters a product listing; an undecodable segment is a validation error on `field`.
pub(crate) fn filter_id(path: Result<Path<String>, PathRejection>, field: &'static str) -> Result<String, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::validation(field, format!("{} must be a valid UUID", field)))
}
