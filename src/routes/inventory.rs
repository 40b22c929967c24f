//! Inventory CRUD routes. Nested product listings share the `:id` segment name with the
//! resource routes, which the router requires for overlapping paths.

use crate::handlers::categories::{
    create_category, delete_category, get_category, list_categories, list_category_products,
    update_category,
};
use crate::handlers::products::{create_product, delete_product, get_product, list_products, update_product};
use crate::handlers::suppliers::{
    create_supplier, delete_supplier, get_supplier, list_supplier_products, list_suppliers,
    update_supplier,
};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn inventory_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/categories/:id/products", get(list_category_products))
        .route("/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/suppliers/:id",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
        .route("/suppliers/:id/products", get(list_supplier_products))
        .with_state(state)
}
