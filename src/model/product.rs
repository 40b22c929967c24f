use crate::model::{Category, Supplier};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A products row as stored, foreign keys unresolved. Never sent to clients.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
    pub supplier_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub image_url: Option<String>,
}

/// Product as returned by the API: category and supplier resolved inline, raw ids omitted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: Category,
    pub supplier: Supplier,
}

impl ProductDetail {
    pub fn new(product: Product, category: Category, supplier: Supplier) -> Self {
        ProductDetail {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            image_url: product.image_url,
            category,
            supplier,
        }
    }
}

/// Row of GET /categories/:id/products and GET /suppliers/:id/products.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
}

/// Body of POST/PUT /products. On PUT, absent fields keep their stored value.
/// Ids arrive as strings so a malformed one is a validation error, not a parse error.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ProductInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub category_id: Uuid,
    pub supplier_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub image_url: Option<String>,
}
