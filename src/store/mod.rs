//! Repository layer: the `InventoryStore` seam and its PostgreSQL and in-process backends.
//!
//! Both backends enforce uniqueness and foreign keys atomically at write time and report
//! violations as `AppError::Conflict`. Lookups return `Option`; callers decide what a miss means.

mod memory;
mod postgres;
mod schema;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use schema::{ensure_database_exists, ensure_tables};

use crate::error::AppError;
use crate::model::{
    Category, CategoryDraft, Product, ProductDetail, ProductDraft, ProductSummary, Supplier,
    SupplierDraft,
};
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError>;
    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, AppError>;
    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, AppError>;
    /// `None` when no row has this id.
    async fn update_category(&self, id: Uuid, draft: &CategoryDraft) -> Result<Option<Category>, AppError>;
    /// `false` when no row was deleted.
    async fn delete_category(&self, id: Uuid) -> Result<bool, AppError>;

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError>;
    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, AppError>;
    async fn insert_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, AppError>;
    async fn update_supplier(&self, id: Uuid, draft: &SupplierDraft) -> Result<Option<Supplier>, AppError>;
    async fn delete_supplier(&self, id: Uuid) -> Result<bool, AppError>;

    /// All products with category and supplier resolved.
    async fn list_products(&self) -> Result<Vec<ProductDetail>, AppError>;
    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, AppError>;
    async fn get_product_detail(&self, id: Uuid) -> Result<Option<ProductDetail>, AppError>;
    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, AppError>;
    async fn update_product(&self, id: Uuid, draft: &ProductDraft) -> Result<Option<Product>, AppError>;
    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError>;
    async fn products_by_category(&self, category_id: Uuid) -> Result<Vec<ProductSummary>, AppError>;
    async fn products_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<ProductSummary>, AppError>;

    /// Cheap reachability check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
