//! Lookup and write flows over any `InventoryStore`: existence checks, validation, re-fetch
//! with relations. Multi-step writes are not transactional; a row that disappears between
//! steps surfaces as NotFound.

use crate::error::{AppError, Entity};
use crate::model::{
    Category, CategoryInput, Product, ProductDetail, ProductInput, ProductSummary, Supplier,
    SupplierInput,
};
use crate::service::RequestValidator;
use crate::store::InventoryStore;
use uuid::Uuid;

pub struct InventoryService;

impl InventoryService {
    /// Parse an id taken from a resource path. A malformed id cannot name a row, so it is NotFound.
    pub fn path_id(entity: Entity, raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(entity))
    }

    pub async fn list_categories(store: &dyn InventoryStore) -> Result<Vec<Category>, AppError> {
        store.list_categories().await
    }

    pub async fn get_category(store: &dyn InventoryStore, id: &str) -> Result<Category, AppError> {
        let id = Self::path_id(Entity::Category, id)?;
        store
            .get_category(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Category))
    }

    pub async fn create_category(store: &dyn InventoryStore, input: CategoryInput) -> Result<Category, AppError> {
        let draft = RequestValidator::category(input)?;
        let category = store.insert_category(&draft).await?;
        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Replace an existing category. The caller has already confirmed it exists.
    pub async fn update_category(
        store: &dyn InventoryStore,
        current: &Category,
        input: CategoryInput,
    ) -> Result<Category, AppError> {
        let draft = RequestValidator::category(input)?;
        store
            .update_category(current.id, &draft)
            .await?
            .ok_or(AppError::NotFound(Entity::Category))
    }

    pub async fn delete_category(store: &dyn InventoryStore, id: &str) -> Result<(), AppError> {
        let id = Self::path_id(Entity::Category, id)?;
        if !store.delete_category(id).await? {
            return Err(AppError::NotFound(Entity::Category));
        }
        tracing::info!(%id, "category deleted");
        Ok(())
    }

    pub async fn list_suppliers(store: &dyn InventoryStore) -> Result<Vec<Supplier>, AppError> {
        store.list_suppliers().await
    }

    pub async fn get_supplier(store: &dyn InventoryStore, id: &str) -> Result<Supplier, AppError> {
        let id = Self::path_id(Entity::Supplier, id)?;
        store
            .get_supplier(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Supplier))
    }

    pub async fn create_supplier(store: &dyn InventoryStore, input: SupplierInput) -> Result<Supplier, AppError> {
        let draft = RequestValidator::supplier(input)?;
        let supplier = store.insert_supplier(&draft).await?;
        tracing::info!(id = %supplier.id, name = %supplier.name, "supplier created");
        Ok(supplier)
    }

    pub async fn update_supplier(
        store: &dyn InventoryStore,
        current: &Supplier,
        input: SupplierInput,
    ) -> Result<Supplier, AppError> {
        let draft = RequestValidator::supplier(input)?;
        store
            .update_supplier(current.id, &draft)
            .await?
            .ok_or(AppError::NotFound(Entity::Supplier))
    }

    pub async fn delete_supplier(store: &dyn InventoryStore, id: &str) -> Result<(), AppError> {
        let id = Self::path_id(Entity::Supplier, id)?;
        if !store.delete_supplier(id).await? {
            return Err(AppError::NotFound(Entity::Supplier));
        }
        tracing::info!(%id, "supplier deleted");
        Ok(())
    }

    pub async fn list_products(store: &dyn InventoryStore) -> Result<Vec<ProductDetail>, AppError> {
        store.list_products().await
    }

    pub async fn get_product(store: &dyn InventoryStore, id: &str) -> Result<ProductDetail, AppError> {
        let id = Self::path_id(Entity::Product, id)?;
        Self::product_detail(store, id).await
    }

    /// Stored row with raw foreign keys, used as the base of a partial update.
    pub async fn get_product_row(store: &dyn InventoryStore, id: &str) -> Result<Product, AppError> {
        let id = Self::path_id(Entity::Product, id)?;
        store
            .get_product(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Product))
    }

    pub async fn create_product(store: &dyn InventoryStore, input: ProductInput) -> Result<ProductDetail, AppError> {
        let draft = RequestValidator::new_product(input)?;
        let product = store.insert_product(&draft).await?;
        tracing::info!(id = %product.id, name = %product.name, "product created");
        Self::product_detail(store, product.id).await
    }

    pub async fn update_product(
        store: &dyn InventoryStore,
        current: &Product,
        input: ProductInput,
    ) -> Result<ProductDetail, AppError> {
        let draft = RequestValidator::merged_product(current, input)?;
        let product = store
            .update_product(current.id, &draft)
            .await?
            .ok_or(AppError::NotFound(Entity::Product))?;
        Self::product_detail(store, product.id).await
    }

    pub async fn delete_product(store: &dyn InventoryStore, id: &str) -> Result<(), AppError> {
        let id = Self::path_id(Entity::Product, id)?;
        if !store.delete_product(id).await? {
            return Err(AppError::NotFound(Entity::Product));
        }
        tracing::info!(%id, "product deleted");
        Ok(())
    }

    /// Products filed under a category. Unlike resource paths, a malformed id here is a validation error.
    pub async fn products_in_category(store: &dyn InventoryStore, id: &str) -> Result<Vec<ProductSummary>, AppError> {
        let id = RequestValidator::reference_id("category_id", Some(id))?;
        store.products_by_category(id).await
    }

    pub async fn products_from_supplier(store: &dyn InventoryStore, id: &str) -> Result<Vec<ProductSummary>, AppError> {
        let id = RequestValidator::reference_id("supplier_id", Some(id))?;
        store.products_by_supplier(id).await
    }

    async fn product_detail(store: &dyn InventoryStore, id: Uuid) -> Result<ProductDetail, AppError> {
        store
            .get_product_detail(id)
            .await?
            .ok_or(AppError::NotFound(Entity::Product))
    }
}
