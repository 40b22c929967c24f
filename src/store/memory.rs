//! In-process `InventoryStore`. Applies the same unique and foreign-key rules as the
//! PostgreSQL schema, checking and writing under one lock so the checks are atomic.

use super::InventoryStore;
use crate::config::NameCase;
use crate::error::{AppError, ConflictKind};
use crate::model::{
    Category, CategoryDraft, Product, ProductDetail, ProductDraft, ProductSummary, Supplier,
    SupplierDraft,
};
use async_trait::async_trait;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    suppliers: Vec<Supplier>,
    products: Vec<Product>,
}

impl Tables {
    fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    fn supplier(&self, id: Uuid) -> Option<&Supplier> {
        self.suppliers.iter().find(|s| s.id == id)
    }

    fn detail(&self, product: &Product) -> Option<ProductDetail> {
        let category = self.category(product.category_id)?.clone();
        let supplier = self.supplier(product.supplier_id)?.clone();
        Some(ProductDetail::new(product.clone(), category, supplier))
    }

    fn check_references(&self, draft: &ProductDraft) -> Result<(), AppError> {
        if self.category(draft.category_id).is_none() {
            return Err(AppError::conflict(ConflictKind::UnknownReference, Some("category_id")));
        }
        if self.supplier(draft.supplier_id).is_none() {
            return Err(AppError::conflict(ConflictKind::UnknownReference, Some("supplier_id")));
        }
        Ok(())
    }

    fn summaries<F>(&self, pred: F) -> Vec<ProductSummary>
    where
        F: Fn(&Product) -> bool,
    {
        self.products
            .iter()
            .filter(|p| pred(p))
            .map(|p| ProductSummary {
                id: p.id,
                name: p.name.clone(),
            })
            .collect()
    }
}

pub struct MemoryStore {
    name_case: NameCase,
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new(name_case: NameCase) -> Self {
        MemoryStore {
            name_case,
            tables: RwLock::new(Tables::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
        self.tables
            .read()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
        self.tables
            .write()
            .map_err(|_| AppError::Internal("memory store lock poisoned".into()))
    }

    fn check_category_name(&self, tables: &Tables, name: &str, except: Option<Uuid>) -> Result<(), AppError> {
        let taken = tables
            .categories
            .iter()
            .any(|c| Some(c.id) != except && self.name_case.same(&c.name, name));
        if taken {
            return Err(AppError::conflict(ConflictKind::Duplicate, Some("name")));
        }
        Ok(())
    }

    fn check_supplier_unique(&self, tables: &Tables, draft: &SupplierDraft, except: Option<Uuid>) -> Result<(), AppError> {
        let others = || tables.suppliers.iter().filter(|s| Some(s.id) != except);
        if others().any(|s| self.name_case.same(&s.name, &draft.name)) {
            return Err(AppError::conflict(ConflictKind::Duplicate, Some("name")));
        }
        if let Some(email) = &draft.email {
            if others().any(|s| s.email.as_ref() == Some(email)) {
                return Err(AppError::conflict(ConflictKind::Duplicate, Some("email")));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        Ok(self.read()?.categories.clone())
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        Ok(self.read()?.category(id).cloned())
    }

    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, AppError> {
        let mut tables = self.write()?;
        self.check_category_name(&tables, &draft.name, None)?;
        let category = Category {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: Uuid, draft: &CategoryDraft) -> Result<Option<Category>, AppError> {
        let mut tables = self.write()?;
        self.check_category_name(&tables, &draft.name, Some(id))?;
        let Some(category) = tables.categories.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        category.name = draft.name.clone();
        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.category(id).is_none() {
            return Ok(false);
        }
        if tables.products.iter().any(|p| p.category_id == id) {
            return Err(AppError::conflict(ConflictKind::InUse, None));
        }
        tables.categories.retain(|c| c.id != id);
        Ok(true)
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        Ok(self.read()?.suppliers.clone())
    }

    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, AppError> {
        Ok(self.read()?.supplier(id).cloned())
    }

    async fn insert_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, AppError> {
        let mut tables = self.write()?;
        self.check_supplier_unique(&tables, draft, None)?;
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
        };
        tables.suppliers.push(supplier.clone());
        Ok(supplier)
    }

    async fn update_supplier(&self, id: Uuid, draft: &SupplierDraft) -> Result<Option<Supplier>, AppError> {
        let mut tables = self.write()?;
        self.check_supplier_unique(&tables, draft, Some(id))?;
        let Some(supplier) = tables.suppliers.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        supplier.name = draft.name.clone();
        supplier.email = draft.email.clone();
        supplier.phone = draft.phone.clone();
        Ok(Some(supplier.clone()))
    }

    async fn delete_supplier(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        if tables.supplier(id).is_none() {
            return Ok(false);
        }
        if tables.products.iter().any(|p| p.supplier_id == id) {
            return Err(AppError::conflict(ConflictKind::InUse, None));
        }
        tables.suppliers.retain(|s| s.id != id);
        Ok(true)
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, AppError> {
        let tables = self.read()?;
        Ok(tables.products.iter().filter_map(|p| tables.detail(p)).collect())
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        Ok(self.read()?.products.iter().find(|p| p.id == id).cloned())
    }

    async fn get_product_detail(&self, id: Uuid) -> Result<Option<ProductDetail>, AppError> {
        let tables = self.read()?;
        Ok(tables
            .products
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| tables.detail(p)))
    }

    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, AppError> {
        let mut tables = self.write()?;
        tables.check_references(draft)?;
        let product = Product {
            id: Uuid::new_v4(),
            name: draft.name.clone(),
            category_id: draft.category_id,
            supplier_id: draft.supplier_id,
            price: draft.price,
            quantity: draft.quantity,
            image_url: draft.image_url.clone(),
        };
        tables.products.push(product.clone());
        Ok(product)
    }

    async fn update_product(&self, id: Uuid, draft: &ProductDraft) -> Result<Option<Product>, AppError> {
        let mut tables = self.write()?;
        if !tables.products.iter().any(|p| p.id == id) {
            return Ok(None);
        }
        tables.check_references(draft)?;
        let Some(product) = tables.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        product.name = draft.name.clone();
        product.category_id = draft.category_id;
        product.supplier_id = draft.supplier_id;
        product.price = draft.price;
        product.quantity = draft.quantity;
        product.image_url = draft.image_url.clone();
        Ok(Some(product.clone()))
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.write()?;
        let before = tables.products.len();
        tables.products.retain(|p| p.id != id);
        Ok(tables.products.len() < before)
    }

    async fn products_by_category(&self, category_id: Uuid) -> Result<Vec<ProductSummary>, AppError> {
        Ok(self.read()?.summaries(|p| p.category_id == category_id))
    }

    async fn products_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<ProductSummary>, AppError> {
        Ok(self.read()?.summaries(|p| p.supplier_id == supplier_id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
