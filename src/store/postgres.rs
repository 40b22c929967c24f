//! `InventoryStore` on PostgreSQL via sqlx. Integrity violations are classified from the
//! driver's typed error and the violated constraint name.

use super::schema::constraint_field;
use super::InventoryStore;
use crate::error::{AppError, ConflictKind};
use crate::model::{
    Category, CategoryDraft, Product, ProductDetail, ProductDraft, ProductSummary, Supplier,
    SupplierDraft,
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

const PRODUCT_COLUMNS: &str = "id, name, category_id, supplier_id, price, quantity, image_url";

const PRODUCT_DETAIL_SELECT: &str = r#"
    SELECT p.id, p.name, p.price, p.quantity, p.image_url,
           c.id AS category_id, c.name AS category_name,
           s.id AS supplier_id, s.name AS supplier_name, s.email AS supplier_email, s.phone AS supplier_phone
    FROM products p
    JOIN categories c ON c.id = p.category_id
    JOIN suppliers s ON s.id = p.supplier_id
"#;

/// Whether a failed statement was writing a row or deleting one; an FK violation means
/// a dangling reference in the first case and a still-referenced row in the second.
#[derive(Clone, Copy)]
enum Write {
    Upsert,
    Delete,
}

fn classify(err: sqlx::Error, write: Write) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            let field = db_err.constraint().and_then(constraint_field);
            return AppError::conflict(ConflictKind::Duplicate, field);
        }
        if db_err.is_foreign_key_violation() {
            return match write {
                Write::Upsert => {
                    let field = db_err.constraint().and_then(constraint_field);
                    AppError::conflict(ConflictKind::UnknownReference, field)
                }
                Write::Delete => AppError::conflict(ConflictKind::InUse, None),
            };
        }
    }
    AppError::Db(err)
}

#[derive(sqlx::FromRow)]
struct ProductDetailRow {
    id: Uuid,
    name: String,
    price: f64,
    quantity: i32,
    image_url: Option<String>,
    category_id: Uuid,
    category_name: String,
    supplier_id: Uuid,
    supplier_name: String,
    supplier_email: Option<String>,
    supplier_phone: Option<String>,
}

impl From<ProductDetailRow> for ProductDetail {
    fn from(row: ProductDetailRow) -> Self {
        ProductDetail {
            id: row.id,
            name: row.name,
            price: row.price,
            quantity: row.quantity,
            image_url: row.image_url,
            category: Category {
                id: row.category_id,
                name: row.category_name,
            },
            supplier: Supplier {
                id: row.supplier_id,
                name: row.supplier_name,
                email: row.supplier_email,
                phone: row.supplier_phone,
            },
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }


    async fn summaries_where(&self, column: &str, id: Uuid) -> Result<Vec<ProductSummary>, AppError> {
        let sql = format!("SELECT id, name FROM products WHERE {} = $1 ORDER BY seq", column);
        tracing::debug!(sql = %sql, %id, "query");
        let rows = sqlx::query_as::<_, ProductSummary>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_where_id(&self, table: &str, id: Uuid) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        tracing::debug!(sql = %sql, %id, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(e, Write::Delete))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl InventoryStore for PgStore {
    async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, AppError> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (id, name) VALUES ($1, $2) RETURNING id, name",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, Write::Upsert))?;
        Ok(row)
    }

    async fn update_category(&self, id: Uuid, draft: &CategoryDraft) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(&draft.name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, Write::Upsert))?;
        Ok(row)
    }

    async fn delete_category(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_where_id("categories", id).await
    }

    async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        let rows = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, email, phone FROM suppliers ORDER BY seq",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_supplier(&self, id: Uuid) -> Result<Option<Supplier>, AppError> {
        let row = sqlx::query_as::<_, Supplier>(
            "SELECT id, name, email, phone FROM suppliers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_supplier(&self, draft: &SupplierDraft) -> Result<Supplier, AppError> {
        let row = sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers (id, name, email, phone) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, phone",
        )
        .bind(Uuid::new_v4())
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(e, Write::Upsert))?;
        Ok(row)
    }

    async fn update_supplier(&self, id: Uuid, draft: &SupplierDraft) -> Result<Option<Supplier>, AppError> {
        let row = sqlx::query_as::<_, Supplier>(
            "UPDATE suppliers SET name = $2, email = $3, phone = $4 WHERE id = $1 \
             RETURNING id, name, email, phone",
        )
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(e, Write::Upsert))?;
        Ok(row)
    }

    async fn delete_supplier(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_where_id("suppliers", id).await
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, AppError> {
        let sql = format!("{} ORDER BY p.seq", PRODUCT_DETAIL_SELECT);
        let rows = sqlx::query_as::<_, ProductDetailRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ProductDetail::from).collect())
    }

    async fn get_product(&self, id: Uuid) -> Result<Option<Product>, AppError> {
        let sql = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get_product_detail(&self, id: Uuid) -> Result<Option<ProductDetail>, AppError> {
        let sql = format!("{} WHERE p.id = $1", PRODUCT_DETAIL_SELECT);
        let row = sqlx::query_as::<_, ProductDetailRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ProductDetail::from))
    }

    async fn insert_product(&self, draft: &ProductDraft) -> Result<Product, AppError> {
        let sql = format!(
            "INSERT INTO products ({cols}) VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {cols}",
            cols = PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(Uuid::new_v4())
            .bind(&draft.name)
            .bind(draft.category_id)
            .bind(draft.supplier_id)
            .bind(draft.price)
            .bind(draft.quantity)
            .bind(&draft.image_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify(e, Write::Upsert))?;
        Ok(row)
    }

    async fn update_product(&self, id: Uuid, draft: &ProductDraft) -> Result<Option<Product>, AppError> {
        let sql = format!(
            "UPDATE products SET name = $2, category_id = $3, supplier_id = $4, price = $5, \
             quantity = $6, image_url = $7 WHERE id = $1 RETURNING {}",
            PRODUCT_COLUMNS
        );
        tracing::debug!(sql = %sql, %id, "query");
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&draft.name)
            .bind(draft.category_id)
            .bind(draft.supplier_id)
            .bind(draft.price)
            .bind(draft.quantity)
            .bind(&draft.image_url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(e, Write::Upsert))?;
        Ok(row)
    }

    async fn delete_product(&self, id: Uuid) -> Result<bool, AppError> {
        self.delete_where_id("products", id).await
    }

    async fn products_by_category(&self, category_id: Uuid) -> Result<Vec<ProductSummary>, AppError> {
        self.summaries_where("category_id", category_id).await
    }

    async fn products_by_supplier(&self, supplier_id: Uuid) -> Result<Vec<ProductSummary>, AppError> {
        self.summaries_where("supplier_id", supplier_id).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
