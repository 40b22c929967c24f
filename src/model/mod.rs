//! Inventory records, their request payloads and validated write drafts.

mod category;
mod product;
mod supplier;

pub use category::{Category, CategoryDraft, CategoryInput};
pub use product::{Product, ProductDetail, ProductDraft, ProductInput, ProductSummary};
pub use supplier::{Supplier, SupplierDraft, SupplierInput};
