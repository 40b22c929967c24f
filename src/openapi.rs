//! OpenAPI document for the inventory routes, served at /openapi.json.

use crate::error::ErrorBody;
use crate::handlers::{categories, products, suppliers};
use crate::model::{
    Category, CategoryInput, ProductDetail, ProductInput, ProductSummary, Supplier, SupplierInput,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        categories::list_categories,
        categories::create_category,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        categories::list_category_products,
        suppliers::list_suppliers,
        suppliers::create_supplier,
        suppliers::get_supplier,
        suppliers::update_supplier,
        suppliers::delete_supplier,
        suppliers::list_supplier_products,
    ),
    components(schemas(
        Category,
        CategoryInput,
        Supplier,
        SupplierInput,
        ProductDetail,
        ProductInput,
        ProductSummary,
        ErrorBody,
    )),
    tags(
        (name = "products", description = "Products with resolved category and supplier"),
        (name = "categories", description = "Product categories"),
        (name = "suppliers", description = "Product suppliers")
    )
)]
pub struct ApiDoc;
