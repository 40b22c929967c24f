//! Request validation: turns client payloads into drafts the store accepts.
//! Runs before any write; failures never reach the database.

use crate::error::AppError;
use crate::model::{
    CategoryDraft, CategoryInput, Product, ProductDraft, ProductInput, SupplierDraft, SupplierInput,
};
use uuid::Uuid;

pub struct RequestValidator;

impl RequestValidator {
    pub fn category(input: CategoryInput) -> Result<CategoryDraft, AppError> {
        Ok(CategoryDraft {
            name: required_text("name", input.name)?,
        })
    }

    /// Suppliers are replaced wholesale, so absent optional fields clear the stored value.
    pub fn supplier(input: SupplierInput) -> Result<SupplierDraft, AppError> {
        let name = required_text("name", input.name)?;
        let email = optional_text(input.email);
        if let Some(email) = &email {
            validate_email(email)?;
        }
        Ok(SupplierDraft {
            name,
            email,
            phone: optional_text(input.phone),
        })
    }

    pub fn new_product(input: ProductInput) -> Result<ProductDraft, AppError> {
        let name = required_text("name", input.name)?;
        let category_id = parse_reference("category_id", input.category_id.as_deref())?;
        let supplier_id = parse_reference("supplier_id", input.supplier_id.as_deref())?;
        let price = input
            .price
            .ok_or_else(|| AppError::validation("price", "price is required"))?;
        let quantity = input
            .quantity
            .ok_or_else(|| AppError::validation("quantity", "quantity is required"))?;
        product_draft(name, category_id, supplier_id, price, quantity, optional_text(input.image_url))
    }

    /// Merge a partial update onto the stored row, then check the result as a create would.
    pub fn merged_product(current: &Product, input: ProductInput) -> Result<ProductDraft, AppError> {
        let name = match input.name {
            Some(name) => required_text("name", Some(name))?,
            None => current.name.clone(),
        };
        let category_id = match input.category_id.as_deref() {
            Some(raw) => parse_reference("category_id", Some(raw))?,
            None => current.category_id,
        };
        let supplier_id = match input.supplier_id.as_deref() {
            Some(raw) => parse_reference("supplier_id", Some(raw))?,
            None => current.supplier_id,
        };
        let image_url = match input.image_url {
            Some(url) => optional_text(Some(url)),
            None => current.image_url.clone(),
        };
        product_draft(
            name,
            category_id,
            supplier_id,
            input.price.unwrap_or(current.price),
            input.quantity.unwrap_or(current.quantity),
            image_url,
        )
    }

    /// Parse a foreign-key id supplied by the client. Missing and malformed are both validation errors.
    pub fn reference_id(field: &'static str, raw: Option<&str>) -> Result<Uuid, AppError> {
        parse_reference(field, raw)
    }
}

fn product_draft(
    name: String,
    category_id: Uuid,
    supplier_id: Uuid,
    price: f64,
    quantity: i32,
    image_url: Option<String>,
) -> Result<ProductDraft, AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::validation("price", "price must be a non-negative number"));
    }
    if quantity < 0 {
        return Err(AppError::validation("quantity", "quantity must not be negative"));
    }
    Ok(ProductDraft {
        name,
        category_id,
        supplier_id,
        price,
        quantity,
        image_url,
    })
}

fn required_text(field: &'static str, value: Option<String>) -> Result<String, AppError> {
    optional_text(value)
        .ok_or_else(|| AppError::validation(field, format!("{} is required and cannot be empty", field)))
}

/// Trimmed value, with empty strings folded into `None`.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_reference(field: &'static str, raw: Option<&str>) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::validation(field, format!("{} is required", field)))?;
    Uuid::parse_str(raw)
        .map_err(|_| AppError::validation(field, format!("{} must be a valid UUID", field)))
}

/// One `@` with non-empty local and domain parts, no whitespace.
fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::validation("email", "email must be a valid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: AppError) -> &'static str {
        match err {
            AppError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    fn product_input() -> ProductInput {
        ProductInput {
            name: Some("Laptop".into()),
            category_id: Some(Uuid::new_v4().to_string()),
            price: Some(999.5),
            quantity: Some(3),
            image_url: None,
            supplier_id: Some(Uuid::new_v4().to_string()),
        }
    }

    #[test]
    fn category_name_is_required() {
        let err = RequestValidator::category(CategoryInput { name: Some("   ".into()) }).unwrap_err();
        assert_eq!(field_of(err), "name");
        let err = RequestValidator::category(CategoryInput::default()).unwrap_err();
        assert_eq!(field_of(err), "name");
    }

    #[test]
    fn category_name_is_trimmed() {
        let draft = RequestValidator::category(CategoryInput { name: Some(" Tools ".into()) }).unwrap();
        assert_eq!(draft.name, "Tools");
    }

    #[test]
    fn supplier_blank_contact_fields_become_absent() {
        let draft = RequestValidator::supplier(SupplierInput {
            name: Some("Acme".into()),
            email: Some("".into()),
            phone: Some("  ".into()),
        })
        .unwrap();
        assert_eq!(draft.email, None);
        assert_eq!(draft.phone, None);
    }

    #[test]
    fn supplier_email_must_look_like_one() {
        let err = RequestValidator::supplier(SupplierInput {
            name: Some("Acme".into()),
            email: Some("not-an-email".into()),
            phone: None,
        })
        .unwrap_err();
        assert_eq!(field_of(err), "email");
    }

    #[test]
    fn email_needs_text_on_both_sides_of_one_at() {
        for bad in ["a@", "@b.io", "@@@", "a@b@c", "a b@c.io"] {
            assert!(validate_email(bad).is_err(), "{bad} should be rejected");
        }
        assert!(validate_email("sales@acme.io").is_ok());
    }

    #[test]
    fn product_rejects_malformed_foreign_keys() {
        let mut input = product_input();
        input.category_id = Some("abc".into());
        assert_eq!(field_of(RequestValidator::new_product(input).unwrap_err()), "category_id");

        let mut input = product_input();
        input.supplier_id = None;
        assert_eq!(field_of(RequestValidator::new_product(input).unwrap_err()), "supplier_id");
    }

    #[test]
    fn product_requires_price_and_quantity() {
        let mut input = product_input();
        input.price = None;
        assert_eq!(field_of(RequestValidator::new_product(input).unwrap_err()), "price");

        let mut input = product_input();
        input.quantity = None;
        assert_eq!(field_of(RequestValidator::new_product(input).unwrap_err()), "quantity");

        let mut input = product_input();
        input.quantity = Some(-1);
        assert_eq!(field_of(RequestValidator::new_product(input).unwrap_err()), "quantity");
    }

    #[test]
    fn merge_keeps_stored_values_for_absent_fields() {
        let current = Product {
            id: Uuid::new_v4(),
            name: "Laptop".into(),
            category_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            price: 10.0,
            quantity: 4,
            image_url: Some("http://img/1.png".into()),
        };
        let draft = RequestValidator::merged_product(
            &current,
            ProductInput {
                quantity: Some(7),
                ..ProductInput::default()
            },
        )
        .unwrap();
        assert_eq!(draft.name, "Laptop");
        assert_eq!(draft.category_id, current.category_id);
        assert_eq!(draft.supplier_id, current.supplier_id);
        assert_eq!(draft.quantity, 7);
        assert_eq!(draft.price, 10.0);
        assert_eq!(draft.image_url.as_deref(), Some("http://img/1.png"));
    }

    #[test]
    fn merge_still_validates() {
        let current = Product {
            id: Uuid::new_v4(),
            name: "Laptop".into(),
            category_id: Uuid::new_v4(),
            supplier_id: Uuid::new_v4(),
            price: 10.0,
            quantity: 4,
            image_url: None,
        };
        let err = RequestValidator::merged_product(
            &current,
            ProductInput {
                name: Some(String::new()),
                ..ProductInput::default()
            },
        )
        .unwrap_err();
        assert_eq!(field_of(err), "name");
    }
}
