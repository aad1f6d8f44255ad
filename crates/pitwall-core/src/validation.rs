//! # Validation Module
//!
//! Field checks for catalog entries.
//!
//! Store operations never validate: they are total by contract. Validation
//! runs once, when a catalog is assembled (see [`crate::catalog::Catalog`]),
//! so that everything the store later hands out is already well-formed.
//!
//! ## Usage
//! ```rust
//! use pitwall_core::validation::{validate_product_id, validate_price};
//! use pitwall_core::Money;
//!
//! assert!(validate_product_id("tee-1").is_ok());
//! assert!(validate_price(Money::from_cents(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest id accepted for products and categories.
pub const MAX_ID_LEN: usize = 64;

/// Longest display name accepted for products and categories.
pub const MAX_NAME_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an id (product or category).
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Only letters, digits, hyphens and underscores
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LEN,
        });
    }

    if !id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product id.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    validate_id("product id", id)
}

/// Validates a display name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price.
///
/// Zero is allowed (free items); negative prices are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_name("product name", &product.name)?;
    validate_price(product.price)
}

/// Validates a category's own fields and every product in it.
pub fn validate_category(category: &Category) -> ValidationResult<()> {
    validate_id("category id", &category.id)?;
    validate_name("category name", &category.name)?;
    category.products.iter().try_for_each(validate_product)
}
