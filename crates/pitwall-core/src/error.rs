//! # Error Types
//!
//! Domain-specific error types for pitwall-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Boundaries                                │
//! │                                                                         │
//! │  Store operations (dispatch, set, update)                               │
//! │  └── NONE. They are total: unknown ids and stray triggers are no-ops.  │
//! │                                                                         │
//! │  Edges of the core (this file)                                          │
//! │  ├── CoreError        - lookups and string parsing at the boundary     │
//! │  └── ValidationError  - seed catalog checks                            │
//! │                                                                         │
//! │  Shell errors (in app)                                                  │
//! │  └── ShellError       - config, command parsing, I/O                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised at the edges of the core.
///
/// None of these can come out of a state mutation. They are produced when
/// the view layer turns loose input (typed ids, page names, button labels)
/// into core values, or when a catalog is assembled.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// No category with this id exists in the catalog.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// The string does not name one of the fixed pages.
    #[error("Unknown page: '{0}'. Valid pages: home, category, product, cart, auth, checkout")]
    UnknownPage(String),

    /// The string does not name an auth transition trigger.
    #[error("Unknown auth trigger: '{0}'")]
    UnknownTrigger(String),

    /// The string does not name an auth form field.
    #[error("Unknown auth field: '{0}'. Valid fields: email, otp, newPassword")]
    UnknownAuthField(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g. whitespace in an id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
