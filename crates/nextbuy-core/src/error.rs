//! # Error Types
//!
//! Domain-specific error types for nextbuy-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nextbuy-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Form field rule violations                     │
//! │                                                                         │
//! │  nextbuy-store errors (separate crate)                                 │
//! │  ├── FetchError       - Product listing failures                       │
//! │  └── StoreError       - Config / fetch / validation umbrella           │
//! │                                                                         │
//! │  Cart and catalog reducers have NO error type: they are total.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages are the exact text the forms show next to a field
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::forms::FormErrors;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// One or more form fields failed validation.
    #[error("Form validation failed: {0}")]
    InvalidForm(FormErrors),

    /// A product record could not be decoded.
    ///
    /// ## When This Occurs
    /// - `id` is neither a number nor a string
    /// - `price` is missing or not a number
    #[error("Invalid product record: {0}")]
    InvalidProduct(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<FormErrors> for CoreError {
    fn from(errors: FormErrors) -> Self {
        CoreError::InvalidForm(errors)
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::InvalidProduct(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Form field validation errors.
///
/// `Display` yields the message the form renders under the field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{label} is required")]
    Required { label: String },

    /// Value is present but malformed.
    #[error("{label} is invalid")]
    Invalid { label: String },

    /// Value is shorter than the minimum.
    #[error("{label} must be at least {min} characters")]
    TooShort { label: String, min: usize },

    /// Confirmation does not match the original value.
    #[error("Passwords do not match")]
    Mismatch,

    /// Phone number does not have the expected digit count.
    #[error("Please enter a valid {digits}-digit phone number")]
    InvalidPhone { digits: usize },

    /// Admin verification code is wrong.
    #[error("Invalid admin verification code")]
    InvalidAdminCode,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
