//! # Validation Module
//!
//! Field validators shared by the login and signup forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (one field at a time)                            │
//! │  ├── required / format / length checks                                 │
//! │  └── returns the message shown under the field                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: forms.rs (whole form)                                        │
//! │  └── runs every field, collects ALL errors into FormErrors             │
//! │                                                                         │
//! │  There is no server-side layer: submission is simulated.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nextbuy_core::validation::{validate_email, validate_password};
//!
//! assert!(validate_email("ada@example.com").is_ok());
//! assert!(validate_password("hunter2").is_ok());
//! assert!(validate_password("short").is_err());
//! ```

use crate::error::ValidationError;
use crate::{MIN_PASSWORD_LEN, PHONE_DIGITS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn required(label: &str) -> ValidationError {
    ValidationError::Required {
        label: label.to_string(),
    }
}

// =============================================================================
// String Validators
// =============================================================================

/// Fails when `value` is blank after trimming.
pub fn validate_required(label: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(required(label));
    }
    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain `something@something.something` with no whitespace
///   inside each part. This is a shape check, not RFC 5322.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.is_empty() {
        return Err(required("Email"));
    }

    if !looks_like_email(email) {
        return Err(ValidationError::Invalid {
            label: "Email".to_string(),
        });
    }

    Ok(())
}

/// Finds `\S+@\S+\.\S+` anywhere in the input.
fn looks_like_email(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();

    chars.iter().enumerate().any(|(at, &c)| {
        if c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            return false;
        }

        let domain: Vec<char> = chars[at + 1..]
            .iter()
            .take_while(|c| !c.is_whitespace())
            .copied()
            .collect();

        // Needs a dot with at least one character on each side.
        domain
            .iter()
            .enumerate()
            .any(|(i, &c)| c == '.' && i >= 1 && i + 1 < domain.len())
    })
}

/// Validates a password.
///
/// ## Rules
/// - Must not be empty
/// - At least [`MIN_PASSWORD_LEN`] UTF-16 code units, so a character
///   outside the Basic Multilingual Plane (e.g. an emoji) counts as two
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(required("Password"));
    }

    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            label: "Password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// The confirmation must equal the password exactly.
pub fn validate_password_confirmation(password: &str, confirm: &str) -> ValidationResult<()> {
    if password != confirm {
        return Err(ValidationError::Mismatch);
    }
    Ok(())
}

/// Validates a phone number.
///
/// ## Rules
/// - Must not be empty
/// - After stripping `-` and whitespace, exactly [`PHONE_DIGITS`] ASCII digits
///
/// ## Example
/// ```rust
/// use nextbuy_core::validation::validate_phone;
///
/// assert!(validate_phone("555-123-4567").is_ok());
/// assert!(validate_phone("555 123 4567").is_ok());
/// assert!(validate_phone("+1 555 123 4567").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.is_empty() {
        return Err(required("Phone number"));
    }

    let digits: String = phone
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    if digits.len() != PHONE_DIGITS || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidPhone {
            digits: PHONE_DIGITS,
        });
    }

    Ok(())
}

/// Validates the admin verification code against the expected one.
pub fn validate_admin_code(code: &str, expected: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(required("Admin verification code"));
    }

    if code != expected {
        return Err(ValidationError::InvalidAdminCode);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
