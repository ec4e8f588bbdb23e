//! # Auth Forms
//!
//! Whole-form validation for login and signup. Every field is checked and
//! all failures are reported together, keyed by field.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation::{
    validate_admin_code, validate_email, validate_password, validate_password_confirmation,
    validate_phone, validate_required,
};

// =============================================================================
// Fields and Errors
// =============================================================================

/// A form input, named as the forms name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// Full name.
    Name,
    /// Email address.
    Email,
    /// Password.
    Password,
    /// Password repeated for confirmation.
    ConfirmPassword,
    /// Phone number.
    Phone,
    /// Admin verification code.
    AdminCode,
    /// Business name (admin only).
    BusinessName,
    /// Business address (admin only).
    BusinessAddress,
}

impl FormField {
    /// Key the view uses for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Password => "password",
            FormField::ConfirmPassword => "confirmPassword",
            FormField::Phone => "phone",
            FormField::AdminCode => "adminCode",
            FormField::BusinessName => "businessName",
            FormField::BusinessAddress => "businessAddress",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field errors collected from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, ValidationError>);

impl FormErrors {
    /// Empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one field check; `Ok` is ignored.
    pub fn check(&mut self, field: FormField, result: Result<(), ValidationError>) {
        if let Err(err) = result {
            self.0.insert(field, err);
        }
    }

    /// Error recorded for `field`, if any.
    pub fn get(&self, field: FormField) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failed fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &ValidationError)> {
        self.0.iter().map(|(field, err)| (*field, err))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, err) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, err)?;
            first = false;
        }
        Ok(())
    }
}

/// Field → message map, the shape a view renders.
impl Serialize for FormErrors {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, err) in &self.0 {
            map.serialize_entry(field.as_str(), &err.to_string())?;
        }
        map.end()
    }
}

// =============================================================================
// Login
// =============================================================================

/// Login form input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginForm {
    /// Creates a login form.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks email and password.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        errors.check(FormField::Email, validate_email(&self.email));
        errors.check(FormField::Password, validate_password(&self.password));
        errors.into_result()
    }
}

// =============================================================================
// Signup
// =============================================================================

/// Kind of account being registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Regular shopper.
    #[default]
    User,
    /// Store administrator; needs the admin code.
    Admin,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::User => write!(f, "user"),
            AccountType::Admin => write!(f, "admin"),
        }
    }
}

/// Signup form input. The business fields only matter for admins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    /// User or admin.
    #[serde(default)]
    pub account_type: AccountType,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Password repeated.
    pub confirm_password: String,
    /// Phone number.
    pub phone: String,
    /// Admin verification code.
    #[serde(default)]
    pub admin_code: String,
    /// Admin only.
    #[serde(default)]
    pub business_name: String,
    /// Admin only.
    #[serde(default)]
    pub business_address: String,
}

impl SignupForm {
    /// Checks every field; admin fields are checked against `admin_code`.
    pub fn validate(&self, admin_code: &str) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        errors.check(FormField::Name, validate_required("Full name", &self.name));
        errors.check(FormField::Email, validate_email(&self.email));
        errors.check(FormField::Password, validate_password(&self.password));
        errors.check(
            FormField::ConfirmPassword,
            validate_password_confirmation(&self.password, &self.confirm_password),
        );
        errors.check(FormField::Phone, validate_phone(&self.phone));

        if self.account_type == AccountType::Admin {
            errors.check(
                FormField::AdminCode,
                validate_admin_code(&self.admin_code, admin_code),
            );
            errors.check(
                FormField::BusinessName,
                validate_required("Business name", &self.business_name),
            );
            errors.check(
                FormField::BusinessAddress,
                validate_required("Business address", &self.business_address),
            );
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_ADMIN_CODE;
    use serde_json::json;

    fn valid_signup() -> SignupForm {
        SignupForm {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            password: "analytical".into(),
            confirm_password: "analytical".into(),
            phone: "555-123-4567".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_collects_all_errors() {
        let errors = LoginForm::new("", "123").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(FormField::Email).unwrap().to_string(),
            "Email is required"
        );
        assert_eq!(
            errors.get(FormField::Password).unwrap().to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_login_ok() {
        assert!(LoginForm::new("ada@example.com", "secret").validate().is_ok());
    }

    #[test]
    fn test_signup_user_ignores_admin_fields() {
        assert!(valid_signup().validate(DEFAULT_ADMIN_CODE).is_ok());
    }

    #[test]
    fn test_signup_mismatch_and_blank_name() {
        let form = SignupForm {
            name: "   ".into(),
            confirm_password: "different".into(),
            ..valid_signup()
        };
        let errors = form.validate(DEFAULT_ADMIN_CODE).unwrap_err();
        assert_eq!(
            errors.get(FormField::Name).unwrap().to_string(),
            "Full name is required"
        );
        assert_eq!(
            errors.get(FormField::ConfirmPassword).unwrap().to_string(),
            "Passwords do not match"
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_signup_admin_requires_business_details() {
        let form = SignupForm {
            account_type: AccountType::Admin,
            admin_code: "WRONG".into(),
            ..valid_signup()
        };
        let errors = form.validate(DEFAULT_ADMIN_CODE).unwrap_err();

        assert_eq!(
            errors.get(FormField::AdminCode),
            Some(&ValidationError::InvalidAdminCode)
        );
        assert!(errors.get(FormField::BusinessName).is_some());
        assert!(errors.get(FormField::BusinessAddress).is_some());
    }

    #[test]
    fn test_admin_with_custom_code() {
        let form = SignupForm {
            account_type: AccountType::Admin,
            admin_code: "LETMEIN".into(),
            business_name: "Ada's Shop".into(),
            business_address: "1 Engine Way".into(),
            ..valid_signup()
        };
        assert!(form.validate("LETMEIN").is_ok());
        assert!(form.validate(DEFAULT_ADMIN_CODE).is_err());
    }

    #[test]
    fn test_errors_serialize_as_field_map() {
        let errors = LoginForm::new("nope", "").validate().unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            json!({"email": "Email is invalid", "password": "Password is required"})
        );
    }
}
