//! # Auth Service
//!
//! Simulated login and signup. Forms are validated for real; submission
//! only waits a configured delay and hands back a receipt. No network, no
//! credential check, nothing stored.

use chrono::{DateTime, Utc};
use nextbuy_core::{AccountType, FormErrors, LoginForm, SignupForm};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::AuthSettings;

/// Receipt for a successful login.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    /// Opaque session identifier.
    pub token: Uuid,
    /// Address the user logged in with.
    pub email: String,
    /// When the login completed.
    pub logged_in_at: DateTime<Utc>,
}

/// Receipt for a successful signup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// New account identifier.
    pub id: Uuid,
    /// User or admin.
    pub account_type: AccountType,
    /// Full name, trimmed.
    pub name: String,
    /// Address the account was registered with.
    pub email: String,
    /// Admin accounts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// When the signup completed.
    pub registered_at: DateTime<Utc>,
}

/// Login and signup against the configured delays and admin code.
#[derive(Debug, Clone, Default)]
pub struct AuthService {
    settings: AuthSettings,
}

impl AuthService {
    /// Creates a service over `settings`.
    pub fn new(settings: AuthSettings) -> Self {
        AuthService { settings }
    }

    /// The settings in use.
    pub fn settings(&self) -> &AuthSettings {
        &self.settings
    }

    /// Validates the form, then waits the login delay.
    pub async fn login(&self, form: &LoginForm) -> Result<Session, FormErrors> {
        if let Err(errors) = form.validate() {
            debug!(fields = errors.len(), "Login form rejected");
            return Err(errors);
        }

        info!(email = %form.email, password = "[redacted]", "Login attempt");
        tokio::time::sleep(self.settings.login_delay()).await;

        Ok(Session {
            token: Uuid::new_v4(),
            email: form.email.clone(),
            logged_in_at: Utc::now(),
        })
    }

    /// Validates the form against the configured admin code, then waits the
    /// signup delay.
    pub async fn signup(&self, form: &SignupForm) -> Result<Registration, FormErrors> {
        if let Err(errors) = form.validate(&self.settings.admin_code) {
            debug!(fields = errors.len(), "Signup form rejected");
            return Err(errors);
        }

        info!(
            email = %form.email,
            account_type = %form.account_type,
            password = "[redacted]",
            "Signup attempt"
        );
        tokio::time::sleep(self.settings.signup_delay()).await;

        let business_name = match form.account_type {
            AccountType::Admin => Some(form.business_name.trim().to_string()),
            AccountType::User => None,
        };

        Ok(Registration {
            id: Uuid::new_v4(),
            account_type: form.account_type,
            name: form.name.trim().to_string(),
            email: form.email.clone(),
            business_name,
            registered_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextbuy_core::forms::FormField;
    use std::time::Duration;
    use tokio::time::Instant;

    fn user_signup() -> SignupForm {
        SignupForm {
            name: " Grace Hopper ".into(),
            email: "grace@example.com".into(),
            password: "cobol1959".into(),
            confirm_password: "cobol1959".into(),
            phone: "555 987 6543".into(),
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_configured_delay() {
        let auth = AuthService::default();
        let start = Instant::now();

        let session = auth
            .login(&LoginForm::new("grace@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(session.email, "grace@example.com");
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_login_returns_immediately() {
        let auth = AuthService::default();
        let start = Instant::now();

        let errors = auth.login(&LoginForm::new("grace", "")).await.unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_user() {
        let auth = AuthService::default();
        let start = Instant::now();

        let registration = auth.signup(&user_signup()).await.unwrap();

        assert_eq!(registration.name, "Grace Hopper");
        assert_eq!(registration.account_type, AccountType::User);
        assert_eq!(registration.business_name, None);
        assert!(start.elapsed() >= Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_signup_admin_uses_configured_code() {
        let auth = AuthService::new(AuthSettings {
            admin_code: "HARBOR".into(),
            signup_delay_ms: 0,
            ..Default::default()
        });

        let mut form = SignupForm {
            account_type: AccountType::Admin,
            admin_code: "ADMIN2024".into(),
            business_name: "Hopper Hardware".into(),
            business_address: "12 Navy Yard".into(),
            ..user_signup()
        };

        let errors = auth.signup(&form).await.unwrap_err();
        assert!(errors.get(FormField::AdminCode).is_some());

        form.admin_code = "HARBOR".into();
        let registration = auth.signup(&form).await.unwrap();
        assert_eq!(registration.business_name.as_deref(), Some("Hopper Hardware"));
    }
}
