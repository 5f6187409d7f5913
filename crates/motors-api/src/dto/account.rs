//! Account forms: registration, login, profile update and password change.

use std::borrow::Cow;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use motors_auth::password;

/// Message shown for any password that fails the strength rules.
pub const PASSWORD_REQUIREMENTS: &str = "Password does not meet requirements.";

/// Message shown when an email is already registered.
pub const EMAIL_EXISTS: &str = "Email exists. Please log in or use different email";

/// `validator` adapter for the password strength rules.
pub fn validate_strong_password(value: &str) -> Result<(), ValidationError> {
    if password::meets_requirements(value) {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength")
            .with_message(Cow::Borrowed(PASSWORD_REQUIREMENTS)))
    }
}

/// `POST /account/register`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterForm {
    /// Given name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a first name."))]
    pub account_firstname: String,
    /// Family name.
    #[serde(default)]
    #[validate(length(min = 2, message = "Please provide a last name."))]
    pub account_lastname: String,
    /// Login email.
    #[serde(default)]
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
    /// Plaintext password. Never echoed back into a form.
    #[serde(default)]
    #[validate(custom(function = "validate_strong_password"))]
    pub account_password: String,
}

impl RegisterForm {
    /// Trims the text fields; the password is kept as typed.
    pub fn normalized(self) -> Self {
        Self {
            account_firstname: self.account_firstname.trim().to_string(),
            account_lastname: self.account_lastname.trim().to_string(),
            account_email: self.account_email.trim().to_lowercase(),
            account_password: self.account_password,
        }
    }
}

/// `POST /account/login`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    /// Login email.
    #[serde(default)]
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
    /// Plaintext password.
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required."))]
    pub account_password: String,
}

impl LoginForm {
    /// Trims and lowercases the email.
    pub fn normalized(self) -> Self {
        Self {
            account_email: self.account_email.trim().to_lowercase(),
            account_password: self.account_password,
        }
    }
}

/// `POST /account/update-info`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AccountUpdateForm {
    /// Target account.
    #[serde(default)]
    pub account_id: i32,
    /// New given name.
    #[serde(default)]
    #[validate(length(min = 1, message = "Please provide a first name."))]
    pub account_firstname: String,
    /// New family name.
    #[serde(default)]
    #[validate(length(min = 2, message = "Please provide a last name."))]
    pub account_lastname: String,
    /// New login email.
    #[serde(default)]
    #[validate(email(message = "A valid email is required."))]
    pub account_email: String,
}

impl AccountUpdateForm {
    /// Trims the text fields.
    pub fn normalized(self) -> Self {
        Self {
            account_id: self.account_id,
            account_firstname: self.account_firstname.trim().to_string(),
            account_lastname: self.account_lastname.trim().to_string(),
            account_email: self.account_email.trim().to_lowercase(),
        }
    }
}

/// `POST /account/change-password`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PasswordChangeForm {
    /// Target account.
    #[serde(default)]
    pub account_id: i32,
    /// New plaintext password.
    #[serde(default)]
    #[validate(custom(function = "validate_strong_password"))]
    pub account_password: String,
}
