//! Sign-in and account forms.
//!
//! None of these talk to a server: submitting yields the validated values
//! (and, for password reset, the delay before returning to the login page).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{FormMode, FormState};
use crate::models::user::{CaseOrder, password_rules, username_rules};
use crate::validation::{FieldErrors, FieldRules, FieldValue, FormValues, Schema, patterns};

/// How the user identifies on the login page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginMethod {
    #[default]
    Email,
    Username,
}

impl LoginMethod {
    /// The other method.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Email => Self::Username,
            Self::Username => Self::Email,
        }
    }
}

fn login_password() -> FieldRules {
    FieldRules::new("password")
        .required("Password is required")
        .min_length(6, "Password must be at least 6 characters")
}

/// Email and password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailLogin {
    pub email: String,
    pub password: String,
}

impl FormValues for EmailLogin {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "email" => FieldValue::Text(&self.email),
            "password" => FieldValue::Text(&self.password),
            _ => FieldValue::Absent,
        }
    }
}

impl EmailLogin {
    /// Login-by-email schema.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new()
            .field(
                FieldRules::new("email")
                    .required("Email is required")
                    .email("Invalid email address"),
            )
            .field(login_password())
    }
}

/// Username and password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameLogin {
    pub username: String,
    pub password: String,
}

impl FormValues for UsernameLogin {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "username" => FieldValue::Text(&self.username),
            "password" => FieldValue::Text(&self.password),
            _ => FieldValue::Absent,
        }
    }
}

impl UsernameLogin {
    /// Login-by-username schema.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new().field(username_rules()).field(login_password())
    }
}

/// Validated credentials, ready to hand to an authentication backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Email(EmailLogin),
    Username(UsernameLogin),
}

/// The login page: one form per method and a toggle between them.
///
/// Switching methods keeps what was typed into either form.
#[derive(Debug, Clone)]
pub struct LoginPage {
    method: LoginMethod,
    email: FormState<EmailLogin>,
    username: FormState<UsernameLogin>,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self {
            method: LoginMethod::default(),
            email: FormState::new(FormMode::Create, EmailLogin::default(), EmailLogin::schema()),
            username: FormState::new(
                FormMode::Create,
                UsernameLogin::default(),
                UsernameLogin::schema(),
            ),
        }
    }
}

impl LoginPage {
    /// Active method.
    #[must_use]
    pub const fn method(&self) -> LoginMethod {
        self.method
    }

    /// Switch between email and username login.
    pub fn toggle_method(&mut self) {
        self.method = self.method.toggled();
    }

    /// The email form.
    pub const fn email_form(&mut self) -> &mut FormState<EmailLogin> {
        &mut self.email
    }

    /// The username form.
    pub const fn username_form(&mut self) -> &mut FormState<UsernameLogin> {
        &mut self.username
    }

    /// Submit the form of the active method.
    ///
    /// # Errors
    ///
    /// Returns the failing fields of the active form.
    pub fn submit(&mut self) -> Result<Credentials, FieldErrors> {
        let credentials = match self.method {
            LoginMethod::Email => Credentials::Email(self.email.submit()?),
            LoginMethod::Username => Credentials::Username(self.username.submit()?),
        };
        info!(method = ?self.method, "Login submitted");
        Ok(credentials)
    }
}

/// Password reset request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForgotPassword {
    pub email: String,
}

impl FormValues for ForgotPassword {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "email" => FieldValue::Text(&self.email),
            _ => FieldValue::Absent,
        }
    }
}

impl ForgotPassword {
    /// Reset request schema.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new().field(
            FieldRules::new("email")
                .required("Email is required")
                .email("Invalid email address"),
        )
    }

    /// Validate the request.
    ///
    /// On success the caller shows the "check your email" page and returns
    /// to the login page after `redirect_after`.
    ///
    /// # Errors
    ///
    /// Returns the failing fields.
    pub fn request(&self, redirect_after: Duration) -> Result<ResetRequested, FieldErrors> {
        Self::schema().validate(self)?;
        info!("Password reset requested");
        Ok(ResetRequested {
            email: self.email.clone(),
            redirect_after,
        })
    }
}

/// Outcome of a valid reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequested {
    pub email: String,
    /// Delay before returning to the login page.
    pub redirect_after: Duration,
}

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub bio: String,
}

impl FormValues for ProfileForm {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "first_name" => FieldValue::Text(&self.first_name),
            "last_name" => FieldValue::Text(&self.last_name),
            "email" => FieldValue::Text(&self.email),
            "phone" => FieldValue::Text(&self.phone),
            "bio" => FieldValue::Text(&self.bio),
            _ => FieldValue::Absent,
        }
    }
}

impl ProfileForm {
    /// Profile schema. The bio is optional.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new()
            .field(
                FieldRules::new("first_name")
                    .required("First name is required")
                    .min_length(2, "First name must be at least 2 characters")
                    .max_length(50, "First name must be at most 50 characters"),
            )
            .field(
                FieldRules::new("last_name")
                    .required("Last name is required")
                    .min_length(2, "Last name must be at least 2 characters")
                    .max_length(50, "Last name must be at most 50 characters"),
            )
            .field(
                FieldRules::new("email")
                    .required("Email is required")
                    .email("Invalid email address"),
            )
            .field(phone_rules("Phone number must be at least 10 characters"))
            .field(FieldRules::new("bio").max_length(500, "Bio must be at most 500 characters"))
    }
}

/// Phone allowlist plus a ten-character minimum.
pub(crate) fn phone_rules(too_short: &'static str) -> FieldRules {
    FieldRules::new("phone")
        .required("Phone number is required")
        .pattern(&patterns::PHONE, "Invalid phone number format")
        .min_length(10, too_short)
}

/// Password change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl FormValues for PasswordChange {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "current_password" => FieldValue::Text(&self.current_password),
            "new_password" => FieldValue::Text(&self.new_password),
            "confirm_password" => FieldValue::Text(&self.confirm_password),
            _ => FieldValue::Absent,
        }
    }
}

impl PasswordChange {
    /// Password change schema.
    #[must_use]
    pub fn schema() -> Schema {
        Schema::new()
            .field(FieldRules::new("current_password").required("Current password is required"))
            .field(password_rules(
                "new_password",
                "New password is required",
                CaseOrder::UpperFirst,
            ))
            .field(
                FieldRules::new("confirm_password")
                    .required("Please confirm your password")
                    .same_as("new_password", "Passwords must match"),
            )
    }
}
