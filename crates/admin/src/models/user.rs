//! Dashboard users.

use backoffice_core::{Email, RoleId, UserId, UserStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::FormMode;
use crate::store::Record;
use crate::validation::{FieldRules, FieldValue, FormValues, Schema, patterns};

/// A dashboard user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Fixed at creation; edits never change it.
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub role_id: RoleId,
    /// Display name of `role_id`, copied from the role store on create and update.
    #[serde(default)]
    pub role_name: String,
    pub status: UserStatus,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl Record for User {
    type Id = UserId;
    const KIND: &'static str = "user";

    fn id(&self) -> UserId {
        self.id
    }
}

impl User {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Prefill values for the edit form. The password is never prefilled.
    #[must_use]
    pub fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.to_string(),
            password: String::new(),
            role_id: Some(self.role_id),
            status: self.status,
        }
    }
}

/// Values of the user form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Only collected (and validated) when creating a user.
    #[serde(default)]
    pub password: String,
    /// `None` while the "Select a role" placeholder is chosen.
    #[serde(default)]
    pub role_id: Option<RoleId>,
    #[serde(default)]
    pub status: UserStatus,
}

impl FormValues for UserDraft {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "username" => FieldValue::Text(&self.username),
            "first_name" => FieldValue::Text(&self.first_name),
            "last_name" => FieldValue::Text(&self.last_name),
            "email" => FieldValue::Text(&self.email),
            "password" => FieldValue::Text(&self.password),
            "role_id" => FieldValue::Selected(self.role_id.map(i64::from)),
            "status" => FieldValue::Text(self.status.as_str()),
            _ => FieldValue::Absent,
        }
    }
}

/// Username rules shared with the login and registration forms.
pub(crate) fn username_rules() -> FieldRules {
    FieldRules::new("username")
        .required("Username is required")
        .min_length(3, "Username must be at least 3 characters")
        .max_length(20, "Username must be at most 20 characters")
        .pattern(
            &patterns::USERNAME,
            "Username can only contain letters, numbers, and underscores",
        )
}

/// Which letter case a password is checked for first. The user form asks for
/// lowercase first; registration and password change ask for uppercase first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaseOrder {
    LowerFirst,
    UpperFirst,
}

/// Password strength rules shared with the registration and password-change forms.
pub(crate) fn password_rules(
    field: &'static str,
    required: &'static str,
    order: CaseOrder,
) -> FieldRules {
    let lower = (
        &patterns::HAS_LOWERCASE,
        "Password must contain at least one lowercase letter",
    );
    let upper = (
        &patterns::HAS_UPPERCASE,
        "Password must contain at least one uppercase letter",
    );
    let (first, second) = match order {
        CaseOrder::LowerFirst => (lower, upper),
        CaseOrder::UpperFirst => (upper, lower),
    };
    FieldRules::new(field)
        .required(required)
        .min_length(8, "Password must be at least 8 characters")
        .pattern(first.0, first.1)
        .pattern(second.0, second.1)
        .pattern(&patterns::HAS_DIGIT, "Password must contain at least one number")
}

/// Schema for the user form. The password is only required when creating.
///
/// The username is read-only when editing and [`merge`] keeps the stored one,
/// but its rules still run: an edit form holding an invalid username cannot
/// be submitted.
///
/// [`merge`]: crate::screens::Entity::merge
#[must_use]
pub fn schema<I>(mode: FormMode<I>) -> Schema {
    let schema = Schema::new()
        .field(username_rules())
        .field(
            FieldRules::new("first_name")
                .required("First name is required")
                .min_length(2, "First name must be at least 2 characters"),
        )
        .field(
            FieldRules::new("last_name")
                .required("Last name is required")
                .min_length(2, "Last name must be at least 2 characters"),
        )
        .field(
            FieldRules::new("email")
                .required("Email is required")
                .email("Invalid email address"),
        );

    let schema = if mode.is_edit() {
        schema
    } else {
        schema.field(password_rules(
            "password",
            "Password is required",
            CaseOrder::LowerFirst,
        ))
    };

    schema
        .field(
            FieldRules::new("status")
                .required("Status is required")
                .one_of(UserStatus::VALUES, "Invalid status"),
        )
        .field(FieldRules::new("role_id").required("Role is required"))
}
