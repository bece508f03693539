//! Roles and the static permission catalog.

use backoffice_core::{RoleId, RoleStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::FormMode;
use crate::store::Record;
use crate::validation::{FieldRules, FieldValue, FormValues, Schema};

/// A permission a role can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    /// Stable identifier stored on roles.
    pub id: &'static str,
    /// Checkbox label.
    pub label: &'static str,
}

/// Every permission a role can carry, in display order.
pub const PERMISSION_CATALOG: &[Permission] = &[
    Permission { id: "users.view", label: "View Users" },
    Permission { id: "users.create", label: "Create Users" },
    Permission { id: "users.edit", label: "Edit Users" },
    Permission { id: "users.delete", label: "Delete Users" },
    Permission { id: "roles.view", label: "View Roles" },
    Permission { id: "roles.create", label: "Create Roles" },
    Permission { id: "roles.edit", label: "Edit Roles" },
    Permission { id: "roles.delete", label: "Delete Roles" },
    Permission { id: "settings.view", label: "View Settings" },
    Permission { id: "settings.edit", label: "Edit Settings" },
];

/// Identifiers of [`PERMISSION_CATALOG`], in the same order.
#[allow(clippy::indexing_slicing)]
static PERMISSION_IDS: [&str; PERMISSION_CATALOG.len()] = {
    let mut ids = [""; PERMISSION_CATALOG.len()];
    let mut i = 0;
    while i < ids.len() {
        ids[i] = PERMISSION_CATALOG[i].id;
        i += 1;
    }
    ids
};

/// A role.
///
/// `user_count` is a denormalized snapshot: it is set when the role is loaded
/// or created and is not kept in sync with the user store. Deletion is gated
/// on this snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    pub description: String,
    /// Permission identifiers from [`PERMISSION_CATALOG`], in the order granted.
    pub permissions: Vec<String>,
    #[serde(default)]
    pub user_count: u32,
    pub status: RoleStatus,
    pub created_at: DateTime<Utc>,
}

impl Record for Role {
    type Id = RoleId;
    const KIND: &'static str = "role";

    fn id(&self) -> RoleId {
        self.id
    }
}

impl Role {
    /// Whether the role can be chosen for a user.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        self.status == RoleStatus::Active
    }

    /// Prefill values for the edit form.
    #[must_use]
    pub fn to_draft(&self) -> RoleDraft {
        RoleDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            permissions: self.permissions.clone(),
            status: self.status,
        }
    }
}

/// Values of the role form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub status: RoleStatus,
}

impl RoleDraft {
    /// Check or uncheck a permission, keeping grant order.
    pub fn toggle_permission(&mut self, permission: &str, granted: bool) {
        let present = self.permissions.iter().any(|p| p == permission);
        if granted && !present {
            self.permissions.push(permission.to_owned());
        } else if !granted {
            self.permissions.retain(|p| p != permission);
        }
    }
}

impl FormValues for RoleDraft {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "description" => FieldValue::Text(&self.description),
            "permissions" => FieldValue::List(&self.permissions),
            "status" => FieldValue::Text(self.status.as_str()),
            _ => FieldValue::Absent,
        }
    }
}

/// Schema for the role form. Identical for create and edit.
#[must_use]
pub fn schema<I>(_mode: FormMode<I>) -> Schema {
    Schema::new()
        .field(
            FieldRules::new("name")
                .required("Role name is required")
                .min_length(3, "Role name must be at least 3 characters")
                .max_length(50, "Role name must be at most 50 characters"),
        )
        .field(
            FieldRules::new("description")
                .required("Description is required")
                .min_length(10, "Description must be at least 10 characters")
                .max_length(200, "Description must be at most 200 characters"),
        )
        .field(
            FieldRules::new("permissions")
                .min_items(1, "At least one permission is required")
                .each_one_of(&PERMISSION_IDS, "Unknown permission"),
        )
        .field(
            FieldRules::new("status")
                .required("Status is required")
                .one_of(RoleStatus::VALUES, "Invalid status"),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> RoleDraft {
        RoleDraft {
            name: "Auditor".to_string(),
            description: "Read-only access for compliance reviews".to_string(),
            permissions: vec!["users.view".to_string(), "roles.view".to_string()],
            status: RoleStatus::Active,
        }
    }

    #[test]
    fn test_every_catalog_permission_validates() {
        let mut d = draft();
        d.permissions = PERMISSION_CATALOG.iter().map(|p| p.id.to_string()).collect();
        assert!(schema::<()>(FormMode::Create).validate(&d).is_ok());
        assert_eq!(PERMISSION_IDS.len(), 10);
    }

    #[test]
    fn test_valid_draft() {
        assert!(schema::<()>(FormMode::Create).validate(&draft()).is_ok());
    }

    #[test]
    fn test_requires_a_permission() {
        let mut d = draft();
        d.permissions.clear();
        let errors = schema::<()>(FormMode::Create).validate(&d).unwrap_err();
        assert_eq!(
            errors.get("permissions"),
            Some("At least one permission is required")
        );
    }

    #[test]
    fn test_rejects_permission_outside_catalog() {
        let mut d = draft();
        d.permissions.push("billing.view".to_string());
        let errors = schema::<()>(FormMode::Create).validate(&d).unwrap_err();
        assert_eq!(errors.get("permissions"), Some("Unknown permission"));
    }

    #[test]
    fn test_length_bounds() {
        let mut d = draft();
        d.name = "QA".to_string();
        d.description = "short".to_string();
        let errors = schema::<()>(FormMode::Create).validate(&d).unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Role name must be at least 3 characters")
        );
        assert_eq!(
            errors.get("description"),
            Some("Description must be at least 10 characters")
        );
    }

    #[test]
    fn test_toggle_permission_keeps_order_and_uniqueness() {
        let mut d = draft();
        d.toggle_permission("settings.view", true);
        d.toggle_permission("settings.view", true);
        d.toggle_permission("users.view", false);
        assert_eq!(d.permissions, vec!["roles.view", "settings.view"]);
    }
}
