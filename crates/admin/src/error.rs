//! Unified error handling for admin.

use thiserror::Error;

use crate::config::ConfigError;
use crate::validation::FieldErrors;

/// Application-level error type for the dashboard screens.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Candidate record failed its form schema. Recoverable; the store is untouched.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// Role still has users assigned according to its (snapshot) user count.
    #[error("Cannot delete role \"{name}\" because it has {user_count} user(s) assigned.")]
    RoleInUse {
        /// Role display name.
        name: String,
        /// Denormalized user count at the time of the attempt.
        user_count: u32,
    },

    /// No record with this identifier exists in the store.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind (`user`, `role`, ...).
        kind: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// Submit was called while no create/edit form is open.
    #[error("No form is open")]
    NoOpenForm,

    /// The registration wizard was submitted before its final step.
    #[error("Registration is on step {step} of 3")]
    RegistrationIncomplete {
        /// 1-based step the wizard is on.
        step: u8,
    },

    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset could not be parsed as YAML.
    #[error("Dataset error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Dataset could not be parsed as JSON.
    #[error("Dataset error: {0}")]
    Json(#[from] serde_json::Error),

    /// Table markup could not be rendered.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AdminError {
    /// Whether the error is a user-recoverable business outcome rather than a fault.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::RoleInUse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_error_display() {
        let err = AdminError::RoleInUse {
            name: "Administrator".to_string(),
            user_count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Cannot delete role \"Administrator\" because it has 2 user(s) assigned."
        );

        let err = AdminError::NotFound {
            kind: "location",
            id: "9".to_string(),
        };
        assert_eq!(err.to_string(), "location not found: 9");
    }

    #[test]
    fn test_user_facing_classification() {
        let validation = AdminError::from(FieldErrors::single("name", "Role name is required"));
        assert!(validation.is_user_facing());
        assert!(!AdminError::NoOpenForm.is_user_facing());
    }
}
