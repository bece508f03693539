//! Dashboard state and dataset loading.
//!
//! [`AdminState`] owns every screen. Handlers take it by `&mut`; there is no
//! sharing and no background work.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::DatasetFormat;
use crate::error::AdminError;
use crate::forms::FormMode;
use crate::forms::auth::LoginPage;
use crate::forms::registration::RegistrationWizard;
use crate::models::{Location, Notification, Role, User, UserDraft};
use crate::screens::{Entity, LocationScreen, NotificationCenter, RoleScreen, UserScreen};
use crate::settings::SettingsPanel;
use crate::store::Record;
use crate::validation::FieldErrors;

/// Records to seed the dashboard with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub locations: Vec<Location>,
    pub notifications: Vec<Notification>,
}

/// A seeded record that would not pass its edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetIssue {
    pub kind: &'static str,
    pub id: i64,
    pub errors: FieldErrors,
}

impl fmt::Display for DatasetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:", self.kind, self.id)?;
        for (field, message) in self.errors.iter() {
            write!(f, " {field}: {message};")?;
        }
        Ok(())
    }
}

impl Dataset {
    /// Parse a YAML dataset.
    ///
    /// # Errors
    ///
    /// Returns `Yaml` if the document does not match the record shapes.
    pub fn from_yaml_str(s: &str) -> Result<Self, AdminError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Parse a JSON dataset.
    ///
    /// # Errors
    ///
    /// Returns `Json` if the document does not match the record shapes.
    pub fn from_json_str(s: &str) -> Result<Self, AdminError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a dataset in the given format.
    ///
    /// # Errors
    ///
    /// Returns the parse error of the format.
    pub fn parse(s: &str, format: DatasetFormat) -> Result<Self, AdminError> {
        match format {
            DatasetFormat::Yaml => Self::from_yaml_str(s),
            DatasetFormat::Json => Self::from_json_str(s),
        }
    }

    /// Check every editable record against its edit schema.
    ///
    /// Notifications have no form and are not checked.
    #[must_use]
    pub fn validate(&self) -> Vec<DatasetIssue> {
        let mut issues = Vec::new();
        collect_issues(&self.users, &mut issues);
        collect_issues(&self.roles, &mut issues);
        collect_issues(&self.locations, &mut issues);
        issues
    }
}

fn collect_issues<E: Entity>(records: &[E], issues: &mut Vec<DatasetIssue>) {
    for record in records {
        let id = record.id();
        if let Err(errors) = E::schema(FormMode::Edit(id)).validate(&record.draft()) {
            warn!(kind = E::KIND, %id, invalid = errors.len(), "Seeded record fails validation");
            issues.push(DatasetIssue {
                kind: E::KIND,
                id: id.into(),
                errors,
            });
        }
    }
}

/// Every screen of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct AdminState {
    pub users: UserScreen,
    pub roles: RoleScreen,
    pub locations: LocationScreen,
    pub notifications: NotificationCenter,
    pub settings: SettingsPanel,
    pub login: LoginPage,
    pub registration: RegistrationWizard,
}

impl AdminState {
    /// Seed the screens from a dataset.
    #[must_use]
    pub fn from_dataset(dataset: Dataset) -> Self {
        info!(
            users = dataset.users.len(),
            roles = dataset.roles.len(),
            locations = dataset.locations.len(),
            notifications = dataset.notifications.len(),
            "Dataset loaded"
        );
        Self {
            users: UserScreen::new(dataset.users),
            roles: RoleScreen::new(dataset.roles),
            locations: LocationScreen::new(dataset.locations),
            notifications: NotificationCenter::new(dataset.notifications),
            ..Self::default()
        }
    }

    /// Snapshot the current records.
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        Dataset {
            users: self.users.store().records().to_vec(),
            roles: self.roles.store().records().to_vec(),
            locations: self.locations.store().records().to_vec(),
            notifications: self.notifications.store().records().to_vec(),
        }
    }

    /// Create a user, resolving the role name from the role store.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the draft fails the create schema.
    pub fn create_user(&mut self, draft: UserDraft) -> Result<backoffice_core::UserId, AdminError> {
        self.users.create(draft, self.roles.store())
    }

    /// Update a user, resolving the role name from the role store.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `Validation`.
    pub fn update_user(
        &mut self,
        id: backoffice_core::UserId,
        draft: UserDraft,
    ) -> Result<&User, AdminError> {
        self.users.update(id, draft, self.roles.store())
    }

    /// Submit the open user form.
    ///
    /// # Errors
    ///
    /// Returns `NoOpenForm`, `NotFound` or `Validation`.
    pub fn submit_user_form(&mut self) -> Result<backoffice_core::UserId, AdminError> {
        self.users.submit(self.roles.store())
    }

    /// Recompute every role's user count from the user store.
    pub fn reconcile_role_counts(&mut self) {
        self.roles.reconcile_user_counts(self.users.store().records());
    }
}
