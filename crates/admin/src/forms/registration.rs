//! Three-step account registration.

use serde::Serialize;
use tracing::{debug, info};

use super::auth::phone_rules;
use super::{FormMode, FormState};
use crate::error::AdminError;
use crate::models::user::{CaseOrder, password_rules, username_rules};
use crate::validation::{FieldErrors, FieldRules, FieldValue, FormValues, Schema};

/// Wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    #[default]
    PersonalInfo,
    AccountDetails,
    ContactInfo,
}

impl Step {
    /// 1-based position.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::AccountDetails => 2,
            Self::ContactInfo => 3,
        }
    }

    /// Step indicator title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::AccountDetails => "Account Details",
            Self::ContactInfo => "Contact Info",
        }
    }

    const fn next(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => Some(Self::AccountDetails),
            Self::AccountDetails => Some(Self::ContactInfo),
            Self::ContactInfo => None,
        }
    }

    const fn previous(self) -> Option<Self> {
        match self {
            Self::PersonalInfo => None,
            Self::AccountDetails => Some(Self::PersonalInfo),
            Self::ContactInfo => Some(Self::AccountDetails),
        }
    }

    /// Rules for the fields collected on this step.
    #[must_use]
    pub fn schema(self) -> Schema {
        match self {
            Self::PersonalInfo => Schema::new()
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
                ),
            Self::AccountDetails => Schema::new()
                .field(username_rules())
                .field(password_rules(
                    "password",
                    "Password is required",
                    CaseOrder::UpperFirst,
                ))
                .field(
                    FieldRules::new("confirm_password")
                        .required("Please confirm your password")
                        .same_as("password", "Passwords must match"),
                )
                .field(
                    FieldRules::new("company")
                        .required("Company name is required")
                        .min_length(2, "Company name must be at least 2 characters"),
                ),
            Self::ContactInfo => Schema::new()
                .field(phone_rules("Phone number must be at least 10 digits"))
                .field(
                    FieldRules::new("address")
                        .required("Address is required")
                        .min_length(5, "Address must be at least 5 characters"),
                )
                .field(
                    FieldRules::new("city")
                        .required("City is required")
                        .min_length(2, "City must be at least 2 characters"),
                )
                .field(
                    FieldRules::new("country")
                        .required("Country is required")
                        .min_length(2, "Country must be at least 2 characters"),
                )
                .field(
                    FieldRules::new("agree_to_terms")
                        .is_true("You must agree to the terms and conditions"),
                ),
        }
    }
}

/// Everything collected across the three steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub company: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub agree_to_terms: bool,
}

impl FormValues for Registration {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "first_name" => FieldValue::Text(&self.first_name),
            "last_name" => FieldValue::Text(&self.last_name),
            "email" => FieldValue::Text(&self.email),
            "username" => FieldValue::Text(&self.username),
            "password" => FieldValue::Text(&self.password),
            "confirm_password" => FieldValue::Text(&self.confirm_password),
            "company" => FieldValue::Text(&self.company),
            "phone" => FieldValue::Text(&self.phone),
            "address" => FieldValue::Text(&self.address),
            "city" => FieldValue::Text(&self.city),
            "country" => FieldValue::Text(&self.country),
            "agree_to_terms" => FieldValue::Flag(self.agree_to_terms),
            _ => FieldValue::Absent,
        }
    }
}

/// Registration wizard state.
///
/// Values live in one [`Registration`] carried from step to step, so moving
/// back and forth never loses input. Each step gets a fresh form over its own
/// schema: fields on the current step show errors once touched, and fields
/// of other steps are never reported.
#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    step: Step,
    form: FormState<Registration>,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::at(Step::default(), Registration::default())
    }
}

impl RegistrationWizard {
    fn at(step: Step, values: Registration) -> Self {
        Self {
            step,
            form: FormState::new(FormMode::Create, values, step.schema()),
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Values entered so far.
    #[must_use]
    pub const fn values(&self) -> &Registration {
        self.form.values()
    }

    /// Form of the current step.
    #[must_use]
    pub const fn form(&self) -> &FormState<Registration> {
        &self.form
    }

    /// Error shown next to `field` on the current step.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.form.error(field)
    }

    /// Every error shown on the current step.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        self.form.errors()
    }

    /// Change a field on the current step and re-evaluate it.
    pub fn change(&mut self, field: &'static str, apply: impl FnOnce(&mut Registration)) {
        self.form.change(field, apply);
    }

    /// Mark a field on the current step as visited.
    pub fn blur(&mut self, field: &'static str) {
        self.form.blur(field);
    }

    /// Validate the current step and advance.
    ///
    /// On the last step this validates without moving; use [`submit`](Self::submit).
    ///
    /// # Errors
    ///
    /// Returns the current step's failing fields; the step does not change.
    pub fn next(&mut self) -> Result<Step, FieldErrors> {
        let values = self.form.submit()?;
        match self.step.next() {
            Some(next) => {
                debug!(from = self.step.number(), to = next.number(), "Registration step advanced");
                *self = Self::at(next, values);
            }
            None => self.form.resume(),
        }
        Ok(self.step)
    }

    /// Return to the previous step without validating.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            *self = Self::at(previous, self.form.values().clone());
        }
        self.step
    }

    /// Validate the final step and return the merged registration.
    ///
    /// # Errors
    ///
    /// Returns `RegistrationIncomplete` before the final step, without
    /// validating or moving. On the final step returns `Validation` with its
    /// failing fields.
    pub fn submit(&mut self) -> Result<Registration, AdminError> {
        if self.step != Step::ContactInfo {
            return Err(AdminError::RegistrationIncomplete {
                step: self.step.number(),
            });
        }
        let registration = self.form.submit()?;
        self.form.complete();
        info!("Registration completed");
        Ok(registration)
    }
}
