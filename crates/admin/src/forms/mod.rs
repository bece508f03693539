//! Form state and the validated forms that are not tied to a record store.
//!
//! A [`FormState`] walks `Pristine → Editing → {Valid, Invalid} → Submitting →
//! {Closed, Editing}`. Field edits re-run the schema for touched fields only,
//! so errors appear next to a field once the user has interacted with it.
//! Submitting touches every field and validates the whole form atomically.

pub mod auth;
pub mod registration;

use std::collections::BTreeSet;

use tracing::debug;

use crate::validation::{FieldErrors, FormValues, Schema};

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<I> {
    /// Empty form; submission appends a record.
    Create,
    /// Pre-filled form; submission replaces the record with this identifier.
    Edit(I),
}

impl<I> FormMode<I> {
    /// Whether this is an edit form.
    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }
}

/// Lifecycle phase of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Opened, nothing changed yet.
    Pristine,
    /// A field changed and the form has not been re-evaluated as a whole.
    Editing,
    /// Every field passes its rules.
    Valid,
    /// At least one field fails its rules.
    Invalid,
    /// Submission accepted; the owner is applying it.
    Submitting,
    /// Submission applied; the form should be dismissed.
    Closed,
}

/// Values, touched fields and errors of one open form.
#[derive(Debug, Clone)]
pub struct FormState<V, I = ()> {
    values: V,
    mode: FormMode<I>,
    schema: Schema,
    touched: BTreeSet<&'static str>,
    errors: FieldErrors,
    phase: FormPhase,
}

impl<V: FormValues + Clone, I: Copy> FormState<V, I> {
    /// Open a form with initial values.
    #[must_use]
    pub fn new(mode: FormMode<I>, values: V, schema: Schema) -> Self {
        Self {
            values,
            mode,
            schema,
            touched: BTreeSet::new(),
            errors: FieldErrors::default(),
            phase: FormPhase::Pristine,
        }
    }

    /// Current values.
    #[must_use]
    pub const fn values(&self) -> &V {
        &self.values
    }

    /// Create or edit.
    #[must_use]
    pub const fn mode(&self) -> FormMode<I> {
        self.mode
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Change a field's value and re-evaluate.
    pub fn change(&mut self, field: &'static str, apply: impl FnOnce(&mut V)) {
        self.phase = FormPhase::Editing;
        apply(&mut self.values);
        self.touched.insert(field);
        self.revalidate();
    }

    /// Mark a field as visited without changing it.
    pub fn blur(&mut self, field: &'static str) {
        self.touched.insert(field);
        self.revalidate();
    }

    /// Whether the user has interacted with `field`.
    #[must_use]
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Error to display next to `field`; untouched fields show nothing.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field)
    }

    /// Every error currently on display.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Whether the submit button is enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !matches!(self.phase, FormPhase::Submitting | FormPhase::Closed) && self.errors.is_empty()
    }

    /// Touch every field and validate the whole form.
    ///
    /// On success the form enters `Submitting` and a copy of the values is
    /// returned for the owner to apply.
    ///
    /// # Errors
    ///
    /// Returns every failing field; the form returns to `Editing` with all
    /// messages on display.
    pub fn submit(&mut self) -> Result<V, FieldErrors> {
        self.touched.extend(self.schema.field_names());
        match self.schema.validate(&self.values) {
            Ok(()) => {
                self.errors = FieldErrors::default();
                self.phase = FormPhase::Submitting;
                debug!("Form submitted");
                Ok(self.values.clone())
            }
            Err(errors) => {
                debug!(invalid = errors.len(), "Form submission rejected");
                self.errors = errors.clone();
                self.phase = FormPhase::Editing;
                Err(errors)
            }
        }
    }

    /// The owner applied the submission.
    pub fn complete(&mut self) {
        self.phase = FormPhase::Closed;
    }

    /// The owner could not apply the submission; show `errors` and keep editing.
    pub fn reject(&mut self, errors: &FieldErrors) {
        for (field, message) in errors.iter() {
            self.touched.insert(field);
            self.errors.set(field, Some(message));
        }
        self.phase = FormPhase::Editing;
    }

    /// The owner failed to apply the submission for a reason that is not tied
    /// to a field; keep the values and allow another attempt.
    pub fn resume(&mut self) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Editing;
        }
    }

    fn revalidate(&mut self) {
        for field in self.schema.field_names() {
            let message = if self.touched.contains(field) {
                self.schema.validate_field(&self.values, field)
            } else {
                None
            };
            self.errors.set(field, message);
        }
        self.phase = if self.schema.validate(&self.values).is_ok() {
            FormPhase::Valid
        } else {
            FormPhase::Invalid
        };
    }
}
