//! List screens.
//!
//! A [`Screen`] owns one record store, its filter state and at most one open
//! create/edit form. The Users, Roles and Locations screens share this
//! structure and differ only in their [`Entity`] implementation; the
//! notifications inbox has no form and lives in [`notifications`].

pub mod locations;
pub mod notifications;
pub mod roles;
pub mod users;

use std::fmt::Debug;

use tracing::{debug, info};

use crate::components::{RowAction, TableRow, TableView};
use crate::error::AdminError;
use crate::filters::{self, Criteria};
use crate::forms::{FormMode, FormState};
use crate::models::{Location, Role, User};
use crate::store::{Confirm, DeleteOutcome, Record, RecordStore};
use crate::validation::{FieldErrors, FormValues, Schema};

pub use notifications::NotificationCenter;

/// Users screen.
pub type UserScreen = Screen<User>;
/// Roles screen.
pub type RoleScreen = Screen<Role>;
/// Locations screen.
pub type LocationScreen = Screen<Location>;

/// A record type managed by a [`Screen`].
pub trait Entity: TableRow + Clone {
    /// Values of the create/edit form.
    type Draft: FormValues + Clone + Default + Debug;
    /// Filter state of the list.
    type Filters: Criteria<Self> + Clone + Default + Debug;
    /// Data from other stores needed to derive fields.
    type Context;

    /// Plural noun for result counts.
    const PLURAL: &'static str;

    /// Form schema for `mode`.
    fn schema(mode: FormMode<Self::Id>) -> Schema;

    /// Prefill values for the edit form.
    fn draft(&self) -> Self::Draft;

    /// Build a new record from validated values.
    ///
    /// # Errors
    ///
    /// Returns field errors for values that cannot be converted.
    fn build(id: Self::Id, draft: Self::Draft, ctx: &Self::Context) -> Result<Self, FieldErrors>;

    /// Merge validated values into this record.
    ///
    /// # Errors
    ///
    /// Returns field errors for values that cannot be converted.
    fn merge(&self, draft: Self::Draft, ctx: &Self::Context) -> Result<Self, FieldErrors>;

    /// Business rule checked before the delete confirmation is shown.
    ///
    /// # Errors
    ///
    /// Returns the rule violation; nothing is deleted.
    fn check_delete(&self) -> Result<(), AdminError> {
        Ok(())
    }
}

/// What a row action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome<R> {
    /// The edit form is open.
    FormOpened,
    /// The record was removed.
    Deleted(R),
    /// The user declined the confirmation.
    Declined,
    /// The notification is now read.
    MarkedRead,
    /// The action does not apply to this screen.
    Ignored,
}

impl<R> From<DeleteOutcome<R>> for ActionOutcome<R> {
    fn from(outcome: DeleteOutcome<R>) -> Self {
        match outcome {
            DeleteOutcome::Deleted(record) => Self::Deleted(record),
            DeleteOutcome::Declined => Self::Declined,
        }
    }
}

/// Store, filters and open form of one list screen.
#[derive(Debug, Clone)]
pub struct Screen<E: Entity> {
    store: RecordStore<E>,
    filters: E::Filters,
    editor: Option<FormState<E::Draft, E::Id>>,
}

impl<E: Entity> Default for Screen<E> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<E: Entity> Screen<E> {
    /// Create a screen over existing records.
    #[must_use]
    pub fn new(records: Vec<E>) -> Self {
        Self {
            store: RecordStore::from_records(records),
            filters: E::Filters::default(),
            editor: None,
        }
    }

    /// The full store.
    #[must_use]
    pub const fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    /// Current filter state.
    #[must_use]
    pub const fn filters(&self) -> &E::Filters {
        &self.filters
    }

    /// Replace the filter state.
    pub fn set_filters(&mut self, filters: E::Filters) {
        self.filters = filters;
    }

    /// Edit the filter state in place.
    pub fn update_filters(&mut self, edit: impl FnOnce(&mut E::Filters)) {
        edit(&mut self.filters);
    }

    /// Records passing the current filters, in store order.
    #[must_use]
    pub fn visible(&self) -> Vec<&E> {
        filters::apply(self.store.records(), &self.filters)
    }

    /// Table of the visible records.
    #[must_use]
    pub fn table(&self) -> TableView {
        TableView::build(&self.visible(), self.store.len(), E::PLURAL)
    }

    /// Open an empty create form.
    pub fn open_create(&mut self) {
        debug!(kind = E::KIND, "Create form opened");
        self.editor = Some(FormState::new(
            FormMode::Create,
            E::Draft::default(),
            E::schema(FormMode::Create),
        ));
    }

    /// Open an edit form pre-filled from the record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this identifier.
    pub fn open_edit(&mut self, id: E::Id) -> Result<(), AdminError> {
        let draft = self.store.require(id)?.draft();
        debug!(kind = E::KIND, %id, "Edit form opened");
        self.editor = Some(FormState::new(
            FormMode::Edit(id),
            draft,
            E::schema(FormMode::Edit(id)),
        ));
        Ok(())
    }

    /// The open form, if any.
    #[must_use]
    pub const fn editor(&self) -> Option<&FormState<E::Draft, E::Id>> {
        self.editor.as_ref()
    }

    /// The open form, for field edits.
    pub const fn editor_mut(&mut self) -> Option<&mut FormState<E::Draft, E::Id>> {
        self.editor.as_mut()
    }

    /// Dismiss the open form without saving.
    pub fn cancel(&mut self) {
        if self.editor.take().is_some() {
            debug!(kind = E::KIND, "Form cancelled");
        }
    }

    /// Validate `draft` and append a new record.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the draft fails the create schema; the store is
    /// unchanged.
    pub fn create(&mut self, draft: E::Draft, ctx: &E::Context) -> Result<E::Id, AdminError> {
        E::schema(FormMode::Create).validate(&draft)?;
        Ok(self.store.try_insert_with(|id| E::build(id, draft, ctx))?)
    }

    /// Validate `draft` and replace the record matching `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown identifier and `Validation` if the
    /// draft fails the edit schema; the store is unchanged in both cases.
    pub fn update(
        &mut self,
        id: E::Id,
        draft: E::Draft,
        ctx: &E::Context,
    ) -> Result<&E, AdminError> {
        E::schema(FormMode::Edit(id)).validate(&draft)?;
        let next = self.store.require(id)?.merge(draft, ctx)?;
        self.store.replace_with(id, |_| next)
    }

    /// Delete a record after the entity's rule passes and the user confirms.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown identifier or the entity's rule
    /// violation. Neither prompts for confirmation.
    ///
    /// An edit form open on the deleted record is dismissed with it.
    pub fn delete(
        &mut self,
        id: E::Id,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome<E>, AdminError> {
        self.store.require(id)?.check_delete()?;

        let prompt = format!("Are you sure you want to delete this {}?", E::KIND);
        if !confirm.confirm(&prompt) {
            info!(kind = E::KIND, %id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }
        let removed = self.store.remove(id)?;
        if self.editor.as_ref().is_some_and(|f| f.mode() == FormMode::Edit(id)) {
            debug!(kind = E::KIND, %id, "Edit form closed with its record");
            self.editor = None;
        }
        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Submit the open form and apply it to the store.
    ///
    /// On success the form closes. On failure the form stays open and can be
    /// submitted again; validation failures put every message on display.
    ///
    /// # Errors
    ///
    /// Returns `NoOpenForm` if no form is open, otherwise the error of the
    /// create or update.
    pub fn submit(&mut self, ctx: &E::Context) -> Result<E::Id, AdminError> {
        let form = self.editor.as_mut().ok_or(AdminError::NoOpenForm)?;
        let draft = form.submit()?;
        let mode = form.mode();

        let result = match mode {
            FormMode::Create => self.create(draft, ctx),
            FormMode::Edit(id) => self.update(id, draft, ctx).map(|record| record.id()),
        };

        match &result {
            Ok(_) => {
                if let Some(mut form) = self.editor.take() {
                    form.complete();
                }
            }
            Err(AdminError::Validation(errors)) => {
                if let Some(form) = self.editor.as_mut() {
                    form.reject(errors);
                }
            }
            Err(_) => {
                if let Some(form) = self.editor.as_mut() {
                    form.resume();
                }
            }
        }
        result
    }

    /// Dispatch a table row action.
    ///
    /// # Errors
    ///
    /// Returns the error of the opened form or the delete.
    pub fn handle(
        &mut self,
        action: RowAction<E::Id>,
        confirm: &mut impl Confirm,
    ) -> Result<ActionOutcome<E>, AdminError> {
        match action {
            RowAction::Edit(id) => {
                self.open_edit(id)?;
                Ok(ActionOutcome::FormOpened)
            }
            RowAction::Delete(id) => self.delete(id, confirm).map(ActionOutcome::from),
            RowAction::MarkRead(_) => Ok(ActionOutcome::Ignored),
        }
    }
}
