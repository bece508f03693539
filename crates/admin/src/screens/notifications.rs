//! Notifications inbox.

use backoffice_core::NotificationId;
use tracing::info;

use super::ActionOutcome;
use crate::components::{RowAction, TableView};
use crate::error::AdminError;
use crate::filters::{self, NotificationFilters};
use crate::models::Notification;
use crate::store::{Confirm, DeleteOutcome, RecordStore};

/// Notification list with read-state tracking. Notifications are never
/// created from the dashboard.
#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    store: RecordStore<Notification>,
    filters: NotificationFilters,
}

impl NotificationCenter {
    /// Create an inbox over existing notifications.
    #[must_use]
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self {
            store: RecordStore::from_records(notifications),
            filters: NotificationFilters::default(),
        }
    }

    /// The full store.
    #[must_use]
    pub const fn store(&self) -> &RecordStore<Notification> {
        &self.store
    }

    /// Current filter state.
    #[must_use]
    pub const fn filters(&self) -> &NotificationFilters {
        &self.filters
    }

    /// Replace the filter state.
    pub fn set_filters(&mut self, filters: NotificationFilters) {
        self.filters = filters;
    }

    /// Notifications passing the current filters.
    #[must_use]
    pub fn visible(&self) -> Vec<&Notification> {
        filters::apply(self.store.records(), &self.filters)
    }

    /// Table of the visible notifications.
    #[must_use]
    pub fn table(&self) -> TableView {
        TableView::build(&self.visible(), self.store.len(), "notifications")
    }

    /// Number of unread notifications, ignoring filters.
    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.store.records().iter().filter(|n| n.is_unread()).count()
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no notification has this identifier.
    pub fn mark_read(&mut self, id: NotificationId) -> Result<(), AdminError> {
        self.store.replace_with(id, |n| Notification {
            is_read: true,
            ..n.clone()
        })?;
        Ok(())
    }

    /// Mark every notification as read, returning how many changed.
    pub fn mark_all_read(&mut self) -> usize {
        let unread = self.unread_count();
        self.store.update_all(|n| n.is_read = true);
        info!(marked = unread, "All notifications marked as read");
        unread
    }

    /// Delete one notification after confirmation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no notification has this identifier.
    pub fn delete(
        &mut self,
        id: NotificationId,
        confirm: &mut impl Confirm,
    ) -> Result<DeleteOutcome<Notification>, AdminError> {
        self.store.require(id)?;
        if !confirm.confirm("Are you sure you want to delete this notification?") {
            info!(%id, "Notification delete declined");
            return Ok(DeleteOutcome::Declined);
        }
        self.store.remove(id).map(DeleteOutcome::Deleted)
    }

    /// Delete every notification after confirmation, returning how many were
    /// removed. Declining (or an empty inbox) removes nothing.
    pub fn delete_all(&mut self, confirm: &mut impl Confirm) -> usize {
        if self.store.is_empty() {
            return 0;
        }
        if !confirm.confirm("Are you sure you want to delete all notifications?") {
            info!("Delete all notifications declined");
            return 0;
        }
        let removed = self.store.len();
        self.store.clear();
        removed
    }

    /// Dispatch a card action.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the notification no longer exists.
    pub fn handle(
        &mut self,
        action: RowAction<NotificationId>,
        confirm: &mut impl Confirm,
    ) -> Result<ActionOutcome<Notification>, AdminError> {
        match action {
            RowAction::MarkRead(id) => {
                self.mark_read(id)?;
                Ok(ActionOutcome::MarkedRead)
            }
            RowAction::Delete(id) => self.delete(id, confirm).map(ActionOutcome::from),
            RowAction::Edit(_) => Ok(ActionOutcome::Ignored),
        }
    }
}
