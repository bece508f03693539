//! Notification inbox actions.

use backoffice_admin::AdminState;
use backoffice_admin::store::Confirm;
use backoffice_core::NotificationId;
use tracing::info;

/// Mark one notification as read.
///
/// # Errors
///
/// Returns an error if the notification does not exist.
pub fn mark_read(state: &mut AdminState, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    state.notifications.mark_read(NotificationId::new(id))?;
    info!(id, unread = state.notifications.unread_count(), "Notification marked as read");
    Ok(())
}

/// Mark every notification as read.
pub fn mark_all_read(state: &mut AdminState) {
    state.notifications.mark_all_read();
}

/// Delete every notification after confirmation.
pub fn clear(state: &mut AdminState, confirm: &mut impl Confirm) {
    let removed = state.notifications.delete_all(confirm);
    info!(removed, "Inbox cleared");
}
