//! Simulated record deletion.

use backoffice_admin::AdminState;
use backoffice_admin::screens::{Entity, Screen};
use backoffice_admin::store::{Confirm, DeleteOutcome};
use backoffice_core::NotificationId;
use tracing::info;

fn report<R>(kind: &str, id: i64, outcome: &DeleteOutcome<R>) {
    match outcome {
        DeleteOutcome::Deleted(_) => info!(kind, id, "Deleted"),
        DeleteOutcome::Declined => info!(kind, id, "Nothing deleted"),
    }
}

fn from_screen<E: Entity>(
    screen: &mut Screen<E>,
    id: i64,
    confirm: &mut impl Confirm,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = screen.delete(E::Id::from(id), confirm)?;
    report(E::KIND, id, &outcome);
    info!(remaining = screen.store().len(), "{}", screen.table().summary);
    Ok(())
}

/// Delete a user.
///
/// # Errors
///
/// Returns an error if the user does not exist.
pub fn user(
    state: &mut AdminState,
    id: i64,
    confirm: &mut impl Confirm,
) -> Result<(), Box<dyn std::error::Error>> {
    from_screen(&mut state.users, id, confirm)
}

/// Delete a role. Roles with assigned users are refused before any prompt.
///
/// # Errors
///
/// Returns an error if the role does not exist or still has users.
pub fn role(
    state: &mut AdminState,
    id: i64,
    confirm: &mut impl Confirm,
) -> Result<(), Box<dyn std::error::Error>> {
    from_screen(&mut state.roles, id, confirm)
}

/// Delete a location.
///
/// # Errors
///
/// Returns an error if the location does not exist.
pub fn location(
    state: &mut AdminState,
    id: i64,
    confirm: &mut impl Confirm,
) -> Result<(), Box<dyn std::error::Error>> {
    from_screen(&mut state.locations, id, confirm)
}

/// Delete a notification.
///
/// # Errors
///
/// Returns an error if the notification does not exist.
pub fn notification(
    state: &mut AdminState,
    id: i64,
    confirm: &mut impl Confirm,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = state
        .notifications
        .delete(NotificationId::new(id), confirm)?;
    report("notification", id, &outcome);
    Ok(())
}
