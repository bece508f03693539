//! Integration tests for the record screens.
//!
//! These tests drive the user, role and location screens end to end from
//! the seed dataset: filtering, create/update/delete and row actions.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use chrono::Utc;

use backoffice_admin::AdminError;
use backoffice_admin::components::RowAction;
use backoffice_admin::filters::{LocationFilters, RoleFilters, Selector, UserFilters};
use backoffice_admin::models::{Location, RoleDraft, UserDraft};
use backoffice_admin::screens::{ActionOutcome, LocationScreen};
use backoffice_admin::store::{AutoConfirm, ConfirmWith, DeleteOutcome};
use backoffice_core::{
    LocationId, LocationKind, LocationStatus, RoleId, RoleStatus, UserId, UserStatus,
};
use backoffice_integration_tests::seeded_state;

fn location(id: i64, name: &str, kind: LocationKind, status: LocationStatus) -> Location {
    Location {
        id: LocationId::new(id),
        name: name.to_string(),
        kind,
        address: "1 Main Street".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62701".to_string(),
        country: "United States".to_string(),
        phone: "+1 (555) 000-0000".to_string(),
        email: "site@company.com".to_string(),
        manager: "Pat Lee".to_string(),
        employee_count: 3,
        status,
        created_at: Utc::now(),
    }
}

fn user_draft(username: &str, role: i64) -> UserDraft {
    UserDraft {
        username: username.to_string(),
        first_name: "Carol".to_string(),
        last_name: "Danvers".to_string(),
        email: "carol@example.com".to_string(),
        password: "Marvel123".to_string(),
        role_id: Some(RoleId::new(role)),
        status: UserStatus::Active,
    }
}

// =============================================================================
// Filter Tests
// =============================================================================

#[test]
fn test_location_status_filter_returns_only_hq() {
    let mut screen = LocationScreen::new(vec![
        location(1, "HQ", LocationKind::Office, LocationStatus::Active),
        location(2, "Warehouse A", LocationKind::Warehouse, LocationStatus::Inactive),
    ]);
    screen.set_filters(LocationFilters {
        name: String::new(),
        kind: Selector::All,
        status: Selector::Only(LocationStatus::Active),
    });

    let names: Vec<_> = screen.visible().iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["HQ"]);
    assert_eq!(screen.table().summary, "Showing 1 of 2 locations");
}

#[test]
fn test_empty_filter_returns_everything_in_order() {
    let state = seeded_state();
    let ids: Vec<_> = state.users.visible().iter().map(|u| u.id.as_i64()).collect();
    assert_eq!(ids, [1, 2, 3, 4]);
}

#[test]
fn test_filter_preserves_store_order() {
    let mut state = seeded_state();
    state.users.set_filters(UserFilters {
        name: "o".to_string(),
        email: String::new(),
        status: Selector::All,
    });
    let ids: Vec<_> = state.users.visible().iter().map(|u| u.id.as_i64()).collect();
    // johndoe, bobwilson, alicebrown all contain an "o"; janesmith does not.
    assert_eq!(ids, [1, 3, 4]);

    state.users.update_filters(|f| f.status = Selector::Only(UserStatus::Inactive));
    let ids: Vec<_> = state.users.visible().iter().map(|u| u.id.as_i64()).collect();
    assert_eq!(ids, [3]);
}

#[test]
fn test_role_name_filter_is_case_insensitive() {
    let mut state = seeded_state();
    state.roles.set_filters(RoleFilters {
        name: "ADMIN".to_string(),
        status: Selector::Only(RoleStatus::Active),
    });
    assert_eq!(state.roles.visible().len(), 1);
}

// =============================================================================
// Role Delete Tests
// =============================================================================

#[test]
fn test_guest_role_delete_removes_it() {
    let mut state = seeded_state();
    let outcome = state.roles.delete(RoleId::new(4), &mut AutoConfirm(true)).unwrap();

    assert!(matches!(outcome, DeleteOutcome::Deleted(ref r) if r.name == "Guest"));
    assert!(state.roles.store().get(RoleId::new(4)).is_none());
    assert_eq!(state.roles.store().len(), 3);
}

#[test]
fn test_administrator_role_delete_is_blocked() {
    let mut state = seeded_state();
    let before = state.roles.store().records().to_vec();
    let mut prompted = false;

    let err = state
        .roles
        .delete(
            RoleId::new(1),
            &mut ConfirmWith(|_: &str| {
                prompted = true;
                true
            }),
        )
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Cannot delete role \"Administrator\" because it has 2 user(s) assigned."
    );
    assert!(!prompted, "blocked deletes must not prompt");
    assert_eq!(state.roles.store().records(), before.as_slice());
}

#[test]
fn test_declined_delete_leaves_store_unchanged() {
    let mut state = seeded_state();
    let outcome = state
        .locations
        .handle(RowAction::Delete(LocationId::new(2)), &mut AutoConfirm(false))
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Declined);
    assert_eq!(state.locations.store().len(), 5);
}

// =============================================================================
// Create / Update Tests
// =============================================================================

#[test]
fn test_create_appends_exactly_one_record() {
    let mut state = seeded_state();
    let others = state.users.store().records().to_vec();

    let id = state.create_user(user_draft("cdanvers", 2)).unwrap();

    assert_eq!(id, UserId::new(5));
    assert_eq!(state.users.store().len(), 5);
    assert_eq!(&state.users.store().records()[..4], others.as_slice());

    let created = state.users.store().get(id).unwrap();
    assert_eq!(created.username, "cdanvers");
    assert_eq!(created.role_name, "Manager");
    assert_eq!(created.last_login, None);
}

#[test]
fn test_update_changes_only_the_target() {
    let mut state = seeded_state();
    let before = state.roles.store().records().to_vec();

    let updated = state
        .roles
        .update(
            RoleId::new(3),
            RoleDraft {
                name: "Member".to_string(),
                description: "Basic member with limited permissions".to_string(),
                permissions: vec!["users.view".to_string()],
                status: RoleStatus::Active,
            },
            &(),
        )
        .unwrap();
    assert_eq!(updated.name, "Member");
    assert_eq!(updated.user_count, 1);

    let after = state.roles.store().records();
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after) {
        if old.id != RoleId::new(3) {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn test_create_update_delete_round_trip() {
    let mut state = seeded_state();
    let before = state.users.store().records().to_vec();

    let id = state.create_user(user_draft("roundtrip", 3)).unwrap();
    state.update_user(id, user_draft("roundtrip", 3)).unwrap();
    state.users.delete(id, &mut AutoConfirm(true)).unwrap();

    assert_eq!(state.users.store().records(), before.as_slice());
}

#[test]
fn test_invalid_create_is_rejected_atomically() {
    let mut state = seeded_state();
    let mut draft = user_draft("ab", 1);
    draft.password = "weak".to_string();

    let err = state.create_user(draft).unwrap_err();
    let AdminError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        errors.get("username"),
        Some("Username must be at least 3 characters")
    );
    assert_eq!(
        errors.get("password"),
        Some("Password must be at least 8 characters")
    );
    assert_eq!(state.users.store().len(), 4);
}

#[test]
fn test_edit_form_flow_through_row_action() {
    let mut state = seeded_state();
    let outcome = state
        .users
        .handle(RowAction::Edit(UserId::new(3)), &mut AutoConfirm(false))
        .unwrap();
    assert_eq!(outcome, ActionOutcome::FormOpened);

    let form = state.users.editor_mut().unwrap();
    assert_eq!(form.values().username, "bobwilson");
    form.change("status", |v| v.status = UserStatus::Active);
    form.change("role_id", |v| v.role_id = Some(RoleId::new(3)));

    let id = state.submit_user_form().unwrap();
    assert_eq!(id, UserId::new(3));
    assert!(state.users.editor().is_none());

    let user = state.users.store().get(id).unwrap();
    assert_eq!(user.status, UserStatus::Active);
    assert_eq!(user.role_name, "User");
}

#[test]
fn test_role_counts_are_snapshots_until_reconciled() {
    let mut state = seeded_state();
    state.users.delete(UserId::new(4), &mut AutoConfirm(true)).unwrap();

    // The snapshot still says one user holds the "User" role.
    assert_eq!(state.roles.store().get(RoleId::new(3)).unwrap().user_count, 1);

    state.reconcile_role_counts();
    assert_eq!(state.roles.store().get(RoleId::new(3)).unwrap().user_count, 0);
    state.roles.delete(RoleId::new(3), &mut AutoConfirm(true)).unwrap();
    assert_eq!(state.roles.store().len(), 3);
}
