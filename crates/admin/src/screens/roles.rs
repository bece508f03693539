//! Roles screen.

use std::collections::HashMap;

use backoffice_core::RoleId;
use chrono::Utc;
use tracing::{info, warn};

use super::{Entity, RoleScreen};
use crate::error::AdminError;
use crate::filters::RoleFilters;
use crate::forms::FormMode;
use crate::models::{Role, RoleDraft, User, role};
use crate::validation::{FieldErrors, Schema};

impl Entity for Role {
    type Draft = RoleDraft;
    type Filters = RoleFilters;
    type Context = ();

    const PLURAL: &'static str = "roles";

    fn schema(mode: FormMode<RoleId>) -> Schema {
        role::schema(mode)
    }

    fn draft(&self) -> RoleDraft {
        self.to_draft()
    }

    fn build(id: RoleId, draft: RoleDraft, _: &()) -> Result<Self, FieldErrors> {
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            permissions: draft.permissions,
            user_count: 0,
            status: draft.status,
            created_at: Utc::now(),
        })
    }

    fn merge(&self, draft: RoleDraft, _: &()) -> Result<Self, FieldErrors> {
        Ok(Self {
            name: draft.name,
            description: draft.description,
            permissions: draft.permissions,
            status: draft.status,
            ..self.clone()
        })
    }

    fn check_delete(&self) -> Result<(), AdminError> {
        if self.user_count > 0 {
            warn!(
                role_id = %self.id,
                user_count = self.user_count,
                "Delete blocked: role has users assigned"
            );
            return Err(AdminError::RoleInUse {
                name: self.name.clone(),
                user_count: self.user_count,
            });
        }
        Ok(())
    }
}

impl RoleScreen {
    /// Roles a user can be assigned to, in store order.
    #[must_use]
    pub fn assignable(&self) -> Vec<&Role> {
        self.store
            .records()
            .iter()
            .filter(|r| r.is_assignable())
            .collect()
    }

    /// Recount `user_count` of every role from `users`.
    ///
    /// Counts are snapshots and are not refreshed by user edits; call this to
    /// bring them back in line before relying on the delete guard.
    pub fn reconcile_user_counts(&mut self, users: &[User]) {
        let mut counts: HashMap<RoleId, u32> = HashMap::new();
        for user in users {
            *counts.entry(user.role_id).or_default() += 1;
        }
        self.store
            .update_all(|role| role.user_count = counts.get(&role.id).copied().unwrap_or(0));
        info!(roles = self.store.len(), users = users.len(), "User counts reconciled");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{AutoConfirm, ConfirmWith, Confirm};
    use backoffice_core::{Email, RoleStatus, UserId, UserStatus};

    fn role(id: i64, name: &str, user_count: u32) -> Role {
        Role {
            id: RoleId::new(id),
            name: name.to_string(),
            description: "Role used in tests".to_string(),
            permissions: vec!["users.view".to_string()],
            user_count,
            status: RoleStatus::Active,
            created_at: Utc::now(),
        }
    }

    fn screen() -> RoleScreen {
        RoleScreen::new(vec![
            role(1, "Administrator", 2),
            role(2, "Editor", 1),
            role(4, "Guest", 0),
        ])
    }

    fn user(id: i64, role: i64) -> User {
        User {
            id: UserId::new(id),
            username: format!("user{id}"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: Email::parse("user@example.com").unwrap(),
            role_id: RoleId::new(role),
            role_name: String::new(),
            status: UserStatus::Active,
            last_login: None,
        }
    }

    struct Panic;

    impl Confirm for Panic {
        fn confirm(&mut self, prompt: &str) -> bool {
            panic!("unexpected prompt: {prompt}");
        }
    }

    #[test]
    fn test_role_in_use_is_blocked_before_prompt() {
        let mut screen = screen();
        let err = screen.delete(RoleId::new(1), &mut Panic).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot delete role \"Administrator\" because it has 2 user(s) assigned."
        );
        assert_eq!(screen.store().len(), 3);
    }

    #[test]
    fn test_unused_role_deletes_after_confirmation() {
        let mut screen = screen();
        let mut asked = 0;
        let outcome = screen
            .delete(
                RoleId::new(4),
                &mut ConfirmWith(|_: &str| {
                    asked += 1;
                    true
                }),
            )
            .unwrap();
        assert!(outcome.is_deleted());
        assert_eq!(asked, 1);
        let names: Vec<_> = screen.store().records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Administrator", "Editor"]);
    }

    #[test]
    fn test_create_starts_with_zero_users() {
        let mut screen = screen();
        let id = screen
            .create(
                RoleDraft {
                    name: "Auditor".to_string(),
                    description: "Read-only compliance access".to_string(),
                    permissions: vec!["users.view".to_string()],
                    status: RoleStatus::Active,
                },
                &(),
            )
            .unwrap();
        assert_eq!(id, RoleId::new(5));
        assert_eq!(screen.store().get(id).unwrap().user_count, 0);
        assert!(screen.delete(id, &mut AutoConfirm(true)).unwrap().is_deleted());
    }

    #[test]
    fn test_update_keeps_snapshot_fields() {
        let mut screen = screen();
        let before = screen.store().get(RoleId::new(2)).unwrap().clone();
        let mut draft = before.to_draft();
        draft.permissions.push("users.edit".to_string());

        let after = screen.update(RoleId::new(2), draft, &()).unwrap();
        assert_eq!(after.user_count, before.user_count);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.permissions.len(), 2);
    }

    #[test]
    fn test_reconcile_user_counts() {
        let mut screen = screen();
        screen.reconcile_user_counts(&[user(1, 2), user(2, 2), user(3, 4)]);
        let counts: Vec<_> = screen.store().records().iter().map(|r| r.user_count).collect();
        assert_eq!(counts, vec![0, 2, 1]);

        assert!(screen.delete(RoleId::new(1), &mut AutoConfirm(true)).unwrap().is_deleted());
    }

    #[test]
    fn test_assignable_skips_inactive() {
        let mut inactive = role(9, "Legacy", 0);
        inactive.status = RoleStatus::Inactive;
        let screen = RoleScreen::new(vec![role(1, "Administrator", 0), inactive]);
        let names: Vec<_> = screen.assignable().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Administrator"]);
    }
}
