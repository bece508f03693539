//! Users screen.

use backoffice_core::{Email, RoleId, UserId};

use super::Entity;
use crate::filters::UserFilters;
use crate::forms::FormMode;
use crate::models::{Role, User, UserDraft, user};
use crate::store::RecordStore;
use crate::validation::{FieldErrors, Schema};

impl Entity for User {
    type Draft = UserDraft;
    type Filters = UserFilters;
    type Context = RecordStore<Role>;

    const PLURAL: &'static str = "users";

    fn schema(mode: FormMode<UserId>) -> Schema {
        user::schema(mode)
    }

    fn draft(&self) -> UserDraft {
        self.to_draft()
    }

    fn build(id: UserId, draft: UserDraft, roles: &RecordStore<Role>) -> Result<Self, FieldErrors> {
        let (email, role_id) = converted(&draft)?;
        Ok(Self {
            id,
            username: draft.username,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email,
            role_id,
            role_name: role_name(roles, role_id),
            status: draft.status,
            last_login: None,
        })
    }

    fn merge(&self, draft: UserDraft, roles: &RecordStore<Role>) -> Result<Self, FieldErrors> {
        let (email, role_id) = converted(&draft)?;
        Ok(Self {
            id: self.id,
            username: self.username.clone(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email,
            role_id,
            role_name: role_name(roles, role_id),
            status: draft.status,
            last_login: self.last_login,
        })
    }
}

fn converted(draft: &UserDraft) -> Result<(Email, RoleId), FieldErrors> {
    let email = Email::parse(&draft.email)
        .map_err(|_| FieldErrors::single("email", "Invalid email address"))?;
    let role_id = draft
        .role_id
        .ok_or_else(|| FieldErrors::single("role_id", "Role is required"))?;
    Ok((email, role_id))
}

/// Display name of the role, or empty if it no longer exists.
fn role_name(roles: &RecordStore<Role>, id: RoleId) -> String {
    roles.get(id).map(|r| r.name.clone()).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::components::RowAction;
    use crate::error::AdminError;
    use crate::filters::Selector;
    use crate::forms::FormPhase;
    use crate::screens::{ActionOutcome, UserScreen};
    use crate::store::{AutoConfirm, ConfirmWith, DeleteOutcome};
    use backoffice_core::{RoleStatus, UserStatus};
    use chrono::Utc;

    fn roles() -> RecordStore<Role> {
        let role = |id, name: &str| Role {
            id: RoleId::new(id),
            name: name.to_string(),
            description: "Seeded for tests".to_string(),
            permissions: vec!["users.view".to_string()],
            user_count: 1,
            status: RoleStatus::Active,
            created_at: Utc::now(),
        };
        RecordStore::from_records(vec![role(1, "Administrator"), role(2, "Editor")])
    }

    fn screen() -> UserScreen {
        let mut screen = UserScreen::default();
        screen.create(draft("johndoe", 1), &roles()).unwrap();
        screen.create(draft("janesmith", 2), &roles()).unwrap();
        screen
    }

    fn draft(username: &str, role: i64) -> UserDraft {
        UserDraft {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: "Person".to_string(),
            email: format!("{username}@example.com"),
            password: "Passw0rdX".to_string(),
            role_id: Some(RoleId::new(role)),
            status: UserStatus::Active,
        }
    }

    #[test]
    fn test_create_derives_role_name_and_login() {
        let screen = screen();
        let user = screen.store().get(UserId::new(2)).unwrap();
        assert_eq!(user.role_name, "Editor");
        assert_eq!(user.last_login, None);
        assert_eq!(user.email.as_str(), "janesmith@example.com");
    }

    #[test]
    fn test_create_with_missing_role_leaves_name_empty() {
        let mut screen = UserScreen::default();
        let id = screen.create(draft("ghost", 99), &roles()).unwrap();
        assert_eq!(screen.store().get(id).unwrap().role_name, "");
    }

    #[test]
    fn test_invalid_create_leaves_store_untouched() {
        let mut screen = screen();
        let mut bad = draft("x", 1);
        bad.password = "short".to_string();
        let err = screen.create(bad, &roles()).unwrap_err();
        let AdminError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.get("username").is_some());
        assert!(errors.get("password").is_some());
        assert_eq!(screen.store().len(), 2);
    }

    #[test]
    fn test_update_keeps_username_and_recomputes_role() {
        let mut screen = screen();
        let mut edit = draft("renamed", 2);
        edit.password.clear();
        edit.first_name = "Johnny".to_string();

        let user = screen.update(UserId::new(1), edit, &roles()).unwrap();
        assert_eq!(user.username, "johndoe");
        assert_eq!(user.first_name, "Johnny");
        assert_eq!(user.role_name, "Editor");
        assert_eq!(screen.store().records()[1].username, "janesmith");
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let mut screen = screen();
        let err = screen
            .update(UserId::new(42), draft("nobody", 1), &roles())
            .unwrap_err();
        assert!(matches!(err, AdminError::NotFound { kind: "user", .. }));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut screen = screen();
        let mut prompts = Vec::new();
        let outcome = screen
            .delete(
                UserId::new(1),
                &mut ConfirmWith(|p: &str| {
                    prompts.push(p.to_string());
                    false
                }),
            )
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Declined);
        assert_eq!(prompts, vec!["Are you sure you want to delete this user?"]);
        assert_eq!(screen.store().len(), 2);

        let outcome = screen.delete(UserId::new(1), &mut AutoConfirm(true)).unwrap();
        assert!(outcome.is_deleted());
        assert_eq!(screen.store().len(), 1);
    }

    #[test]
    fn test_form_round_trip() {
        let mut screen = screen();
        screen.open_create();
        let form = screen.editor_mut().unwrap();
        form.change("username", |v| v.username = "new_user".to_string());
        assert_eq!(form.error("first_name"), None);

        let err = screen.submit(&roles()).unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        let form = screen.editor().unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.error("role_id"), Some("Role is required"));

        let form = screen.editor_mut().unwrap();
        let filled = draft("new_user", 1);
        form.change("first_name", |v| *v = filled);
        let id = screen.submit(&roles()).unwrap();
        assert!(screen.editor().is_none());
        assert_eq!(screen.store().get(id).unwrap().username, "new_user");
    }

    #[test]
    fn test_deleting_edited_record_closes_its_form() {
        let mut screen = screen();
        screen.open_edit(UserId::new(1)).unwrap();
        screen.delete(UserId::new(1), &mut AutoConfirm(true)).unwrap();

        assert!(screen.editor().is_none());
        assert!(matches!(
            screen.submit(&roles()),
            Err(AdminError::NoOpenForm)
        ));
    }

    #[test]
    fn test_deleting_other_record_keeps_form() {
        let mut screen = screen();
        screen.open_edit(UserId::new(1)).unwrap();
        screen.delete(UserId::new(2), &mut AutoConfirm(true)).unwrap();
        assert_eq!(screen.editor().unwrap().values().username, "johndoe");
    }

    #[test]
    fn test_failed_apply_leaves_form_submittable() {
        let mut screen = screen();
        screen.open_edit(UserId::new(1)).unwrap();
        screen.store.remove(UserId::new(1)).unwrap();

        let err = screen.submit(&roles()).unwrap_err();
        assert!(matches!(err, AdminError::NotFound { kind: "user", .. }));

        let form = screen.editor().unwrap();
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.can_submit());
    }

    #[test]
    fn test_submit_without_form() {
        let mut screen = screen();
        assert!(matches!(
            screen.submit(&roles()),
            Err(AdminError::NoOpenForm)
        ));
    }

    #[test]
    fn test_row_actions() {
        let mut screen = screen();
        let outcome = screen
            .handle(RowAction::Edit(UserId::new(2)), &mut AutoConfirm(false))
            .unwrap();
        assert_eq!(outcome, ActionOutcome::FormOpened);
        assert_eq!(
            screen.editor().unwrap().values().username,
            "janesmith"
        );
        assert!(screen.editor().unwrap().values().password.is_empty());

        screen.cancel();
        assert!(screen.editor().is_none());

        let outcome = screen
            .handle(RowAction::Delete(UserId::new(2)), &mut AutoConfirm(true))
            .unwrap();
        assert!(matches!(outcome, ActionOutcome::Deleted(u) if u.username == "janesmith"));
    }

    #[test]
    fn test_filtered_table() {
        let mut screen = screen();
        screen.update_filters(|f| {
            f.name = "JANE".to_string();
            f.status = Selector::Only(UserStatus::Active);
        });
        let table = screen.table();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.summary, "Showing 1 of 2 users");

        screen.update_filters(|f| f.status = Selector::Only(UserStatus::Suspended));
        assert!(screen.table().is_empty());
    }
}
