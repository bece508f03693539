//! Integration tests for the standalone forms.
//!
//! These tests cover the login toggle, password reset, registration wizard
//! and settings panel as a user would walk through them.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use backoffice_admin::AdminError;
use backoffice_admin::forms::FormPhase;
use backoffice_admin::forms::auth::{Credentials, ForgotPassword, LoginMethod};
use backoffice_admin::forms::registration::Step;
use backoffice_admin::settings::{GeneralSettings, SectionTab, SecuritySettings};
use backoffice_integration_tests::seeded_state;

// =============================================================================
// Login Tests
// =============================================================================

#[test]
fn test_login_with_username_after_toggle() {
    let mut state = seeded_state();
    state.login.toggle_method();
    assert_eq!(state.login.method(), LoginMethod::Username);

    let form = state.login.username_form();
    form.change("username", |v| v.username = "john.doe".to_string());
    assert_eq!(
        form.error("username"),
        Some("Username can only contain letters, numbers, and underscores")
    );

    form.change("username", |v| v.username = "johndoe".to_string());
    form.change("password", |v| v.password = "hunter22".to_string());
    let creds = state.login.submit().unwrap();
    assert!(matches!(creds, Credentials::Username(ref l) if l.username == "johndoe"));
}

#[test]
fn test_forgot_password_redirect_delay() {
    let request = ForgotPassword {
        email: "john.doe@example.com".to_string(),
    };
    let done = request.request(Duration::from_secs(3)).unwrap();
    assert_eq!(done.email, "john.doe@example.com");
    assert_eq!(done.redirect_after, Duration::from_secs(3));
}

// =============================================================================
// Registration Tests
// =============================================================================

#[test]
fn test_registration_walkthrough() {
    let mut state = seeded_state();
    let wizard = &mut state.registration;

    assert!(wizard.next().is_err());
    wizard.change("first_name", |r| r.first_name = "Grace".to_string());
    wizard.change("last_name", |r| r.last_name = "Hopper".to_string());
    wizard.change("email", |r| r.email = "grace@navy.mil".to_string());
    assert!(matches!(
        wizard.submit(),
        Err(AdminError::RegistrationIncomplete { step: 1 })
    ));
    assert_eq!(wizard.next().unwrap(), Step::AccountDetails);

    wizard.change("username", |r| r.username = "ghopper".to_string());
    wizard.change("password", |r| r.password = "cobol1959".to_string());
    assert_eq!(
        wizard.error("password"),
        Some("Password must contain at least one uppercase letter")
    );
    wizard.change("password", |r| r.password = "Cobol1959".to_string());
    wizard.change("confirm_password", |r| r.confirm_password = "Cobol1959".to_string());
    wizard.change("company", |r| r.company = "US Navy".to_string());
    assert_eq!(wizard.next().unwrap(), Step::ContactInfo);

    // Going back does not lose anything.
    assert_eq!(wizard.back(), Step::AccountDetails);
    assert_eq!(wizard.next().unwrap(), Step::ContactInfo);

    wizard.change("phone", |r| r.phone = "+1 202 555 0100".to_string());
    wizard.change("address", |r| r.address = "The Pentagon".to_string());
    wizard.change("city", |r| r.city = "Arlington".to_string());
    wizard.change("country", |r| r.country = "USA".to_string());
    wizard.change("agree_to_terms", |r| r.agree_to_terms = true);
    let registration = wizard.submit().unwrap();
    assert_eq!(registration.username, "ghopper");
    assert_eq!(registration.first_name, "Grace");
}

// =============================================================================
// Settings Tests
// =============================================================================

#[test]
fn test_settings_section_save() {
    let mut state = seeded_state();
    state.settings.select(SectionTab::Security);
    assert_eq!(state.settings.tab(), SectionTab::Security);

    let mut form = state.settings.edit::<SecuritySettings>();
    form.change("session_timeout", |v| v.session_timeout = 2);
    assert_eq!(
        form.error("session_timeout"),
        Some("Session timeout must be at least 5 minutes")
    );

    let err = state.settings.submit(&mut form).unwrap_err();
    assert!(matches!(err, AdminError::Validation(_)));
    assert_eq!(state.settings.get::<SecuritySettings>().session_timeout, 30);

    form.change("session_timeout", |v| v.session_timeout = 60);
    let saved = state.settings.submit(&mut form).unwrap();
    assert_eq!(saved, "Security settings saved successfully!");
    assert_eq!(form.phase(), FormPhase::Closed);
    assert_eq!(state.settings.get::<SecuritySettings>().session_timeout, 60);
}

#[test]
fn test_settings_invalid_url_keeps_saved_values() {
    let mut state = seeded_state();
    let err = state
        .settings
        .save(GeneralSettings {
            site_url: "not a url".to_string(),
            ..GeneralSettings::default()
        })
        .unwrap_err();
    let AdminError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(errors.get("site_url"), Some("Must be a valid URL"));
    assert_eq!(
        state.settings.get::<GeneralSettings>().site_url,
        "https://admin.example.com"
    );
}
