//! Configuration panel.
//!
//! Four independent sections, each edited through its own form and saved
//! atomically: a section is only replaced once its values pass the section's
//! schema.

use std::fmt;

use backoffice_core::{BackupFrequency, LogLevel, SmtpEncryption};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::error::AdminError;
use crate::forms::{FormMode, FormState};
use crate::validation::{FieldRules, FieldValue, FormValues, Schema};

/// A settings section.
pub trait Section: FormValues + Clone + Sized {
    /// Section key, used in logs.
    const NAME: &'static str;

    /// Confirmation shown after a successful save.
    const SAVED: &'static str;

    /// Validation schema of the section form.
    fn schema() -> Schema;

    /// The section's slot in the panel.
    fn slot(panel: &SettingsPanel) -> &Self;

    /// The section's slot in the panel, for replacement.
    fn slot_mut(panel: &mut SettingsPanel) -> &mut Self;
}

/// Site identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSettings {
    pub site_name: String,
    pub site_url: String,
    pub admin_email: String,
    pub timezone: String,
    pub language: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            site_name: "Admin Dashboard".to_string(),
            site_url: "https://admin.example.com".to_string(),
            admin_email: "admin@example.com".to_string(),
            timezone: "America/New_York".to_string(),
            language: "en".to_string(),
        }
    }
}

impl FormValues for GeneralSettings {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "site_name" => FieldValue::Text(&self.site_name),
            "site_url" => FieldValue::Text(&self.site_url),
            "admin_email" => FieldValue::Text(&self.admin_email),
            "timezone" => FieldValue::Text(&self.timezone),
            "language" => FieldValue::Text(&self.language),
            _ => FieldValue::Absent,
        }
    }
}

impl Section for GeneralSettings {
    const NAME: &'static str = "general";
    const SAVED: &'static str = "General settings saved successfully!";

    fn schema() -> Schema {
        Schema::new()
            .field(
                FieldRules::new("site_name")
                    .required("Site name is required")
                    .min_length(3, "Site name must be at least 3 characters")
                    .max_length(100, "Site name must be at most 100 characters"),
            )
            .field(
                FieldRules::new("site_url")
                    .required("Site URL is required")
                    .url("Must be a valid URL"),
            )
            .field(
                FieldRules::new("admin_email")
                    .required("Admin email is required")
                    .email("Invalid email address"),
            )
            .field(FieldRules::new("timezone").required("Timezone is required"))
            .field(FieldRules::new("language").required("Language is required"))
    }

    fn slot(panel: &SettingsPanel) -> &Self {
        &panel.general
    }

    fn slot_mut(panel: &mut SettingsPanel) -> &mut Self {
        &mut panel.general
    }
}

/// Outgoing mail server.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u32,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub smtp_encryption: SmtpEncryption,
    pub from_email: String,
    pub from_name: String,
}

impl fmt::Debug for EmailSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailSettings")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("smtp_encryption", &self.smtp_encryption)
            .field("from_email", &self.from_email)
            .field("from_name", &self.from_name)
            .finish()
    }
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            smtp_username: "noreply@example.com".to_string(),
            smtp_password: SecretString::from(String::new()),
            smtp_encryption: SmtpEncryption::Tls,
            from_email: "noreply@example.com".to_string(),
            from_name: "Admin Dashboard".to_string(),
        }
    }
}

impl FormValues for EmailSettings {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "smtp_host" => FieldValue::Text(&self.smtp_host),
            "smtp_port" => FieldValue::Number(i64::from(self.smtp_port)),
            "smtp_username" => FieldValue::Text(&self.smtp_username),
            "smtp_password" => FieldValue::Text(self.smtp_password.expose_secret()),
            "smtp_encryption" => FieldValue::Text(self.smtp_encryption.as_str()),
            "from_email" => FieldValue::Text(&self.from_email),
            "from_name" => FieldValue::Text(&self.from_name),
            _ => FieldValue::Absent,
        }
    }
}

impl Section for EmailSettings {
    const NAME: &'static str = "email";
    const SAVED: &'static str = "Email settings saved successfully!";

    fn schema() -> Schema {
        Schema::new()
            .field(FieldRules::new("smtp_host").required("SMTP host is required"))
            .field(
                FieldRules::new("smtp_port")
                    .at_least(1, "Port must be at least 1")
                    .at_most(65535, "Port must be at most 65535"),
            )
            .field(FieldRules::new("smtp_username").required("SMTP username is required"))
            .field(FieldRules::new("smtp_password").required("SMTP password is required"))
            .field(
                FieldRules::new("smtp_encryption")
                    .required("Encryption type is required")
                    .one_of(SmtpEncryption::VALUES, "Invalid encryption type"),
            )
            .field(
                FieldRules::new("from_email")
                    .required("From email is required")
                    .email("Invalid email address"),
            )
            .field(FieldRules::new("from_name").required("From name is required"))
    }

    fn slot(panel: &SettingsPanel) -> &Self {
        &panel.email
    }

    fn slot_mut(panel: &mut SettingsPanel) -> &mut Self {
        &mut panel.email
    }
}

/// Password policy and session limits.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct SecuritySettings {
    pub password_min_length: u32,
    pub password_require_uppercase: bool,
    pub password_require_lowercase: bool,
    pub password_require_numbers: bool,
    pub password_require_special_chars: bool,
    /// Minutes.
    pub session_timeout: u32,
    pub max_login_attempts: u32,
    pub two_factor_enabled: bool,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            password_min_length: 8,
            password_require_uppercase: true,
            password_require_lowercase: true,
            password_require_numbers: true,
            password_require_special_chars: false,
            session_timeout: 30,
            max_login_attempts: 5,
            two_factor_enabled: false,
        }
    }
}

impl FormValues for SecuritySettings {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "password_min_length" => FieldValue::Number(i64::from(self.password_min_length)),
            "password_require_uppercase" => FieldValue::Flag(self.password_require_uppercase),
            "password_require_lowercase" => FieldValue::Flag(self.password_require_lowercase),
            "password_require_numbers" => FieldValue::Flag(self.password_require_numbers),
            "password_require_special_chars" => {
                FieldValue::Flag(self.password_require_special_chars)
            }
            "session_timeout" => FieldValue::Number(i64::from(self.session_timeout)),
            "max_login_attempts" => FieldValue::Number(i64::from(self.max_login_attempts)),
            "two_factor_enabled" => FieldValue::Flag(self.two_factor_enabled),
            _ => FieldValue::Absent,
        }
    }
}

impl Section for SecuritySettings {
    const NAME: &'static str = "security";
    const SAVED: &'static str = "Security settings saved successfully!";

    fn schema() -> Schema {
        Schema::new()
            .field(
                FieldRules::new("password_min_length")
                    .at_least(6, "Minimum length must be at least 6")
                    .at_most(32, "Minimum length must be at most 32"),
            )
            .field(
                FieldRules::new("session_timeout")
                    .at_least(5, "Session timeout must be at least 5 minutes")
                    .at_most(1440, "Session timeout must be at most 1440 minutes"),
            )
            .field(
                FieldRules::new("max_login_attempts")
                    .at_least(3, "Max login attempts must be at least 3")
                    .at_most(10, "Max login attempts must be at most 10"),
            )
    }

    fn slot(panel: &SettingsPanel) -> &Self {
        &panel.security
    }

    fn slot_mut(panel: &mut SettingsPanel) -> &mut Self {
        &mut panel.security
    }
}

/// Runtime switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSettings {
    pub maintenance_mode: bool,
    pub debug_mode: bool,
    pub cache_enabled: bool,
    pub logging_level: LogLevel,
    pub backup_frequency: BackupFrequency,
    /// Megabytes.
    pub max_upload_size: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            maintenance_mode: false,
            debug_mode: false,
            cache_enabled: true,
            logging_level: LogLevel::Info,
            backup_frequency: BackupFrequency::Daily,
            max_upload_size: 10,
        }
    }
}

impl FormValues for SystemSettings {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "maintenance_mode" => FieldValue::Flag(self.maintenance_mode),
            "debug_mode" => FieldValue::Flag(self.debug_mode),
            "cache_enabled" => FieldValue::Flag(self.cache_enabled),
            "logging_level" => FieldValue::Text(self.logging_level.as_str()),
            "backup_frequency" => FieldValue::Text(self.backup_frequency.as_str()),
            "max_upload_size" => FieldValue::Number(i64::from(self.max_upload_size)),
            _ => FieldValue::Absent,
        }
    }
}

impl Section for SystemSettings {
    const NAME: &'static str = "system";
    const SAVED: &'static str = "System settings saved successfully!";

    fn schema() -> Schema {
        Schema::new()
            .field(
                FieldRules::new("logging_level")
                    .required("Logging level is required")
                    .one_of(LogLevel::VALUES, "Invalid logging level"),
            )
            .field(
                FieldRules::new("backup_frequency")
                    .required("Backup frequency is required")
                    .one_of(BackupFrequency::VALUES, "Invalid backup frequency"),
            )
            .field(
                FieldRules::new("max_upload_size")
                    .at_least(1, "Max file upload size must be at least 1 MB")
                    .at_most(1024, "Max file upload size must be at most 1024 MB"),
            )
    }

    fn slot(panel: &SettingsPanel) -> &Self {
        &panel.system
    }

    fn slot_mut(panel: &mut SettingsPanel) -> &mut Self {
        &mut panel.system
    }
}

/// Which section tab is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionTab {
    #[default]
    General,
    Email,
    Security,
    System,
}

/// The saved settings of every section.
#[derive(Debug, Clone, Default)]
pub struct SettingsPanel {
    general: GeneralSettings,
    email: EmailSettings,
    security: SecuritySettings,
    system: SystemSettings,
    tab: SectionTab,
}

impl SettingsPanel {
    /// Saved values of section `S`.
    #[must_use]
    pub fn get<S: Section>(&self) -> &S {
        S::slot(self)
    }

    /// Currently selected tab.
    #[must_use]
    pub const fn tab(&self) -> SectionTab {
        self.tab
    }

    /// Switch tabs. Unsaved form state is owned by the caller and unaffected.
    pub fn select(&mut self, tab: SectionTab) {
        self.tab = tab;
    }

    /// Open a form for section `S`, pre-filled with the saved values.
    #[must_use]
    pub fn edit<S: Section>(&self) -> FormState<S> {
        FormState::new(FormMode::Edit(()), S::slot(self).clone(), S::schema())
    }

    /// Validate `values` and replace section `S`, returning the confirmation.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if any field fails; the saved section is untouched.
    pub fn save<S: Section>(&mut self, values: S) -> Result<&'static str, AdminError> {
        S::schema().validate(&values)?;
        *S::slot_mut(self) = values;
        info!(section = S::NAME, "Settings saved");
        Ok(S::SAVED)
    }

    /// Submit an open section form and save it.
    ///
    /// # Errors
    ///
    /// Returns `Validation` with every failing field; the form stays open.
    pub fn submit<S: Section>(
        &mut self,
        form: &mut FormState<S>,
    ) -> Result<&'static str, AdminError> {
        let values = form.submit()?;
        let saved = self.save(values)?;
        form.complete();
        Ok(saved)
    }
}
