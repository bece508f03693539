//! Status and kind enums for dashboard records.
//!
//! Every enum here round-trips through its lowercase wire value (`"active"`,
//! `"warehouse"`, ...) via serde, `Display` and `FromStr`, and carries a
//! capitalized display label for tables.

/// Error returned when a status value is not one of the enum's members.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct StatusParseError {
    /// Name of the enum being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Macro to define a string-valued status enum.
///
/// Generates the enum with serde renames, a `Default` impl, an `ALL` list of
/// members in declaration order, `as_str()`, `label()`, `Display` and `FromStr`.
macro_rules! define_status {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal, default = $default:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Every wire value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            /// The lowercase wire value.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            /// The capitalized display label.
            #[must_use]
            pub const fn label(&self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = StatusParseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(StatusParseError {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

define_status! {
    /// Account status of a dashboard user.
    UserStatus("user status", default = Active) {
        /// Can sign in.
        Active => "active", "Active";
        /// Disabled by an administrator.
        Inactive => "inactive", "Inactive";
        /// Temporarily locked out.
        Suspended => "suspended", "Suspended";
    }
}

define_status! {
    /// Whether a role can be assigned to users.
    RoleStatus("role status", default = Active) {
        Active => "active", "Active";
        Inactive => "inactive", "Inactive";
    }
}

define_status! {
    /// Operating status of a location.
    LocationStatus("location status", default = Active) {
        Active => "active", "Active";
        Inactive => "inactive", "Inactive";
    }
}

define_status! {
    /// What kind of site a location is.
    LocationKind("location type", default = Office) {
        Office => "office", "Office";
        Warehouse => "warehouse", "Warehouse";
        Store => "store", "Store";
        Remote => "remote", "Remote";
    }
}

define_status! {
    /// Severity of an inbox notification.
    NotificationKind("notification type", default = Info) {
        Info => "info", "Info";
        Success => "success", "Success";
        Warning => "warning", "Warning";
        Error => "error", "Error";
    }
}

define_status! {
    /// Transport security of the outgoing mail server.
    SmtpEncryption("encryption type", default = Tls) {
        None => "none", "None";
        Ssl => "ssl", "SSL";
        Tls => "tls", "TLS";
    }
}

define_status! {
    /// Minimum severity written to the application log.
    LogLevel("logging level", default = Info) {
        Error => "error", "Error";
        Warning => "warning", "Warning";
        Info => "info", "Info";
        Debug => "debug", "Debug";
    }
}

define_status! {
    /// How often backups run.
    BackupFrequency("backup frequency", default = Daily) {
        Never => "none", "None";
        Daily => "daily", "Daily";
        Weekly => "weekly", "Weekly";
        Monthly => "monthly", "Monthly";
    }
}
