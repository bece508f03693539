//! Contact address shared by users, locations and the profile form.

use core::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Characters allowed before the `@`.
static MAILBOX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+$").expect("Invalid regex")
});

/// Dot-separated labels of 1-63 letters, digits or inner hyphens.
static HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid regex")
});

/// Why a string was rejected as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailError {
    #[error("email address is blank")]
    Blank,
    #[error("email address is longer than {0} characters")]
    TooLong(usize),
    #[error("email address contains whitespace")]
    Whitespace,
    /// Zero or several `@` separators.
    #[error("email address needs exactly one @")]
    Separator,
    #[error("email address has nothing before the @")]
    NoMailbox,
    /// Quotes, brackets, commas and the like before the `@`.
    #[error("email address has invalid characters before the @")]
    BadMailbox,
    /// Host is empty, has an empty label, or a label that starts or ends with
    /// a hyphen or holds anything but letters, digits and hyphens.
    #[error("email address has an invalid host")]
    BadHost,
}

/// A shape-checked email address.
///
/// Follows the browser `type="email"` rule the dashboard forms validate
/// with: an unquoted mailbox, one `@`, and a host made of letter/digit labels.
/// Single-label hosts such as `localhost` are accepted.
///
/// ```
/// use backoffice_core::Email;
///
/// let email = Email::parse("warehouse.a+alerts@company.co.uk").unwrap();
/// assert_eq!(email.local_part(), "warehouse.a+alerts");
/// assert_eq!(email.domain(), "company.co.uk");
///
/// assert!(Email::parse("ops@localhost").is_ok());
/// assert!(Email::parse("ops@-bad_.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
    at: usize,
}

impl Email {
    /// Longest accepted address.
    pub const MAX_LENGTH: usize = 254;

    /// Check `s` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input trips, checked in variant
    /// order.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        Self::check(s).map(|at| Self {
            address: s.to_owned(),
            at,
        })
    }

    /// Returns the byte offset of the `@`.
    fn check(s: &str) -> Result<usize, EmailError> {
        match s.len() {
            0 => return Err(EmailError::Blank),
            n if n > Self::MAX_LENGTH => return Err(EmailError::TooLong(Self::MAX_LENGTH)),
            _ => {}
        }
        if s.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let Some((mailbox, host)) = s.split_once('@').filter(|(_, host)| !host.contains('@'))
        else {
            return Err(EmailError::Separator);
        };
        if mailbox.is_empty() {
            return Err(EmailError::NoMailbox);
        }
        if !MAILBOX.is_match(mailbox) {
            return Err(EmailError::BadMailbox);
        }
        if !HOST.is_match(host) {
            return Err(EmailError::BadHost);
        }
        Ok(mailbox.len())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.address
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.address
    }

    /// Mailbox part, before the `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.address.get(..self.at).unwrap_or_default()
    }

    /// Host part, after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.address.get(self.at + 1..).unwrap_or_default()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        let at = Self::check(&address)?;
        Ok(Self { address, at })
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.address
    }
}
