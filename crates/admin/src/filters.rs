//! Filter state and predicates for the list screens.
//!
//! Every screen owns one filter struct. Text criteria match by
//! case-insensitive substring; selector criteria match exactly unless set to
//! [`Selector::All`]. A record is visible when it satisfies every active
//! criterion, and visibility is recomputed from the full store on each render.

use std::fmt;
use std::str::FromStr;

use backoffice_core::{
    LocationKind, LocationStatus, NotificationKind, RoleStatus, StatusParseError, UserStatus,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::models::{Location, Notification, Role, User};

/// An enum filter: either no constraint or one exact value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    /// Matches every record.
    All,
    /// Matches records whose value equals this one.
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selector<T> {
    /// Whether `value` passes this selector.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Whether the selector constrains anything.
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// `""` and `"all"` parse to [`Selector::All`].
impl<T: FromStr> FromStr for Selector<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            other => other.parse().map(Self::Only),
        }
    }
}

impl<T: fmt::Display> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selector<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Case-insensitive substring test; an empty needle matches everything.
#[must_use]
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter criteria for one record type.
pub trait Criteria<R> {
    /// Whether `record` satisfies every active criterion.
    fn matches(&self, record: &R) -> bool;

    /// Whether no criterion is active.
    fn is_empty(&self) -> bool;
}

/// The ordered subsequence of `records` matching `criteria`.
pub fn apply<'a, R, C: Criteria<R>>(records: &'a [R], criteria: &C) -> Vec<&'a R> {
    let visible: Vec<&R> = records.iter().filter(|r| criteria.matches(r)).collect();
    debug!(
        total = records.len(),
        visible = visible.len(),
        unfiltered = criteria.is_empty(),
        "Filter evaluated"
    );
    visible
}

/// User list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserFilters {
    /// Matches first name, last name or username.
    pub name: String,
    pub email: String,
    pub status: Selector<UserStatus>,
}

impl Criteria<User> for UserFilters {
    fn matches(&self, user: &User) -> bool {
        let name_hit = contains_ci(&user.first_name, &self.name)
            || contains_ci(&user.last_name, &self.name)
            || contains_ci(&user.username, &self.name);
        name_hit
            && contains_ci(user.email.as_str(), &self.email)
            && self.status.admits(&user.status)
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.status.is_all()
    }
}

/// Role list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleFilters {
    pub name: String,
    pub status: Selector<RoleStatus>,
}

impl Criteria<Role> for RoleFilters {
    fn matches(&self, role: &Role) -> bool {
        contains_ci(&role.name, &self.name) && self.status.admits(&role.status)
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.status.is_all()
    }
}

/// Location list filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationFilters {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Selector<LocationKind>,
    pub status: Selector<LocationStatus>,
}

impl Criteria<Location> for LocationFilters {
    fn matches(&self, location: &Location) -> bool {
        contains_ci(&location.name, &self.name)
            && self.kind.admits(&location.kind)
            && self.status.admits(&location.status)
    }

    fn is_empty(&self) -> bool {
        self.name.is_empty() && self.kind.is_all() && self.status.is_all()
    }
}

/// Read-state selector of the notifications inbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadFilter {
    #[default]
    All,
    Read,
    Unread,
}

impl ReadFilter {
    const fn admits(self, is_read: bool) -> bool {
        match self {
            Self::All => true,
            Self::Read => is_read,
            Self::Unread => !is_read,
        }
    }
}

impl FromStr for ReadFilter {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(Self::All),
            "read" => Ok(Self::Read),
            "unread" => Ok(Self::Unread),
            other => Err(StatusParseError {
                kind: "read filter",
                value: other.to_string(),
            }),
        }
    }
}

/// Notification inbox filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationFilters {
    #[serde(rename = "type")]
    pub kind: Selector<NotificationKind>,
    pub status: ReadFilter,
}

impl Criteria<Notification> for NotificationFilters {
    fn matches(&self, notification: &Notification) -> bool {
        self.kind.admits(&notification.kind) && self.status.admits(notification.is_read)
    }

    fn is_empty(&self) -> bool {
        self.kind.is_all() && self.status == ReadFilter::All
    }
}
