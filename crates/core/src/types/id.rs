//! Record identifiers.
//!
//! Every dashboard record is keyed by a positive integer unique within its
//! store. Each record kind gets its own wrapper so a role id can never be
//! passed where a user id is expected.

/// A string that is not a valid identifier for `record`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {record} id: {input:?}")]
pub struct IdParseError {
    pub record: &'static str,
    pub input: String,
}

/// Declares an `i64` identifier newtype for one record kind.
///
/// The second argument names the record in parse errors. The generated type
/// serializes as a bare number, orders by value, parses from trimmed decimal
/// text and converts to and from `i64`.
///
/// ```rust
/// # use backoffice_core::define_id;
/// define_id!(TicketId, "ticket");
///
/// let id: TicketId = "12".parse().unwrap();
/// assert_eq!(id.as_i64(), 12);
/// assert_eq!(
///     "x".parse::<TicketId>().unwrap_err().to_string(),
///     "invalid ticket id: \"x\""
/// );
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $record:literal) => {
        #[doc = concat!("Identifier of a ", $record, " record.")]
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const RECORD: &'static str = $record;

            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::IdParseError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse().map(Self).map_err(|_| $crate::IdParseError {
                    record: $record,
                    input: s.to_owned(),
                })
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(UserId, "user");
define_id!(RoleId, "role");
define_id!(LocationId, "location");
define_id!(NotificationId, "notification");
