//! Record types for the dashboard screens.
//!
//! Each record comes with a draft type holding the values of its create/edit
//! form and the schema those values are validated against.

pub mod location;
pub mod notification;
pub mod role;
pub mod user;

pub use location::{Location, LocationDraft};
pub use notification::Notification;
pub use role::{PERMISSION_CATALOG, Permission, Role, RoleDraft};
pub use user::{User, UserDraft};
