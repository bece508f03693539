//! Inbox notifications.

use backoffice_core::{NotificationId, NotificationKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// One inbox entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub is_read: bool,
}

impl Record for Notification {
    type Id = NotificationId;
    const KIND: &'static str = "notification";

    fn id(&self) -> NotificationId {
        self.id
    }
}

impl Notification {
    /// Whether the card shows the unread marker.
    #[must_use]
    pub const fn is_unread(&self) -> bool {
        !self.is_read
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_field_names() {
        let json = r#"{"id":7,"type":"warning","title":"Disk","message":"90% full",
            "timestamp":"2024-03-01T10:00:00Z","is_read":true}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Warning);
        assert!(n.is_read);
        assert!(!n.is_unread());
    }
}
