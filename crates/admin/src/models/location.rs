//! Company locations.

use backoffice_core::{LocationId, LocationKind, LocationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::forms::FormMode;
use crate::store::Record;
use crate::validation::{FieldRules, FieldValue, FormValues, Schema, patterns};

/// A physical or remote site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub manager: String,
    /// Zero for new locations; nothing in the dashboard increments it.
    #[serde(default)]
    pub employee_count: u32,
    pub status: LocationStatus,
    pub created_at: DateTime<Utc>,
}

impl Record for Location {
    type Id = LocationId;
    const KIND: &'static str = "location";

    fn id(&self) -> LocationId {
        self.id
    }
}

impl Location {
    /// Single-line postal address: `address, city, state zip`.
    #[must_use]
    pub fn postal_address(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.address, self.city, self.state, self.zip_code
        )
    }

    /// Prefill values for the edit form.
    #[must_use]
    pub fn to_draft(&self) -> LocationDraft {
        LocationDraft {
            name: self.name.clone(),
            kind: self.kind,
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            country: self.country.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            manager: self.manager.clone(),
            status: self.status,
        }
    }
}

/// Values of the location form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationDraft {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: LocationKind,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub manager: String,
    #[serde(default)]
    pub status: LocationStatus,
}

impl FormValues for LocationDraft {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match name {
            "name" => FieldValue::Text(&self.name),
            "type" => FieldValue::Text(self.kind.as_str()),
            "address" => FieldValue::Text(&self.address),
            "city" => FieldValue::Text(&self.city),
            "state" => FieldValue::Text(&self.state),
            "zip_code" => FieldValue::Text(&self.zip_code),
            "country" => FieldValue::Text(&self.country),
            "phone" => FieldValue::Text(&self.phone),
            "email" => FieldValue::Text(&self.email),
            "manager" => FieldValue::Text(&self.manager),
            "status" => FieldValue::Text(self.status.as_str()),
            _ => FieldValue::Absent,
        }
    }
}

/// Schema for the location form. Identical for create and edit.
#[must_use]
pub fn schema<I>(_mode: FormMode<I>) -> Schema {
    Schema::new()
        .field(
            FieldRules::new("name")
                .required("Location name is required")
                .min_length(3, "Location name must be at least 3 characters")
                .max_length(100, "Location name must be at most 100 characters"),
        )
        .field(
            FieldRules::new("type")
                .required("Location type is required")
                .one_of(LocationKind::VALUES, "Invalid location type"),
        )
        .field(
            FieldRules::new("address")
                .required("Address is required")
                .min_length(5, "Address must be at least 5 characters")
                .max_length(200, "Address must be at most 200 characters"),
        )
        .field(
            FieldRules::new("city")
                .required("City is required")
                .min_length(2, "City must be at least 2 characters")
                .max_length(50, "City must be at most 50 characters"),
        )
        .field(
            FieldRules::new("state")
                .required("State is required")
                .min_length(2, "State must be at least 2 characters")
                .max_length(50, "State must be at most 50 characters"),
        )
        .field(
            FieldRules::new("zip_code")
                .required("Zip code is required")
                .pattern(
                    &patterns::ZIP_CODE,
                    "Zip code must contain only numbers and hyphens",
                ),
        )
        .field(
            FieldRules::new("country")
                .required("Country is required")
                .min_length(2, "Country must be at least 2 characters")
                .max_length(50, "Country must be at most 50 characters"),
        )
        .field(
            FieldRules::new("phone")
                .required("Phone number is required")
                .pattern(&patterns::PHONE, "Invalid phone number format"),
        )
        .field(
            FieldRules::new("email")
                .required("Email is required")
                .email("Invalid email address"),
        )
        .field(
            FieldRules::new("manager")
                .required("Manager name is required")
                .min_length(2, "Manager name must be at least 2 characters")
                .max_length(100, "Manager name must be at most 100 characters"),
        )
        .field(
            FieldRules::new("status")
                .required("Status is required")
                .one_of(LocationStatus::VALUES, "Invalid status"),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> LocationDraft {
        LocationDraft {
            name: "Denver Depot".to_string(),
            kind: LocationKind::Warehouse,
            address: "4100 Brighton Blvd".to_string(),
            city: "Denver".to_string(),
            state: "CO".to_string(),
            zip_code: "80216".to_string(),
            country: "USA".to_string(),
            phone: "+1 (303) 555-0142".to_string(),
            email: "denver@example.com".to_string(),
            manager: "Dana Ortiz".to_string(),
            status: LocationStatus::Active,
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(schema::<()>(FormMode::Create).validate(&draft()).is_ok());
    }

    #[test]
    fn test_zip_and_phone_allowlists() {
        let mut d = draft();
        d.zip_code = "SW1A 1AA".to_string();
        d.phone = "call me".to_string();
        let errors = schema::<()>(FormMode::Create).validate(&d).unwrap_err();
        assert_eq!(
            errors.get("zip_code"),
            Some("Zip code must contain only numbers and hyphens")
        );
        assert_eq!(errors.get("phone"), Some("Invalid phone number format"));

        d.zip_code = "12345-6789".to_string();
        d.phone = "555-0100".to_string();
        assert!(schema::<()>(FormMode::Create).validate(&d).is_ok());
    }

    #[test]
    fn test_required_fields_report_required_message() {
        let errors = schema::<()>(FormMode::Create)
            .validate(&LocationDraft::default())
            .unwrap_err();
        assert_eq!(errors.get("name"), Some("Location name is required"));
        assert_eq!(errors.get("manager"), Some("Manager name is required"));
        // Enum fields always hold a value.
        assert_eq!(errors.get("type"), None);
        assert_eq!(errors.get("status"), None);
    }

    #[test]
    fn test_postal_address() {
        let location = Location {
            id: LocationId::new(1),
            name: "Headquarters".to_string(),
            kind: LocationKind::Office,
            address: "123 Main St".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
            country: "USA".to_string(),
            phone: "+1 555-0100".to_string(),
            email: "hq@example.com".to_string(),
            manager: "John Smith".to_string(),
            employee_count: 150,
            status: LocationStatus::Active,
            created_at: Utc::now(),
        };
        assert_eq!(location.postal_address(), "123 Main St, New York, NY 10001");
        assert_eq!(location.to_draft().kind, LocationKind::Office);
    }
}
