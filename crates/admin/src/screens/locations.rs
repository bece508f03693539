//! Locations screen.

use backoffice_core::LocationId;
use chrono::Utc;

use super::Entity;
use crate::filters::LocationFilters;
use crate::forms::FormMode;
use crate::models::{Location, LocationDraft, location};
use crate::validation::{FieldErrors, Schema};

impl Entity for Location {
    type Draft = LocationDraft;
    type Filters = LocationFilters;
    type Context = ();

    const PLURAL: &'static str = "locations";

    fn schema(mode: FormMode<LocationId>) -> Schema {
        location::schema(mode)
    }

    fn draft(&self) -> LocationDraft {
        self.to_draft()
    }

    fn build(id: LocationId, draft: LocationDraft, _: &()) -> Result<Self, FieldErrors> {
        Ok(Self {
            id,
            name: draft.name,
            kind: draft.kind,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            country: draft.country,
            phone: draft.phone,
            email: draft.email,
            manager: draft.manager,
            employee_count: 0,
            status: draft.status,
            created_at: Utc::now(),
        })
    }

    fn merge(&self, draft: LocationDraft, ctx: &()) -> Result<Self, FieldErrors> {
        Ok(Self {
            employee_count: self.employee_count,
            created_at: self.created_at,
            ..Self::build(self.id, draft, ctx)?
        })
    }
}
