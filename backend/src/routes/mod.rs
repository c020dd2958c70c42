//! Wire shapes of the HTTP API.
//!
//! Each resource module owns its response, create and update DTOs and the
//! mapping between them and the domain entity. Response DTOs flatten the
//! resolved navigation reference (role, specialty, status...) into plain
//! scalar fields so clients never need a second lookup.

pub mod appointment;
pub mod auth;
pub mod availability;
pub mod doctor;
pub mod insurance;
pub mod medical_record;
pub mod notification;
pub mod patient;
pub mod report;
pub mod role;
pub mod specialty;
pub mod status;
pub mod user;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{Entity, PersonBase};
use crate::services::Validated;

/// An entity exposed as a REST resource under `/api/{PATH}`.
pub trait Resource: Entity + Validated {
    type Dto: Serialize + Send + 'static;
    /// Partial update body; every field is optional.
    type Update: DeserializeOwned + Send + 'static;

    const PATH: &'static str;

    /// Writes need the `Admin` role.
    const REQUIRES_ADMIN: bool = false;

    fn to_dto(&self) -> Self::Dto;

    fn apply_update(&mut self, update: Self::Update);
}

/// Resources created straight from a request body.
pub trait FromCreate: Resource {
    type Create: DeserializeOwned + Send + 'static;

    fn from_create(create: Self::Create) -> Self;
}

pub fn map_to_dto<E: Resource>(entity: Option<&E>) -> Option<E::Dto> {
    entity.map(Resource::to_dto)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistsResponse {
    pub exists: bool,
}

pub(crate) fn default_true() -> bool {
    true
}

pub(crate) fn patch<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

pub(crate) fn patch_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

/// Optional person fields of an update body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl PersonUpdate {
    pub fn apply(self, person: &mut PersonBase) {
        patch(&mut person.first_name, self.first_name);
        patch(&mut person.last_name, self.last_name);
        patch_opt(&mut person.date_of_birth, self.date_of_birth);
        patch_opt(&mut person.gender, self.gender);
        patch_opt(&mut person.phone, self.phone);
        patch_opt(&mut person.email, self.email);
        patch_opt(&mut person.address, self.address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(<crate::models::Role as Resource>::PATH, "roles");
        assert_eq!(<crate::models::User as Resource>::PATH, "users");
        assert_eq!(<crate::models::Doctor as Resource>::PATH, "doctors");
        assert_eq!(<crate::models::Patient as Resource>::PATH, "patients");
        assert_eq!(
            <crate::models::MedicalRecord as Resource>::PATH,
            "medical-records"
        );
        assert_eq!(
            <crate::models::AvailabilityMode as Resource>::PATH,
            "availability-modes"
        );
    }

    #[test]
    fn test_admin_only_resources() {
        assert!(<crate::models::Role as Resource>::REQUIRES_ADMIN);
        assert!(<crate::models::Status as Resource>::REQUIRES_ADMIN);
        assert!(<crate::models::User as Resource>::REQUIRES_ADMIN);
        assert!(!<crate::models::Appointment as Resource>::REQUIRES_ADMIN);
        assert!(!<crate::models::Patient as Resource>::REQUIRES_ADMIN);
    }

    #[test]
    fn test_person_update_keeps_missing_fields() {
        let mut person = PersonBase {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            phone: Some("555-0100".to_string()),
            ..Default::default()
        };
        PersonUpdate {
            last_name: Some("King".to_string()),
            ..Default::default()
        }
        .apply(&mut person);
        assert_eq!(person.first_name, "Ada");
        assert_eq!(person.last_name, "King");
        assert_eq!(person.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_map_to_dto_none() {
        assert!(map_to_dto::<crate::models::Role>(None).is_none());
    }
}
