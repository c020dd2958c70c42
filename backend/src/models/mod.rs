//! Domain model for the HealtSync scheduling system.
//!
//! Every persisted record implements [`Entity`], which is all the generic
//! repository and service layers need to know about it. Identifiers are
//! typed newtypes so a `DoctorId` can never be passed where a `PatientId`
//! is expected.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::hash::Hash;

#[macro_use]
pub mod macros;

pub mod appointment;
pub mod availability;
pub mod doctor;
pub mod insurance;
pub mod medical_record;
pub mod notification;
pub mod patient;
pub mod person;
pub mod report;
pub mod role;
pub mod specialty;
pub mod status;
pub mod user;

pub use appointment::Appointment;
pub use availability::{AvailabilityMode, DayOfWeek, DoctorAvailability};
pub use doctor::Doctor;
pub use insurance::InsuranceProvider;
pub use medical_record::MedicalRecord;
pub use notification::{Notification, NotificationKind};
pub use patient::Patient;
pub use person::PersonBase;
pub use report::{Report, ReportKind};
pub use role::Role;
pub use specialty::Specialty;
pub use status::Status;
pub use user::User;

/// Identifier of a persisted entity.
pub trait EntityId:
    Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Display
    + Send
    + Sync
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Id of an entity that has not been stored yet.
    const UNSAVED: Self;

    /// Build an id from a store-assigned sequence value, `None` when the
    /// value does not fit the id's integer type.
    fn from_sequence(value: i64) -> Option<Self>;

    fn as_i64(self) -> i64;

    /// Parse an id from its textual form (path segments, query strings).
    fn parse(raw: &str) -> Option<Self>;
}

/// A record stored through the generic repository.
pub trait Entity: Clone + Debug + Send + Sync + 'static {
    type Id: EntityId;

    /// Human-readable entity name used in errors and logs.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;

    fn set_id(&mut self, id: Self::Id);

    /// Set creation audit fields. No-op for entities without them.
    fn stamp_created(&mut self, _now: DateTime<Utc>) {}

    /// Set modification audit fields. No-op for entities without them.
    fn stamp_updated(&mut self, _now: DateTime<Utc>) {}
}

define_id_type!(i32, RoleId);
define_id_type!(i32, UserId);
define_id_type!(i32, SpecialtyId);
define_id_type!(i32, DoctorId);
define_id_type!(i32, PatientId);
define_id_type!(i32, InsuranceProviderId);
define_id_type!(i32, StatusId);
define_id_type!(i16, AvailabilityModeId);
define_id_type!(i32, AvailabilityId);
define_id_type!(i32, AppointmentId);
define_id_type!(i32, MedicalRecordId);
define_id_type!(i32, NotificationId);
define_id_type!(i32, ReportId);

/// Placeholder id carried by entities that have not been stored yet.
pub fn unsaved<I: EntityId>() -> I {
    I::UNSAVED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_accepts_integers() {
        assert_eq!(DoctorId::parse("42"), Some(DoctorId::new(42)));
        assert_eq!(DoctorId::parse(" 7 "), Some(DoctorId::new(7)));
    }

    #[test]
    fn test_id_parse_rejects_non_numeric() {
        assert_eq!(MedicalRecordId::parse("abc"), None);
        assert_eq!(MedicalRecordId::parse(""), None);
        assert_eq!(MedicalRecordId::parse("1.5"), None);
    }

    #[test]
    fn test_short_id_range() {
        assert_eq!(AvailabilityModeId::parse("32767"), Some(AvailabilityModeId(i16::MAX)));
        assert_eq!(AvailabilityModeId::parse("40000"), None);
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&PatientId::new(9)).unwrap();
        assert_eq!(json, "9");
        let back: PatientId = serde_json::from_str("9").unwrap();
        assert_eq!(back, PatientId(9));
    }

    #[test]
    fn test_id_ordering_and_display() {
        assert!(UserId::new(1) < UserId::new(2));
        assert_eq!(UserId::new(15).to_string(), "15");
        assert_eq!(UserId::from_sequence(3).map(EntityId::as_i64), Some(3));
    }

    #[test]
    fn test_sequence_out_of_range_is_rejected() {
        let max = i64::from(i16::MAX);
        assert_eq!(AvailabilityModeId::from_sequence(max), Some(AvailabilityModeId(i16::MAX)));
        assert_eq!(AvailabilityModeId::from_sequence(max + 1), None);
        assert_eq!(UserId::from_sequence(i64::from(i32::MAX) + 1), None);
        assert_eq!(unsaved::<UserId>(), UserId(0));
    }
}
