//! Shared builders for service tests.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use super::crud;
use super::users::{register, Registration};
use crate::db::repository::FullRepository;
use crate::db::LocalRepository;
use crate::models::{
    unsaved, Appointment, DayOfWeek, Doctor, DoctorAvailability, DoctorId, Patient, PatientId,
    PersonBase, SpecialtyId, StatusId, User,
};

pub const COST: u32 = 4;

pub fn seeded() -> LocalRepository {
    LocalRepository::with_reference_data()
}

pub fn person(first: &str, last: &str) -> PersonBase {
    PersonBase {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    }
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

pub async fn doctor(repo: &LocalRepository, first: &str, last: &str) -> Doctor {
    crud::create(
        repo,
        Doctor {
            id: unsaved(),
            person: person(first, last),
            user_id: None,
            specialty_id: SpecialtyId(1),
            specialty: None,
            license_number: format!("LIC-{}", last.to_uppercase()),
            years_of_experience: Some(10),
            consultation_fee: Some(80.0),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap()
}

/// Patient with a login account, created through registration.
pub async fn registered_patient(repo: &LocalRepository, email: &str) -> (User, Patient) {
    register(
        repo,
        Registration {
            email: email.to_string(),
            password: "correct horse".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            phone: None,
        },
        COST,
    )
    .await
    .unwrap()
}

pub fn appointment(
    patient_id: PatientId,
    doctor_id: DoctorId,
    scheduled_at: DateTime<Utc>,
) -> Appointment {
    Appointment {
        id: unsaved(),
        patient_id,
        doctor_id,
        status_id: unsaved::<StatusId>(),
        status: None,
        availability_id: None,
        scheduled_at,
        duration_minutes: 30,
        reason: Some("Checkup".to_string()),
        notes: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

pub async fn slot<R>(repo: &R, doctor_id: DoctorId, date: NaiveDate) -> DoctorAvailability
where
    R: FullRepository + ?Sized,
{
    crud::create(
        repo,
        DoctorAvailability {
            id: unsaved(),
            doctor_id,
            available_date: date,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            day_of_week: DayOfWeek::Sunday,
            availability_mode_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap()
}
