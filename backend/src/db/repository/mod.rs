//! Repository traits.
//!
//! [`Repository`] is the single CRUD contract shared by every entity. The
//! per-entity traits below add the handful of lookups each slice needs, and
//! [`FullRepository`] bundles them so the rest of the application can hold one
//! `Arc<dyn FullRepository>`.
//!
//! Because one backend type implements `Repository<E>` for many `E`, call the
//! generic methods with the entity spelled out:
//!
//! ```ignore
//! let doctor = Repository::<Doctor>::get_by_id(repo, DoctorId::new(1)).await?;
//! ```
//!
//! # Thread Safety
//! Implementations must be `Send + Sync` to work with async Rust.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    Appointment, AvailabilityMode, Doctor, DoctorAvailability, DoctorId, Entity,
    InsuranceProvider, InsuranceProviderId, MedicalRecord, Notification, Patient, PatientId,
    Report, Role, RoleId, Specialty, SpecialtyId, Status, StatusId, User, UserId,
};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Generic CRUD contract over one entity type.
///
/// Absence is not an error: `get_by_id` and `update` return `None` and
/// `delete` returns `false` when no record has the given id.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Fetch one record, with navigation references resolved.
    async fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>>;

    /// Fetch every record ordered by id.
    async fn get_all(&self) -> RepositoryResult<Vec<E>>;

    /// Insert a record. The store assigns the id; the returned entity carries it.
    async fn add(&self, entity: E) -> RepositoryResult<E>;

    /// Replace the record with the same id.
    async fn update(&self, entity: E) -> RepositoryResult<Option<E>>;

    /// Remove a record, reporting whether anything was deleted.
    async fn delete(&self, id: E::Id) -> RepositoryResult<bool>;

    async fn exists(&self, id: E::Id) -> RepositoryResult<bool>;
}

#[async_trait]
pub trait RoleRepository: Repository<Role> {
    async fn get_role_by_name(&self, name: &str) -> RepositoryResult<Option<Role>>;
}

#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Lookup by (already normalized) email.
    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    async fn get_users_by_role_id(&self, role_id: RoleId) -> RepositoryResult<Vec<User>>;
}

#[async_trait]
pub trait SpecialtyRepository: Repository<Specialty> {
    async fn get_specialty_by_name(&self, name: &str) -> RepositoryResult<Option<Specialty>>;
}

#[async_trait]
pub trait DoctorRepository: Repository<Doctor> {
    async fn get_doctors_by_specialty_id(
        &self,
        specialty_id: SpecialtyId,
    ) -> RepositoryResult<Vec<Doctor>>;

    async fn get_doctor_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Doctor>>;
}

#[async_trait]
pub trait PatientRepository: Repository<Patient> {
    async fn get_patient_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Patient>>;

    async fn get_patients_by_insurance_provider_id(
        &self,
        provider_id: InsuranceProviderId,
    ) -> RepositoryResult<Vec<Patient>>;
}

#[async_trait]
pub trait InsuranceProviderRepository: Repository<InsuranceProvider> {
    async fn get_insurance_provider_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<InsuranceProvider>>;
}

#[async_trait]
pub trait StatusRepository: Repository<Status> {
    async fn get_status_by_name(&self, name: &str) -> RepositoryResult<Option<Status>>;
}

#[async_trait]
pub trait AvailabilityModeRepository: Repository<AvailabilityMode> {
    async fn get_availability_mode_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<AvailabilityMode>>;
}

#[async_trait]
pub trait AvailabilityRepository: Repository<DoctorAvailability> {
    async fn get_availability_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<DoctorAvailability>>;

    async fn get_availability_by_doctor_and_date(
        &self,
        doctor_id: DoctorId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DoctorAvailability>>;
}

#[async_trait]
pub trait AppointmentRepository: Repository<Appointment> {
    async fn get_appointments_by_patient_id(
        &self,
        patient_id: PatientId,
    ) -> RepositoryResult<Vec<Appointment>>;

    async fn get_appointments_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<Appointment>>;

    async fn get_appointments_by_status_id(
        &self,
        status_id: StatusId,
    ) -> RepositoryResult<Vec<Appointment>>;

    /// Appointments with `from <= scheduled_at < to`, ordered by time.
    async fn get_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Appointment>>;
}

#[async_trait]
pub trait MedicalRecordRepository: Repository<MedicalRecord> {
    async fn get_medical_records_by_patient_id(
        &self,
        patient_id: PatientId,
    ) -> RepositoryResult<Vec<MedicalRecord>>;

    async fn get_medical_records_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<MedicalRecord>>;
}

#[async_trait]
pub trait NotificationRepository: Repository<Notification> {
    /// Newest first.
    async fn get_notifications_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Notification>>;

    async fn get_unread_notifications_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Notification>>;
}

#[async_trait]
pub trait ReportRepository: Repository<Report> {
    async fn get_reports_by_generated_by(&self, user_id: UserId)
        -> RepositoryResult<Vec<Report>>;
}

/// Every repository capability the application needs, behind one object.
#[async_trait]
pub trait FullRepository:
    RoleRepository
    + UserRepository
    + SpecialtyRepository
    + DoctorRepository
    + PatientRepository
    + InsuranceProviderRepository
    + StatusRepository
    + AvailabilityModeRepository
    + AvailabilityRepository
    + AppointmentRepository
    + MedicalRecordRepository
    + NotificationRepository
    + ReportRepository
{
    /// Check that the backing store answers.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
