//! In-memory repository for unit testing and local development.
//!
//! Each entity lives in its own [`Table`]: a `BTreeMap` keyed by id behind a
//! `parking_lot::RwLock`, plus an atomic sequence for id assignment. Reads
//! resolve navigation references from the sibling tables, the way the
//! Postgres backend does with its follow-up queries.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, error};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::db::repository::{
    AppointmentRepository, AvailabilityModeRepository, AvailabilityRepository, DoctorRepository,
    FullRepository, InsuranceProviderRepository, MedicalRecordRepository,
    ErrorContext, NotificationRepository, PatientRepository, ReportRepository, Repository,
    RepositoryError, RepositoryResult, RoleRepository, SpecialtyRepository, StatusRepository,
    UserRepository,
};
use crate::db::seed;
use crate::models::{
    unsaved, Appointment, AvailabilityMode, Doctor, DoctorAvailability, DoctorId, Entity,
    EntityId, InsuranceProvider, InsuranceProviderId, MedicalRecord, Notification, Patient,
    PatientId, Report, Role, RoleId, Specialty, SpecialtyId, Status, StatusId, User, UserId,
};

/// One in-memory table.
pub struct Table<E: Entity> {
    rows: RwLock<BTreeMap<E::Id, E>>,
    next_id: AtomicI64,
}

impl<E: Entity> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl<E: Entity> Table<E> {
    fn get(&self, id: E::Id) -> Option<E> {
        self.rows.read().get(&id).cloned()
    }

    fn all(&self) -> Vec<E> {
        self.rows.read().values().cloned().collect()
    }

    fn insert(&self, mut entity: E) -> RepositoryResult<E> {
        let next = self.next_id.fetch_add(1, Ordering::SeqCst);
        let id = E::Id::from_sequence(next).ok_or_else(|| {
            RepositoryError::internal_with_context(
                format!("id sequence exhausted at {}", next),
                ErrorContext::new("insert").with_entity(E::NAME),
            )
        })?;
        entity.set_id(id);
        self.rows.write().insert(id, entity.clone());
        Ok(entity)
    }

    fn replace(&self, entity: E) -> Option<E> {
        let mut rows = self.rows.write();
        let slot = rows.get_mut(&entity.id())?;
        *slot = entity.clone();
        Some(entity)
    }

    fn remove(&self, id: E::Id) -> bool {
        self.rows.write().remove(&id).is_some()
    }

    fn contains(&self, id: E::Id) -> bool {
        self.rows.read().contains_key(&id)
    }

    fn filter(&self, predicate: impl Fn(&E) -> bool) -> Vec<E> {
        self.rows
            .read()
            .values()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }

    fn find(&self, predicate: impl Fn(&E) -> bool) -> Option<E> {
        self.rows.read().values().find(|e| predicate(e)).cloned()
    }

    fn len(&self) -> usize {
        self.rows.read().len()
    }
}

/// Access to the table backing one entity type.
///
/// `hydrate` fills navigation references on the way out.
pub trait LocalTable<E: Entity> {
    fn table(&self) -> &Table<E>;

    fn hydrate(&self, entity: E) -> E {
        entity
    }
}

/// In-memory implementation of [`FullRepository`].
#[derive(Default)]
pub struct LocalRepository {
    roles: Table<Role>,
    users: Table<User>,
    specialties: Table<Specialty>,
    doctors: Table<Doctor>,
    patients: Table<Patient>,
    insurance_providers: Table<InsuranceProvider>,
    statuses: Table<Status>,
    availability_modes: Table<AvailabilityMode>,
    availability: Table<DoctorAvailability>,
    appointments: Table<Appointment>,
    medical_records: Table<MedicalRecord>,
    notifications: Table<Notification>,
    reports: Table<Report>,
}

impl LocalRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the standard roles, statuses,
    /// availability modes and specialties.
    pub fn with_reference_data() -> Self {
        let repo = Self::new();
        if let Err(e) = repo.seed_reference_data() {
            error!("Failed to seed local repository: {}", e);
        }
        repo
    }

    fn seed_reference_data(&self) -> RepositoryResult<()> {
        for (name, description) in seed::ROLES {
            self.roles.insert(Role {
                id: unsaved(),
                role_name: name.to_string(),
                description: Some(description.to_string()),
            })?;
        }
        for (name, color, description) in seed::STATUSES {
            self.statuses.insert(Status {
                id: unsaved(),
                name: name.to_string(),
                color: Some(color.to_string()),
                description: Some(description.to_string()),
                is_active: true,
            })?;
        }
        for name in seed::AVAILABILITY_MODES {
            self.availability_modes.insert(AvailabilityMode {
                id: unsaved(),
                name: name.to_string(),
                is_active: true,
            })?;
        }
        for (name, description) in seed::SPECIALTIES {
            self.specialties.insert(Specialty {
                id: unsaved(),
                name: name.to_string(),
                description: Some(description.to_string()),
                is_active: true,
            })?;
        }
        debug!(
            "Seeded local repository: {} roles, {} statuses",
            self.roles.len(),
            self.statuses.len()
        );
        Ok(())
    }

    fn hydrated<E: Entity>(&self, rows: Vec<E>) -> Vec<E>
    where
        Self: LocalTable<E>,
    {
        rows.into_iter()
            .map(|e| LocalTable::<E>::hydrate(self, e))
            .collect()
    }
}

macro_rules! local_table {
    ($entity:ty, $field:ident) => {
        impl LocalTable<$entity> for LocalRepository {
            fn table(&self) -> &Table<$entity> {
                &self.$field
            }
        }
    };
    ($entity:ty, $field:ident, |$repo:ident, $e:ident| $hydrate:block) => {
        impl LocalTable<$entity> for LocalRepository {
            fn table(&self) -> &Table<$entity> {
                &self.$field
            }

            fn hydrate(&self, mut $e: $entity) -> $entity {
                let $repo = self;
                $hydrate
                $e
            }
        }
    };
}

local_table!(Role, roles);
local_table!(User, users, |repo, user| {
    user.role = repo.roles.get(user.role_id);
});
local_table!(Specialty, specialties);
local_table!(Doctor, doctors, |repo, doctor| {
    doctor.specialty = repo.specialties.get(doctor.specialty_id);
});
local_table!(Patient, patients, |repo, patient| {
    patient.insurance_provider = patient
        .insurance_provider_id
        .and_then(|id| repo.insurance_providers.get(id));
});
local_table!(InsuranceProvider, insurance_providers);
local_table!(Status, statuses);
local_table!(AvailabilityMode, availability_modes);
local_table!(DoctorAvailability, availability);
local_table!(Appointment, appointments, |repo, appointment| {
    appointment.status = repo.statuses.get(appointment.status_id);
});
local_table!(MedicalRecord, medical_records);
local_table!(Notification, notifications);
local_table!(Report, reports);

#[async_trait]
impl<E> Repository<E> for LocalRepository
where
    E: Entity,
    LocalRepository: LocalTable<E>,
{
    async fn get_by_id(&self, id: E::Id) -> RepositoryResult<Option<E>> {
        let table = LocalTable::<E>::table(self);
        Ok(table.get(id).map(|e| LocalTable::<E>::hydrate(self, e)))
    }

    async fn get_all(&self) -> RepositoryResult<Vec<E>> {
        let rows = LocalTable::<E>::table(self).all();
        Ok(self.hydrated(rows))
    }

    async fn add(&self, entity: E) -> RepositoryResult<E> {
        let stored = LocalTable::<E>::table(self).insert(entity)?;
        debug!("Inserted {} id={}", E::NAME, stored.id());
        Ok(LocalTable::<E>::hydrate(self, stored))
    }

    async fn update(&self, entity: E) -> RepositoryResult<Option<E>> {
        let updated = LocalTable::<E>::table(self).replace(entity);
        Ok(updated.map(|e| LocalTable::<E>::hydrate(self, e)))
    }

    async fn delete(&self, id: E::Id) -> RepositoryResult<bool> {
        let removed = LocalTable::<E>::table(self).remove(id);
        if removed {
            debug!("Deleted {} id={}", E::NAME, id);
        }
        Ok(removed)
    }

    async fn exists(&self, id: E::Id) -> RepositoryResult<bool> {
        Ok(LocalTable::<E>::table(self).contains(id))
    }
}

#[async_trait]
impl RoleRepository for LocalRepository {
    async fn get_role_by_name(&self, name: &str) -> RepositoryResult<Option<Role>> {
        Ok(self.roles.find(|r| r.role_name == name))
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        Ok(self
            .users
            .find(|u| u.email == email)
            .map(|u| LocalTable::<User>::hydrate(self, u)))
    }

    async fn get_users_by_role_id(&self, role_id: RoleId) -> RepositoryResult<Vec<User>> {
        let rows = self.users.filter(|u| u.role_id == role_id);
        Ok(self.hydrated(rows))
    }
}

#[async_trait]
impl SpecialtyRepository for LocalRepository {
    async fn get_specialty_by_name(&self, name: &str) -> RepositoryResult<Option<Specialty>> {
        Ok(self.specialties.find(|s| s.name == name))
    }
}

#[async_trait]
impl DoctorRepository for LocalRepository {
    async fn get_doctors_by_specialty_id(
        &self,
        specialty_id: SpecialtyId,
    ) -> RepositoryResult<Vec<Doctor>> {
        let rows = self.doctors.filter(|d| d.specialty_id == specialty_id);
        Ok(self.hydrated(rows))
    }

    async fn get_doctor_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Doctor>> {
        Ok(self
            .doctors
            .find(|d| d.user_id == Some(user_id))
            .map(|d| LocalTable::<Doctor>::hydrate(self, d)))
    }
}

#[async_trait]
impl PatientRepository for LocalRepository {
    async fn get_patient_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Patient>> {
        Ok(self
            .patients
            .find(|p| p.user_id == Some(user_id))
            .map(|p| LocalTable::<Patient>::hydrate(self, p)))
    }

    async fn get_patients_by_insurance_provider_id(
        &self,
        provider_id: InsuranceProviderId,
    ) -> RepositoryResult<Vec<Patient>> {
        let rows = self
            .patients
            .filter(|p| p.insurance_provider_id == Some(provider_id));
        Ok(self.hydrated(rows))
    }
}

#[async_trait]
impl InsuranceProviderRepository for LocalRepository {
    async fn get_insurance_provider_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<InsuranceProvider>> {
        Ok(self.insurance_providers.find(|p| p.name == name))
    }
}

#[async_trait]
impl StatusRepository for LocalRepository {
    async fn get_status_by_name(&self, name: &str) -> RepositoryResult<Option<Status>> {
        Ok(self.statuses.find(|s| s.name == name))
    }
}

#[async_trait]
impl AvailabilityModeRepository for LocalRepository {
    async fn get_availability_mode_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<AvailabilityMode>> {
        Ok(self.availability_modes.find(|m| m.name == name))
    }
}

#[async_trait]
impl AvailabilityRepository for LocalRepository {
    async fn get_availability_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<DoctorAvailability>> {
        let mut rows = self.availability.filter(|a| a.doctor_id == doctor_id);
        rows.sort_by_key(|a| (a.available_date, a.start_time));
        Ok(rows)
    }

    async fn get_availability_by_doctor_and_date(
        &self,
        doctor_id: DoctorId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DoctorAvailability>> {
        let mut rows = self
            .availability
            .filter(|a| a.doctor_id == doctor_id && a.available_date == date);
        rows.sort_by_key(|a| a.start_time);
        Ok(rows)
    }
}

#[async_trait]
impl AppointmentRepository for LocalRepository {
    async fn get_appointments_by_patient_id(
        &self,
        patient_id: PatientId,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut rows = self.appointments.filter(|a| a.patient_id == patient_id);
        rows.sort_by_key(|a| a.scheduled_at);
        Ok(self.hydrated(rows))
    }

    async fn get_appointments_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut rows = self.appointments.filter(|a| a.doctor_id == doctor_id);
        rows.sort_by_key(|a| a.scheduled_at);
        Ok(self.hydrated(rows))
    }

    async fn get_appointments_by_status_id(
        &self,
        status_id: StatusId,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut rows = self.appointments.filter(|a| a.status_id == status_id);
        rows.sort_by_key(|a| a.scheduled_at);
        Ok(self.hydrated(rows))
    }

    async fn get_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Appointment>> {
        let mut rows = self
            .appointments
            .filter(|a| a.scheduled_at >= from && a.scheduled_at < to);
        rows.sort_by_key(|a| (a.scheduled_at, a.id));
        Ok(self.hydrated(rows))
    }
}

#[async_trait]
impl MedicalRecordRepository for LocalRepository {
    async fn get_medical_records_by_patient_id(
        &self,
        patient_id: PatientId,
    ) -> RepositoryResult<Vec<MedicalRecord>> {
        let mut rows = self.medical_records.filter(|r| r.patient_id == patient_id);
        rows.sort_by_key(|r| (r.record_date, r.id));
        Ok(rows)
    }

    async fn get_medical_records_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<MedicalRecord>> {
        let mut rows = self.medical_records.filter(|r| r.doctor_id == doctor_id);
        rows.sort_by_key(|r| (r.record_date, r.id));
        Ok(rows)
    }
}

#[async_trait]
impl NotificationRepository for LocalRepository {
    async fn get_notifications_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Notification>> {
        let mut rows = self.notifications.filter(|n| n.user_id == user_id);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn get_unread_notifications_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Notification>> {
        let mut rows = self
            .notifications
            .filter(|n| n.user_id == user_id && !n.is_read);
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

#[async_trait]
impl ReportRepository for LocalRepository {
    async fn get_reports_by_generated_by(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Report>> {
        Ok(self.reports.filter(|r| r.generated_by == Some(user_id)))
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}
