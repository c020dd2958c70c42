//! Write-side checks applied by [`crud`](super::crud) before anything is
//! stored: field rules, referenced ids and unique keys.

use crate::db::repository::{FullRepository, Repository, RepositoryResult};
use crate::models::user::normalize_email;
use crate::models::{
    Appointment, AppointmentId, AvailabilityId, AvailabilityMode, AvailabilityModeId, Doctor,
    DoctorAvailability, DoctorId, EntityId, InsuranceProvider, InsuranceProviderId,
    MedicalRecord, Notification, Patient, PatientId, Report, Role, RoleId, Specialty,
    SpecialtyId, Status, StatusId, User, UserId,
};

/// A foreign key carried by an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Role(RoleId),
    User(UserId),
    Specialty(SpecialtyId),
    Doctor(DoctorId),
    Patient(PatientId),
    InsuranceProvider(InsuranceProviderId),
    Status(StatusId),
    AvailabilityMode(AvailabilityModeId),
    Availability(AvailabilityId),
    Appointment(AppointmentId),
}

impl Reference {
    pub async fn exists<R>(&self, repo: &R) -> RepositoryResult<bool>
    where
        R: FullRepository + ?Sized,
    {
        match *self {
            Reference::Role(id) => Repository::<Role>::exists(repo, id).await,
            Reference::User(id) => Repository::<User>::exists(repo, id).await,
            Reference::Specialty(id) => Repository::<Specialty>::exists(repo, id).await,
            Reference::Doctor(id) => Repository::<Doctor>::exists(repo, id).await,
            Reference::Patient(id) => Repository::<Patient>::exists(repo, id).await,
            Reference::InsuranceProvider(id) => {
                Repository::<InsuranceProvider>::exists(repo, id).await
            }
            Reference::Status(id) => Repository::<Status>::exists(repo, id).await,
            Reference::AvailabilityMode(id) => {
                Repository::<AvailabilityMode>::exists(repo, id).await
            }
            Reference::Availability(id) => {
                Repository::<DoctorAvailability>::exists(repo, id).await
            }
            Reference::Appointment(id) => Repository::<Appointment>::exists(repo, id).await,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Reference::Role(id) => format!("role {}", id),
            Reference::User(id) => format!("user {}", id),
            Reference::Specialty(id) => format!("specialty {}", id),
            Reference::Doctor(id) => format!("doctor {}", id),
            Reference::Patient(id) => format!("patient {}", id),
            Reference::InsuranceProvider(id) => format!("insurance provider {}", id),
            Reference::Status(id) => format!("status {}", id),
            Reference::AvailabilityMode(id) => format!("availability mode {}", id),
            Reference::Availability(id) => format!("availability {}", id),
            Reference::Appointment(id) => format!("appointment {}", id),
        }
    }
}

/// A value that must be unique across one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey<'a> {
    UserEmail(&'a str),
    RoleName(&'a str),
    SpecialtyName(&'a str),
    StatusName(&'a str),
    InsuranceProviderName(&'a str),
    AvailabilityModeName(&'a str),
}

impl UniqueKey<'_> {
    /// Id of the record currently holding this key, if any.
    pub async fn owner<R>(&self, repo: &R) -> RepositoryResult<Option<i64>>
    where
        R: FullRepository + ?Sized,
    {
        Ok(match *self {
            UniqueKey::UserEmail(v) => repo.get_user_by_email(v).await?.map(|e| e.id.as_i64()),
            UniqueKey::RoleName(v) => repo.get_role_by_name(v).await?.map(|e| e.id.as_i64()),
            UniqueKey::SpecialtyName(v) => {
                repo.get_specialty_by_name(v).await?.map(|e| e.id.as_i64())
            }
            UniqueKey::StatusName(v) => repo.get_status_by_name(v).await?.map(|e| e.id.as_i64()),
            UniqueKey::InsuranceProviderName(v) => repo
                .get_insurance_provider_by_name(v)
                .await?
                .map(|e| e.id.as_i64()),
            UniqueKey::AvailabilityModeName(v) => repo
                .get_availability_mode_by_name(v)
                .await?
                .map(|e| e.id.as_i64()),
        })
    }

    pub fn describe(&self) -> String {
        match self {
            UniqueKey::UserEmail(v) => format!("email '{}' is already registered", v),
            UniqueKey::RoleName(v) => format!("role '{}' already exists", v),
            UniqueKey::SpecialtyName(v) => format!("specialty '{}' already exists", v),
            UniqueKey::StatusName(v) => format!("status '{}' already exists", v),
            UniqueKey::InsuranceProviderName(v) => {
                format!("insurance provider '{}' already exists", v)
            }
            UniqueKey::AvailabilityModeName(v) => {
                format!("availability mode '{}' already exists", v)
            }
        }
    }
}

/// Entity-specific write rules.
pub trait Validated {
    /// Canonicalize fields before validation (trim, lowercase, derived values).
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), String> {
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        Vec::new()
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        None
    }
}

fn require(value: &str, field: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} is required", field))
    } else {
        Ok(())
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

impl Validated for Role {
    fn normalize(&mut self) {
        trim_in_place(&mut self.role_name);
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.role_name, "role_name")
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::RoleName(&self.role_name))
    }
}

impl Validated for User {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
        trim_in_place(&mut self.first_name);
        trim_in_place(&mut self.last_name);
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.email, "email")?;
        if !self.email.contains('@') {
            return Err(format!("'{}' is not a valid email address", self.email));
        }
        require(&self.first_name, "first_name")?;
        require(&self.last_name, "last_name")?;
        require(&self.password_hash, "password")
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::Role(self.role_id)]
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::UserEmail(&self.email))
    }
}

impl Validated for Specialty {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.name, "name")
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::SpecialtyName(&self.name))
    }
}

impl Validated for Doctor {
    fn normalize(&mut self) {
        self.person.normalize();
        trim_in_place(&mut self.license_number);
    }

    fn validate(&self) -> Result<(), String> {
        self.person.validate()?;
        require(&self.license_number, "license_number")?;
        if self.years_of_experience.is_some_and(|y| y < 0) {
            return Err("years_of_experience cannot be negative".to_string());
        }
        if self.consultation_fee.is_some_and(|f| f < 0.0 || !f.is_finite()) {
            return Err("consultation_fee must be a non-negative amount".to_string());
        }
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::Specialty(self.specialty_id)];
        refs.extend(self.user_id.map(Reference::User));
        refs
    }
}

impl Validated for Patient {
    fn normalize(&mut self) {
        self.person.normalize();
    }

    fn validate(&self) -> Result<(), String> {
        self.person.validate()
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = Vec::new();
        refs.extend(self.user_id.map(Reference::User));
        refs.extend(self.insurance_provider_id.map(Reference::InsuranceProvider));
        refs
    }
}

impl Validated for InsuranceProvider {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.name, "name")
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::InsuranceProviderName(&self.name))
    }
}

impl Validated for Status {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.name, "name")?;
        match &self.color {
            Some(c) if !c.starts_with('#') => {
                Err(format!("color '{}' must be a hex value like #1976d2", c))
            }
            _ => Ok(()),
        }
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::StatusName(&self.name))
    }
}

impl Validated for AvailabilityMode {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
    }

    fn validate(&self) -> Result<(), String> {
        require(&self.name, "name")
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey::AvailabilityModeName(&self.name))
    }
}

impl Validated for DoctorAvailability {
    fn normalize(&mut self) {
        self.sync_day_of_week();
    }

    fn validate(&self) -> Result<(), String> {
        if self.start_time >= self.end_time {
            return Err(format!(
                "start_time {} must be before end_time {}",
                self.start_time, self.end_time
            ));
        }
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![Reference::Doctor(self.doctor_id)];
        refs.extend(self.availability_mode_id.map(Reference::AvailabilityMode));
        refs
    }
}

impl Validated for Appointment {
    fn validate(&self) -> Result<(), String> {
        if self.duration_minutes <= 0 {
            return Err("duration_minutes must be positive".to_string());
        }
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::Patient(self.patient_id),
            Reference::Doctor(self.doctor_id),
            Reference::Status(self.status_id),
        ];
        refs.extend(self.availability_id.map(Reference::Availability));
        refs
    }
}

impl Validated for MedicalRecord {
    fn validate(&self) -> Result<(), String> {
        require(&self.diagnosis, "diagnosis")
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::Patient(self.patient_id),
            Reference::Doctor(self.doctor_id),
        ];
        refs.extend(self.appointment_id.map(Reference::Appointment));
        refs
    }
}

impl Validated for Notification {
    fn validate(&self) -> Result<(), String> {
        require(&self.title, "title")?;
        require(&self.message, "message")
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::User(self.user_id)]
    }
}

impl Validated for Report {
    fn validate(&self) -> Result<(), String> {
        require(&self.title, "title")?;
        if !self.parameters.is_object() && !self.parameters.is_null() {
            return Err("parameters must be a JSON object".to_string());
        }
        Ok(())
    }

    fn references(&self) -> Vec<Reference> {
        self.generated_by.map(Reference::User).into_iter().collect()
    }
}
