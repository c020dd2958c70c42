//! Diesel row types and their conversions to domain entities.
//!
//! Each table has a `*Row` read from the database and a `New*Row` used both
//! for inserts and as the update changeset. Navigation references are not
//! stored; they are filled in after loading.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

use super::schema::{
    appointments, availability_modes, doctor_availability, doctors, insurance_providers,
    medical_records, notifications, patients, reports, roles, specialties, statuses, users,
};
use crate::db::repository::{ErrorContext, RepositoryError};
use crate::models::{
    Appointment, AppointmentId, AvailabilityId, AvailabilityMode, AvailabilityModeId, DayOfWeek,
    Doctor, DoctorAvailability, DoctorId, InsuranceProvider, InsuranceProviderId, MedicalRecord,
    MedicalRecordId, Notification, NotificationId, Patient, PatientId, PersonBase, Report,
    ReportId, Role, RoleId, Specialty, SpecialtyId, Status, StatusId, User, UserId,
};

fn bad_column(entity: &str, message: String) -> RepositoryError {
    RepositoryError::validation_with_context(message, ErrorContext::new("decode_row").with_entity(entity))
}

// ---------------------------------------------------------------------------
// roles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    pub id: i32,
    pub role_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = roles)]
#[diesel(treat_none_as_null = true)]
pub struct NewRoleRow {
    pub role_name: String,
    pub description: Option<String>,
}

impl From<&Role> for NewRoleRow {
    fn from(r: &Role) -> Self {
        Self {
            role_name: r.role_name.clone(),
            description: r.description.clone(),
        }
    }
}

impl TryFrom<RoleRow> for Role {
    type Error = RepositoryError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoleId(row.id),
            role_name: row.role_name,
            description: row.description,
        })
    }
}

// ---------------------------------------------------------------------------
// users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub struct NewUserRow {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for NewUserRow {
    fn from(u: &User) -> Self {
        Self {
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
            first_name: u.first_name.clone(),
            last_name: u.last_name.clone(),
            role_id: u.role_id.0,
            is_active: u.is_active,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            role_id: RoleId(row.role_id),
            role: None,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// specialties
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = specialties)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SpecialtyRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = specialties)]
#[diesel(treat_none_as_null = true)]
pub struct NewSpecialtyRow {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<&Specialty> for NewSpecialtyRow {
    fn from(s: &Specialty) -> Self {
        Self {
            name: s.name.clone(),
            description: s.description.clone(),
            is_active: s.is_active,
        }
    }
}

impl TryFrom<SpecialtyRow> for Specialty {
    type Error = RepositoryError;

    fn try_from(row: SpecialtyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: SpecialtyId(row.id),
            name: row.name,
            description: row.description,
            is_active: row.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// insurance_providers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = insurance_providers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InsuranceProviderRow {
    pub id: i32,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub coverage_details: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = insurance_providers)]
#[diesel(treat_none_as_null = true)]
pub struct NewInsuranceProviderRow {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub coverage_details: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&InsuranceProvider> for NewInsuranceProviderRow {
    fn from(p: &InsuranceProvider) -> Self {
        Self {
            name: p.name.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            website: p.website.clone(),
            coverage_details: p.coverage_details.clone(),
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl TryFrom<InsuranceProviderRow> for InsuranceProvider {
    type Error = RepositoryError;

    fn try_from(row: InsuranceProviderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: InsuranceProviderId(row.id),
            name: row.name,
            phone: row.phone,
            email: row.email,
            website: row.website,
            coverage_details: row.coverage_details,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// doctors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = doctors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DoctorRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i32>,
    pub specialty_id: i32,
    pub license_number: String,
    pub years_of_experience: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = doctors)]
#[diesel(treat_none_as_null = true)]
pub struct NewDoctorRow {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i32>,
    pub specialty_id: i32,
    pub license_number: String,
    pub years_of_experience: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Doctor> for NewDoctorRow {
    fn from(d: &Doctor) -> Self {
        let p = &d.person;
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            date_of_birth: p.date_of_birth,
            gender: p.gender.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
            user_id: d.user_id.map(|u| u.0),
            specialty_id: d.specialty_id.0,
            license_number: d.license_number.clone(),
            years_of_experience: d.years_of_experience,
            consultation_fee: d.consultation_fee,
            is_active: d.is_active,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

impl TryFrom<DoctorRow> for Doctor {
    type Error = RepositoryError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DoctorId(row.id),
            person: PersonBase {
                first_name: row.first_name,
                last_name: row.last_name,
                date_of_birth: row.date_of_birth,
                gender: row.gender,
                phone: row.phone,
                email: row.email,
                address: row.address,
            },
            user_id: row.user_id.map(UserId),
            specialty_id: SpecialtyId(row.specialty_id),
            specialty: None,
            license_number: row.license_number,
            years_of_experience: row.years_of_experience,
            consultation_fee: row.consultation_fee,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// patients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = patients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PatientRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i32>,
    pub insurance_provider_id: Option<i32>,
    pub policy_number: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = patients)]
#[diesel(treat_none_as_null = true)]
pub struct NewPatientRow {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub user_id: Option<i32>,
    pub insurance_provider_id: Option<i32>,
    pub policy_number: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Patient> for NewPatientRow {
    fn from(pt: &Patient) -> Self {
        let p = &pt.person;
        Self {
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            date_of_birth: p.date_of_birth,
            gender: p.gender.clone(),
            phone: p.phone.clone(),
            email: p.email.clone(),
            address: p.address.clone(),
            user_id: pt.user_id.map(|u| u.0),
            insurance_provider_id: pt.insurance_provider_id.map(|i| i.0),
            policy_number: pt.policy_number.clone(),
            blood_type: pt.blood_type.clone(),
            allergies: pt.allergies.clone(),
            emergency_contact_name: pt.emergency_contact_name.clone(),
            emergency_contact_phone: pt.emergency_contact_phone.clone(),
            is_active: pt.is_active,
            created_at: pt.created_at,
            updated_at: pt.updated_at,
        }
    }
}

impl TryFrom<PatientRow> for Patient {
    type Error = RepositoryError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PatientId(row.id),
            person: PersonBase {
                first_name: row.first_name,
                last_name: row.last_name,
                date_of_birth: row.date_of_birth,
                gender: row.gender,
                phone: row.phone,
                email: row.email,
                address: row.address,
            },
            user_id: row.user_id.map(UserId),
            insurance_provider_id: row.insurance_provider_id.map(InsuranceProviderId),
            insurance_provider: None,
            policy_number: row.policy_number,
            blood_type: row.blood_type,
            allergies: row.allergies,
            emergency_contact_name: row.emergency_contact_name,
            emergency_contact_phone: row.emergency_contact_phone,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = statuses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusRow {
    pub id: i32,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = statuses)]
#[diesel(treat_none_as_null = true)]
pub struct NewStatusRow {
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

impl From<&Status> for NewStatusRow {
    fn from(s: &Status) -> Self {
        Self {
            name: s.name.clone(),
            color: s.color.clone(),
            description: s.description.clone(),
            is_active: s.is_active,
        }
    }
}

impl TryFrom<StatusRow> for Status {
    type Error = RepositoryError;

    fn try_from(row: StatusRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StatusId(row.id),
            name: row.name,
            color: row.color,
            description: row.description,
            is_active: row.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// availability_modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = availability_modes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AvailabilityModeRow {
    pub id: i16,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = availability_modes)]
pub struct NewAvailabilityModeRow {
    pub name: String,
    pub is_active: bool,
}

impl From<&AvailabilityMode> for NewAvailabilityModeRow {
    fn from(m: &AvailabilityMode) -> Self {
        Self {
            name: m.name.clone(),
            is_active: m.is_active,
        }
    }
}

impl TryFrom<AvailabilityModeRow> for AvailabilityMode {
    type Error = RepositoryError;

    fn try_from(row: AvailabilityModeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AvailabilityModeId(row.id),
            name: row.name,
            is_active: row.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// doctor_availability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = doctor_availability)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AvailabilityRow {
    pub id: i32,
    pub doctor_id: i32,
    pub available_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub day_of_week: i16,
    pub availability_mode_id: Option<i16>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = doctor_availability)]
#[diesel(treat_none_as_null = true)]
pub struct NewAvailabilityRow {
    pub doctor_id: i32,
    pub available_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub day_of_week: i16,
    pub availability_mode_id: Option<i16>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&DoctorAvailability> for NewAvailabilityRow {
    fn from(a: &DoctorAvailability) -> Self {
        Self {
            doctor_id: a.doctor_id.0,
            available_date: a.available_date,
            start_time: a.start_time,
            end_time: a.end_time,
            day_of_week: a.day_of_week.as_i16(),
            availability_mode_id: a.availability_mode_id.map(|m| m.0),
            is_active: a.is_active,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl TryFrom<AvailabilityRow> for DoctorAvailability {
    type Error = RepositoryError;

    fn try_from(row: AvailabilityRow) -> Result<Self, Self::Error> {
        let day_of_week =
            DayOfWeek::try_from(row.day_of_week).map_err(|e| bad_column("availability", e))?;
        Ok(Self {
            id: AvailabilityId(row.id),
            doctor_id: DoctorId(row.doctor_id),
            available_date: row.available_date,
            start_time: row.start_time,
            end_time: row.end_time,
            day_of_week,
            availability_mode_id: row.availability_mode_id.map(AvailabilityModeId),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// appointments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AppointmentRow {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub status_id: i32,
    pub availability_id: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = appointments)]
#[diesel(treat_none_as_null = true)]
pub struct NewAppointmentRow {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub status_id: i32,
    pub availability_id: Option<i32>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Appointment> for NewAppointmentRow {
    fn from(a: &Appointment) -> Self {
        Self {
            patient_id: a.patient_id.0,
            doctor_id: a.doctor_id.0,
            status_id: a.status_id.0,
            availability_id: a.availability_id.map(|v| v.0),
            scheduled_at: a.scheduled_at,
            duration_minutes: a.duration_minutes,
            reason: a.reason.clone(),
            notes: a.notes.clone(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = RepositoryError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: AppointmentId(row.id),
            patient_id: PatientId(row.patient_id),
            doctor_id: DoctorId(row.doctor_id),
            status_id: StatusId(row.status_id),
            status: None,
            availability_id: row.availability_id.map(AvailabilityId),
            scheduled_at: row.scheduled_at,
            duration_minutes: row.duration_minutes,
            reason: row.reason,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// medical_records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = medical_records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MedicalRecordRow {
    pub id: i32,
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_id: Option<i32>,
    pub record_date: NaiveDate,
    pub diagnosis: String,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = medical_records)]
#[diesel(treat_none_as_null = true)]
pub struct NewMedicalRecordRow {
    pub patient_id: i32,
    pub doctor_id: i32,
    pub appointment_id: Option<i32>,
    pub record_date: NaiveDate,
    pub diagnosis: String,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&MedicalRecord> for NewMedicalRecordRow {
    fn from(r: &MedicalRecord) -> Self {
        Self {
            patient_id: r.patient_id.0,
            doctor_id: r.doctor_id.0,
            appointment_id: r.appointment_id.map(|a| a.0),
            record_date: r.record_date,
            diagnosis: r.diagnosis.clone(),
            treatment: r.treatment.clone(),
            prescription: r.prescription.clone(),
            notes: r.notes.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

impl TryFrom<MedicalRecordRow> for MedicalRecord {
    type Error = RepositoryError;

    fn try_from(row: MedicalRecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MedicalRecordId(row.id),
            patient_id: PatientId(row.patient_id),
            doctor_id: DoctorId(row.doctor_id),
            appointment_id: row.appointment_id.map(AppointmentId),
            record_date: row.record_date,
            diagnosis: row.diagnosis,
            treatment: row.treatment,
            prescription: row.prescription,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// ---------------------------------------------------------------------------
// notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NotificationRow {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = notifications)]
#[diesel(treat_none_as_null = true)]
pub struct NewNotificationRow {
    pub user_id: i32,
    pub title: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl From<&Notification> for NewNotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            user_id: n.user_id.0,
            title: n.title.clone(),
            message: n.message.clone(),
            kind: n.kind.as_str().to_string(),
            is_read: n.is_read,
            created_at: n.created_at,
            read_at: n.read_at,
        }
    }
}

impl TryFrom<NotificationRow> for Notification {
    type Error = RepositoryError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: NotificationId(row.id),
            user_id: UserId(row.user_id),
            title: row.title,
            message: row.message,
            kind: row.kind.parse().map_err(|e| bad_column("notification", e))?,
            is_read: row.is_read,
            created_at: row.created_at,
            read_at: row.read_at,
        })
    }
}

// ---------------------------------------------------------------------------
// reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReportRow {
    pub id: i32,
    pub title: String,
    pub kind: String,
    pub generated_by: Option<i32>,
    pub parameters: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = reports)]
#[diesel(treat_none_as_null = true)]
pub struct NewReportRow {
    pub title: String,
    pub kind: String,
    pub generated_by: Option<i32>,
    pub parameters: Value,
    pub created_at: DateTime<Utc>,
}

impl From<&Report> for NewReportRow {
    fn from(r: &Report) -> Self {
        Self {
            title: r.title.clone(),
            kind: r.kind.as_str().to_string(),
            generated_by: r.generated_by.map(|u| u.0),
            parameters: r.parameters.clone(),
            created_at: r.created_at,
        }
    }
}

impl TryFrom<ReportRow> for Report {
    type Error = RepositoryError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ReportId(row.id),
            title: row.title,
            kind: row.kind.parse().map_err(|e| bad_column("report", e))?,
            generated_by: row.generated_by.map(UserId),
            parameters: row.parameters,
            created_at: row.created_at,
        })
    }
}
