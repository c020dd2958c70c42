use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{patch, patch_opt, FromCreate, Resource};
use crate::models::{
    unsaved, Appointment, AppointmentId, AvailabilityId, DoctorId, PatientId, StatusId,
};

fn default_duration() -> i32 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentDto {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub status_id: StatusId,
    pub status_name: String,
    pub status_color: Option<String>,
    pub availability_id: Option<AvailabilityId>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Without `status_id` the appointment is booked as `Scheduled`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentDto {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    #[serde(default)]
    pub status_id: Option<StatusId>,
    #[serde(default)]
    pub availability_id: Option<AvailabilityId>,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentDto {
    pub patient_id: Option<PatientId>,
    pub doctor_id: Option<DoctorId>,
    pub status_id: Option<StatusId>,
    pub availability_id: Option<AvailabilityId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl Resource for Appointment {
    type Dto = AppointmentDto;
    type Update = UpdateAppointmentDto;
    const PATH: &'static str = "appointments";

    fn to_dto(&self) -> AppointmentDto {
        AppointmentDto {
            id: self.id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            status_id: self.status_id,
            status_name: self
                .status
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            status_color: self.status.as_ref().and_then(|s| s.color.clone()),
            availability_id: self.availability_id,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes,
            reason: self.reason.clone(),
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdateAppointmentDto) {
        patch(&mut self.patient_id, update.patient_id);
        patch(&mut self.doctor_id, update.doctor_id);
        if let Some(status_id) = update.status_id {
            if status_id != self.status_id {
                self.status_id = status_id;
                self.status = None;
            }
        }
        patch_opt(&mut self.availability_id, update.availability_id);
        patch(&mut self.scheduled_at, update.scheduled_at);
        patch(&mut self.duration_minutes, update.duration_minutes);
        patch_opt(&mut self.reason, update.reason);
        patch_opt(&mut self.notes, update.notes);
    }
}

impl FromCreate for Appointment {
    type Create = CreateAppointmentDto;

    fn from_create(create: CreateAppointmentDto) -> Self {
        Appointment {
            id: unsaved(),
            patient_id: create.patient_id,
            doctor_id: create.doctor_id,
            status_id: create.status_id.unwrap_or_else(unsaved),
            status: None,
            availability_id: create.availability_id,
            scheduled_at: create.scheduled_at,
            duration_minutes: create.duration_minutes,
            reason: create.reason,
            notes: create.notes,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
