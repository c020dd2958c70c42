use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{patch, patch_opt, FromCreate, Resource};
use crate::models::{unsaved, AppointmentId, DoctorId, MedicalRecord, MedicalRecordId, PatientId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecordDto {
    pub id: MedicalRecordId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub appointment_id: Option<AppointmentId>,
    pub record_date: NaiveDate,
    pub diagnosis: String,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMedicalRecordDto {
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    #[serde(default)]
    pub appointment_id: Option<AppointmentId>,
    /// Defaults to today.
    #[serde(default)]
    pub record_date: Option<NaiveDate>,
    pub diagnosis: String,
    #[serde(default)]
    pub treatment: Option<String>,
    #[serde(default)]
    pub prescription: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMedicalRecordDto {
    pub appointment_id: Option<AppointmentId>,
    pub record_date: Option<NaiveDate>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub prescription: Option<String>,
    pub notes: Option<String>,
}

impl Resource for MedicalRecord {
    type Dto = MedicalRecordDto;
    type Update = UpdateMedicalRecordDto;
    const PATH: &'static str = "medical-records";

    fn to_dto(&self) -> MedicalRecordDto {
        MedicalRecordDto {
            id: self.id,
            patient_id: self.patient_id,
            doctor_id: self.doctor_id,
            appointment_id: self.appointment_id,
            record_date: self.record_date,
            diagnosis: self.diagnosis.clone(),
            treatment: self.treatment.clone(),
            prescription: self.prescription.clone(),
            notes: self.notes.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdateMedicalRecordDto) {
        patch_opt(&mut self.appointment_id, update.appointment_id);
        patch(&mut self.record_date, update.record_date);
        patch(&mut self.diagnosis, update.diagnosis);
        patch_opt(&mut self.treatment, update.treatment);
        patch_opt(&mut self.prescription, update.prescription);
        patch_opt(&mut self.notes, update.notes);
    }
}

impl FromCreate for MedicalRecord {
    type Create = CreateMedicalRecordDto;

    fn from_create(create: CreateMedicalRecordDto) -> Self {
        let now = Utc::now();
        MedicalRecord {
            id: unsaved(),
            patient_id: create.patient_id,
            doctor_id: create.doctor_id,
            appointment_id: create.appointment_id,
            record_date: create.record_date.unwrap_or_else(|| now.date_naive()),
            diagnosis: create.diagnosis,
            treatment: create.treatment,
            prescription: create.prescription,
            notes: create.notes,
            created_at: now,
            updated_at: None,
        }
    }
}
