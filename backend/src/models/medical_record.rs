use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{AppointmentId, DoctorId, MedicalRecordId, PatientId};

/// Clinical note owned by a patient and written by a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalRecord {
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

crate::impl_entity!(MedicalRecord, MedicalRecordId, "medical record", audited);
