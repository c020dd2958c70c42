use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{AppointmentId, AvailabilityId, DoctorId, PatientId, Status, StatusId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub status_id: StatusId,
    #[serde(default)]
    pub status: Option<Status>,
    /// Availability slot the appointment was booked against, if any.
    pub availability_id: Option<AvailabilityId>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_entity!(Appointment, AppointmentId, "appointment", audited);

impl Appointment {
    pub fn ends_at(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
    }
}
