use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{DoctorId, PersonBase, Specialty, SpecialtyId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: DoctorId,
    pub person: PersonBase,
    /// Login account of the doctor, when they have one.
    pub user_id: Option<UserId>,
    pub specialty_id: SpecialtyId,
    #[serde(default)]
    pub specialty: Option<Specialty>,
    pub license_number: String,
    pub years_of_experience: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_entity!(Doctor, DoctorId, "doctor", audited);

impl Doctor {
    pub fn display_name(&self) -> String {
        format!("Dr. {}", self.person.full_name())
    }
}
