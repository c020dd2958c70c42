use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InsuranceProvider, InsuranceProviderId, PatientId, PersonBase, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub person: PersonBase,
    pub user_id: Option<UserId>,
    pub insurance_provider_id: Option<InsuranceProviderId>,
    #[serde(default)]
    pub insurance_provider: Option<InsuranceProvider>,
    pub policy_number: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_entity!(Patient, PatientId, "patient", audited);
