use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{default_true, patch, patch_opt, FromCreate, PersonUpdate, Resource};
use crate::models::{unsaved, InsuranceProviderId, Patient, PatientId, PersonBase, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDto {
    pub id: PatientId,
    #[serde(flatten)]
    pub person: PersonBase,
    pub user_id: Option<UserId>,
    pub insurance_provider_id: Option<InsuranceProviderId>,
    pub insurance_provider_name: String,
    pub policy_number: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePatientDto {
    #[serde(flatten)]
    pub person: PersonBase,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub insurance_provider_id: Option<InsuranceProviderId>,
    #[serde(default)]
    pub policy_number: Option<String>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub emergency_contact_name: Option<String>,
    #[serde(default)]
    pub emergency_contact_phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePatientDto {
    #[serde(flatten)]
    pub person: PersonUpdate,
    pub user_id: Option<UserId>,
    pub insurance_provider_id: Option<InsuranceProviderId>,
    pub policy_number: Option<String>,
    pub blood_type: Option<String>,
    pub allergies: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub is_active: Option<bool>,
}

impl Resource for Patient {
    type Dto = PatientDto;
    type Update = UpdatePatientDto;
    const PATH: &'static str = "patients";

    fn to_dto(&self) -> PatientDto {
        PatientDto {
            id: self.id,
            person: self.person.clone(),
            user_id: self.user_id,
            insurance_provider_id: self.insurance_provider_id,
            insurance_provider_name: self
                .insurance_provider
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            policy_number: self.policy_number.clone(),
            blood_type: self.blood_type.clone(),
            allergies: self.allergies.clone(),
            emergency_contact_name: self.emergency_contact_name.clone(),
            emergency_contact_phone: self.emergency_contact_phone.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdatePatientDto) {
        update.person.apply(&mut self.person);
        patch_opt(&mut self.user_id, update.user_id);
        if update.insurance_provider_id.is_some()
            && update.insurance_provider_id != self.insurance_provider_id
        {
            self.insurance_provider_id = update.insurance_provider_id;
            self.insurance_provider = None;
        }
        patch_opt(&mut self.policy_number, update.policy_number);
        patch_opt(&mut self.blood_type, update.blood_type);
        patch_opt(&mut self.allergies, update.allergies);
        patch_opt(&mut self.emergency_contact_name, update.emergency_contact_name);
        patch_opt(
            &mut self.emergency_contact_phone,
            update.emergency_contact_phone,
        );
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for Patient {
    type Create = CreatePatientDto;

    fn from_create(create: CreatePatientDto) -> Self {
        Patient {
            id: unsaved(),
            person: create.person,
            user_id: create.user_id,
            insurance_provider_id: create.insurance_provider_id,
            insurance_provider: None,
            policy_number: create.policy_number,
            blood_type: create.blood_type,
            allergies: create.allergies,
            emergency_contact_name: create.emergency_contact_name,
            emergency_contact_phone: create.emergency_contact_phone,
            is_active: create.is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
