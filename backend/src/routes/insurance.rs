use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{default_true, patch, patch_opt, FromCreate, Resource};
use crate::models::{unsaved, InsuranceProvider, InsuranceProviderId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceProviderDto {
    pub id: InsuranceProviderId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub coverage_details: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInsuranceProviderDto {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub coverage_details: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInsuranceProviderDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub coverage_details: Option<String>,
    pub is_active: Option<bool>,
}

impl Resource for InsuranceProvider {
    type Dto = InsuranceProviderDto;
    type Update = UpdateInsuranceProviderDto;
    const PATH: &'static str = "insurance-providers";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> InsuranceProviderDto {
        InsuranceProviderDto {
            id: self.id,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            website: self.website.clone(),
            coverage_details: self.coverage_details.clone(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdateInsuranceProviderDto) {
        patch(&mut self.name, update.name);
        patch_opt(&mut self.phone, update.phone);
        patch_opt(&mut self.email, update.email);
        patch_opt(&mut self.website, update.website);
        patch_opt(&mut self.coverage_details, update.coverage_details);
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for InsuranceProvider {
    type Create = CreateInsuranceProviderDto;

    fn from_create(create: CreateInsuranceProviderDto) -> Self {
        InsuranceProvider {
            id: unsaved(),
            name: create.name,
            phone: create.phone,
            email: create.email,
            website: create.website,
            coverage_details: create.coverage_details,
            is_active: create.is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
