use serde::{Deserialize, Serialize};

use super::{default_true, patch, patch_opt, FromCreate, Resource};
use crate::models::{unsaved, Specialty, SpecialtyId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyDto {
    pub id: SpecialtyId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSpecialtyDto {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSpecialtyDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl Resource for Specialty {
    type Dto = SpecialtyDto;
    type Update = UpdateSpecialtyDto;
    const PATH: &'static str = "specialties";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> SpecialtyDto {
        SpecialtyDto {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    fn apply_update(&mut self, update: UpdateSpecialtyDto) {
        patch(&mut self.name, update.name);
        patch_opt(&mut self.description, update.description);
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for Specialty {
    type Create = CreateSpecialtyDto;

    fn from_create(create: CreateSpecialtyDto) -> Self {
        Specialty {
            id: unsaved(),
            name: create.name,
            description: create.description,
            is_active: create.is_active,
        }
    }
}
