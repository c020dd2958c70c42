use serde::{Deserialize, Serialize};

use super::{default_true, patch, patch_opt, FromCreate, Resource};
use crate::models::{unsaved, Status, StatusId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDto {
    pub id: StatusId,
    pub name: String,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateStatusDto {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStatusDto {
    pub name: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

impl Resource for Status {
    type Dto = StatusDto;
    type Update = UpdateStatusDto;
    const PATH: &'static str = "statuses";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> StatusDto {
        StatusDto {
            id: self.id,
            name: self.name.clone(),
            color: self.color.clone(),
            description: self.description.clone(),
            is_active: self.is_active,
        }
    }

    fn apply_update(&mut self, update: UpdateStatusDto) {
        patch(&mut self.name, update.name);
        patch_opt(&mut self.color, update.color);
        patch_opt(&mut self.description, update.description);
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for Status {
    type Create = CreateStatusDto;

    fn from_create(create: CreateStatusDto) -> Self {
        Status {
            id: unsaved(),
            name: create.name,
            color: create.color,
            description: create.description,
            is_active: create.is_active,
        }
    }
}
