use serde::{Deserialize, Serialize};

use super::{patch, patch_opt, FromCreate, Resource};
use crate::models::{unsaved, Role, RoleId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleDto {
    pub id: RoleId,
    pub role_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleDto {
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRoleDto {
    pub role_name: Option<String>,
    pub description: Option<String>,
}

impl Resource for Role {
    type Dto = RoleDto;
    type Update = UpdateRoleDto;
    const PATH: &'static str = "roles";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> RoleDto {
        RoleDto {
            id: self.id,
            role_name: self.role_name.clone(),
            description: self.description.clone(),
        }
    }

    fn apply_update(&mut self, update: UpdateRoleDto) {
        patch(&mut self.role_name, update.role_name);
        patch_opt(&mut self.description, update.description);
    }
}

impl FromCreate for Role {
    type Create = CreateRoleDto;

    fn from_create(create: CreateRoleDto) -> Self {
        Role {
            id: unsaved(),
            role_name: create.role_name,
            description: create.description,
        }
    }
}
