use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{patch, Resource};
use crate::models::{RoleId, User, UserId};

/// Accounts are created through the user service, which hashes the password.
pub use crate::services::users::NewUser as CreateUserDto;

/// Password hashes never leave the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    pub role_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserDto {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<RoleId>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordDto {
    /// Required unless an administrator changes someone else's password.
    #[serde(default)]
    pub current_password: Option<String>,
    pub new_password: String,
}

impl Resource for User {
    type Dto = UserDto;
    type Update = UpdateUserDto;
    const PATH: &'static str = "users";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role_id: self.role_id,
            role_name: self.role_name().unwrap_or_default().to_string(),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdateUserDto) {
        patch(&mut self.email, update.email);
        patch(&mut self.first_name, update.first_name);
        patch(&mut self.last_name, update.last_name);
        if let Some(role_id) = update.role_id {
            if role_id != self.role_id {
                self.role_id = role_id;
                self.role = None;
            }
        }
        patch(&mut self.is_active, update.is_active);
    }
}
