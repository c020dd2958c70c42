use serde::{Deserialize, Serialize};

use super::RoleId;

/// Name of the role allowed to administer users and reference data.
pub const ADMIN_ROLE: &str = "Admin";
/// Role given to self-registered accounts.
pub const PATIENT_ROLE: &str = "Patient";
pub const DOCTOR_ROLE: &str = "Doctor";

/// Authorization role assigned to a [`User`](super::User).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub role_name: String,
    pub description: Option<String>,
}

crate::impl_entity!(Role, RoleId, "role");

impl Role {
    pub fn is_admin(&self) -> bool {
        self.role_name.eq_ignore_ascii_case(ADMIN_ROLE)
    }
}
