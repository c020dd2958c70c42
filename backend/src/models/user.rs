use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, RoleId, UserId};

/// An account that can sign in to the system.
///
/// `role` is the resolved navigation reference; repositories fill it on
/// reads and ignore it on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    #[serde(default)]
    pub role: Option<Role>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

crate::impl_entity!(User, UserId, "user", audited);

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|r| r.role_name.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_ref().map(Role::is_admin).unwrap_or(false)
    }
}

/// Normalize an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Jane.Doe@Clinic.ORG "), "jane.doe@clinic.org");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: UserId(1),
            email: "a@b.c".to_string(),
            password_hash: "secret-hash".to_string(),
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            role_id: RoleId(1),
            role: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!user.is_admin());
    }
}
