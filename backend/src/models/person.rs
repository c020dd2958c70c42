//! Person fields shared by doctors and patients.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Common person shape embedded in [`Doctor`](super::Doctor) and
/// [`Patient`](super::Patient).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonBase {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl PersonBase {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Trim names and drop blank optional fields.
    pub fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        for field in [
            &mut self.gender,
            &mut self.phone,
            &mut self.email,
            &mut self.address,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
    }

    /// Check the fields every person record must carry.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("first_name must not be empty".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("last_name must not be empty".to_string());
        }
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(format!("'{}' is not a valid email address", email));
            }
        }
        Ok(())
    }
}
