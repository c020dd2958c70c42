use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::InsuranceProviderId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceProvider {
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

crate::impl_entity!(InsuranceProvider, InsuranceProviderId, "insurance provider", audited);
