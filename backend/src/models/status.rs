use serde::{Deserialize, Serialize};

use super::StatusId;

pub const STATUS_SCHEDULED: &str = "Scheduled";
pub const STATUS_CANCELLED: &str = "Cancelled";

/// Lookup entity tagging the state of an appointment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: StatusId,
    pub name: String,
    /// Display color for views, e.g. `#2e7d32`.
    pub color: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
}

crate::impl_entity!(Status, StatusId, "status");
