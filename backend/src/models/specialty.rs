use serde::{Deserialize, Serialize};

use super::SpecialtyId;

/// Medical specialty a [`Doctor`](super::Doctor) practices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialty {
    pub id: SpecialtyId,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

crate::impl_entity!(Specialty, SpecialtyId, "specialty");
