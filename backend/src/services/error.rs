//! Error type shared by every service.

use crate::db::repository::RepositoryError;
use crate::models::{Entity, EntityId};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed field validation or references a missing record.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique value is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found<E: Entity>(id: E::Id) -> Self {
        Self::NotFound {
            entity: E::NAME,
            id: id.to_string(),
        }
    }

    pub fn not_found_raw(entity: &'static str, id: impl EntityId) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Doctor, DoctorId};

    #[test]
    fn test_not_found_message_names_entity() {
        let err = ServiceError::not_found::<Doctor>(DoctorId::new(4));
        assert_eq!(err.to_string(), "doctor 4 not found");
    }

    #[test]
    fn test_repository_error_is_transparent() {
        let err: ServiceError = RepositoryError::query("boom").into();
        assert!(err.to_string().starts_with("Query error: boom"));
    }
}
