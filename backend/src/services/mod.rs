//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repositories. They are
//! plain async functions generic over the repository, so they run the same
//! against `LocalRepository`, `PostgresRepository` or `dyn FullRepository`.

pub mod appointments;
pub mod availability;
pub mod crud;
pub mod error;
pub mod medical_records;
pub mod notifications;
pub mod reports;
pub mod users;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_fixtures;


pub use error::{ServiceError, ServiceResult};
pub use validation::{Reference, UniqueKey, Validated};

use crate::db::repository::FullRepository;

/// Repository health check.
pub async fn health_check<R>(repo: &R) -> ServiceResult<bool>
where
    R: FullRepository + ?Sized,
{
    Ok(repo.health_check().await?)
}
