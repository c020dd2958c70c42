//! Generic create/read/update/delete over any [`Entity`].
//!
//! Writes go through the same pipeline for every entity: normalize, field
//! validation, referenced-id checks, unique-key checks, audit stamping.

use chrono::Utc;
use log::{debug, info};

use super::error::{ServiceError, ServiceResult};
use super::validation::Validated;
use crate::db::repository::{FullRepository, Repository};
use crate::models::{unsaved, Entity, EntityId};

pub async fn get<E, R>(repo: &R, id: E::Id) -> ServiceResult<E>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    Repository::<E>::get_by_id(repo, id)
        .await?
        .ok_or_else(|| ServiceError::not_found::<E>(id))
}

pub async fn list<E, R>(repo: &R) -> ServiceResult<Vec<E>>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    Ok(Repository::<E>::get_all(repo).await?)
}

pub async fn exists<E, R>(repo: &R, id: E::Id) -> ServiceResult<bool>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    Ok(Repository::<E>::exists(repo, id).await?)
}

/// Fail with [`ServiceError::NotFound`] unless a record with `id` exists.
pub async fn ensure_exists<E, R>(repo: &R, id: E::Id) -> ServiceResult<()>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    if Repository::<E>::exists(repo, id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found::<E>(id))
    }
}

async fn check_write<E, R>(repo: &R, entity: &E, current: Option<E::Id>) -> ServiceResult<()>
where
    E: Entity + Validated,
    R: FullRepository + ?Sized,
{
    entity.validate().map_err(ServiceError::Validation)?;

    for reference in entity.references() {
        if !reference.exists(repo).await? {
            return Err(ServiceError::Validation(format!(
                "{} does not exist",
                reference.describe()
            )));
        }
    }

    if let Some(key) = entity.unique_key() {
        if let Some(owner) = key.owner(repo).await? {
            if current.map(EntityId::as_i64) != Some(owner) {
                return Err(ServiceError::Conflict(key.describe()));
            }
        }
    }

    Ok(())
}

/// Validate and store a new record. Any id on the input is ignored.
pub async fn create<E, R>(repo: &R, mut entity: E) -> ServiceResult<E>
where
    E: Entity + Validated,
    R: FullRepository + Repository<E> + ?Sized,
{
    entity.normalize();
    check_write(repo, &entity, None).await?;

    entity.set_id(unsaved());
    entity.stamp_created(Utc::now());

    let stored = Repository::<E>::add(repo, entity).await?;
    info!("Created {} id={}", E::NAME, stored.id());
    Ok(stored)
}

/// Validate and replace an existing record.
pub async fn update<E, R>(repo: &R, mut entity: E) -> ServiceResult<E>
where
    E: Entity + Validated,
    R: FullRepository + Repository<E> + ?Sized,
{
    let id = entity.id();
    entity.normalize();
    check_write(repo, &entity, Some(id)).await?;

    entity.stamp_updated(Utc::now());

    let updated = Repository::<E>::update(repo, entity)
        .await?
        .ok_or_else(|| ServiceError::not_found::<E>(id))?;
    debug!("Updated {} id={}", E::NAME, id);
    Ok(updated)
}

/// Load a record, apply `change` to it and store the result.
pub async fn modify<E, R, F>(repo: &R, id: E::Id, change: F) -> ServiceResult<E>
where
    E: Entity + Validated,
    R: FullRepository + Repository<E> + ?Sized,
    F: FnOnce(&mut E) + Send,
{
    let mut entity = get::<E, R>(repo, id).await?;
    change(&mut entity);
    entity.set_id(id);
    update(repo, entity).await
}

pub async fn delete<E, R>(repo: &R, id: E::Id) -> ServiceResult<()>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    if Repository::<E>::delete(repo, id).await? {
        info!("Deleted {} id={}", E::NAME, id);
        Ok(())
    } else {
        Err(ServiceError::not_found::<E>(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::{Role, RoleId, Specialty, SpecialtyId};

    fn specialty(name: &str) -> Specialty {
        Specialty {
            id: unsaved(),
            name: name.to_string(),
            description: None,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let repo = LocalRepository::new();
        let created = create(&repo, specialty("Neurology")).await.unwrap();
        let fetched: Specialty = get(&repo, created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let repo = LocalRepository::new();
        create(&repo, specialty("Neurology")).await.unwrap();
        let err = create(&repo, specialty(" Neurology ")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_keeps_own_unique_key() {
        let repo = LocalRepository::new();
        let mut s = create(&repo, specialty("Neurology")).await.unwrap();
        s.description = Some("Brain and nerves".to_string());
        let updated = update(&repo, s).await.unwrap();
        assert_eq!(updated.description.as_deref(), Some("Brain and nerves"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = LocalRepository::new();
        let mut s = specialty("Ghost");
        s.id = SpecialtyId::new(77);
        let err = update(&repo, s).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { entity: "specialty", .. }));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = LocalRepository::new();
        let role = create(
            &repo,
            Role {
                id: unsaved(),
                role_name: "Nurse".to_string(),
                description: None,
            },
        )
        .await
        .unwrap();
        delete::<Role, _>(&repo, role.id).await.unwrap();
        assert!(!exists::<Role, _>(&repo, role.id).await.unwrap());
        let err = delete::<Role, _>(&repo, role.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_ensure_exists() {
        let repo = LocalRepository::with_reference_data();
        assert!(ensure_exists::<Role, _>(&repo, RoleId::new(1)).await.is_ok());
        assert!(ensure_exists::<Role, _>(&repo, RoleId::new(999)).await.is_err());
    }
}
