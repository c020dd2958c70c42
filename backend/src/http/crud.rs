//! Generic REST handlers shared by every resource.
//!
//! Mounted under `/api/{Resource::PATH}` by the router:
//!
//! | Method | Path | Result |
//! |--------|------|--------|
//! | GET | `/` | list of DTOs |
//! | POST | `/` | created DTO, 201 |
//! | GET | `/{id}` | DTO or 404 |
//! | PUT | `/{id}` | partial update, updated DTO |
//! | DELETE | `/{id}` | 204 |
//! | GET | `/{id}/exists` | `{"exists": bool}` |

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::auth::AuthUser;
use super::error::{ApiJson, AppError};
use super::state::AppState;
use crate::db::repository::{FullRepository, Repository};
use crate::models::EntityId;
use crate::routes::{ExistsResponse, FromCreate, Resource};
use crate::services::crud;

pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Parse a path id, rejecting non-numeric values with 400.
pub fn parse_id<I: EntityId>(raw: &str) -> Result<I, AppError> {
    I::parse(raw).ok_or_else(|| AppError::BadRequest(format!("invalid id '{}'", raw)))
}

fn check_write<E: Resource>(caller: &AuthUser) -> Result<(), AppError> {
    if E::REQUIRES_ADMIN {
        caller.require_admin()?;
    }
    Ok(())
}

pub async fn list<E>(State(state): State<AppState>) -> HandlerResult<Vec<E::Dto>>
where
    E: Resource,
    dyn FullRepository: Repository<E>,
{
    let items: Vec<E> = crud::list(state.repo()).await?;
    Ok(Json(items.iter().map(Resource::to_dto).collect()))
}

pub async fn get<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<E::Dto>
where
    E: Resource,
    dyn FullRepository: Repository<E>,
{
    let id = parse_id::<E::Id>(&id)?;
    let entity: E = crud::get(state.repo(), id).await?;
    Ok(Json(entity.to_dto()))
}

pub async fn exists<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<ExistsResponse>
where
    E: Resource,
    dyn FullRepository: Repository<E>,
{
    let id = parse_id::<E::Id>(&id)?;
    let exists = crud::exists::<E, _>(state.repo(), id).await?;
    Ok(Json(ExistsResponse { exists }))
}

pub async fn create<E>(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<E::Create>,
) -> Result<(StatusCode, Json<E::Dto>), AppError>
where
    E: FromCreate,
    dyn FullRepository: Repository<E>,
{
    check_write::<E>(&caller)?;
    let created = crud::create(state.repo(), E::from_create(body)).await?;
    Ok((StatusCode::CREATED, Json(created.to_dto())))
}

pub async fn update<E>(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<E::Update>,
) -> HandlerResult<E::Dto>
where
    E: Resource,
    dyn FullRepository: Repository<E>,
{
    check_write::<E>(&caller)?;
    let id = parse_id::<E::Id>(&id)?;
    let updated = crud::modify(state.repo(), id, move |e: &mut E| e.apply_update(body)).await?;
    Ok(Json(updated.to_dto()))
}

pub async fn delete<E>(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    E: Resource,
    dyn FullRepository: Repository<E>,
{
    check_write::<E>(&caller)?;
    let id = parse_id::<E::Id>(&id)?;
    crud::delete::<E, _>(state.repo(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
