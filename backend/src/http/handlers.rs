//! HTTP handlers for the domain endpoints.
//!
//! Plain CRUD lives in [`super::crud`]; the handlers here cover login,
//! booking, per-doctor and per-patient listings, notifications and reports.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::auth::{issue_token, AuthUser};
use super::crud::{parse_id, HandlerResult};
use super::error::{ApiJson, ApiQuery, AppError};
use super::state::AppState;
use crate::models::{
    Appointment, AppointmentId, DoctorId, Notification, NotificationId, PatientId, ReportId, User,
    UserId,
};
use crate::routes::appointment::{AppointmentDto, CreateAppointmentDto};
use crate::routes::auth::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
use crate::routes::availability::{AvailabilityDto, AvailabilityQuery};
use crate::routes::medical_record::MedicalRecordDto;
use crate::routes::notification::{MarkAllReadResponse, NotificationDto, NotificationQuery};
use crate::routes::report::{ReportFilter, ReportViewModel};
use crate::routes::user::{ChangePasswordDto, CreateUserDto, UserDto};
use crate::routes::{FromCreate, Resource};
use crate::services::{
    self, appointments, availability, crud, medical_records, notifications, reports, users,
};

fn to_dtos<E: Resource>(items: Vec<E>) -> Vec<E::Dto> {
    items.iter().map(Resource::to_dto).collect()
}

// =============================================================================
// Health Check
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let database = match services::health_check(state.repo()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    }))
}

// =============================================================================
// Authentication and accounts
// =============================================================================

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> HandlerResult<TokenResponse> {
    let user = users::authenticate(state.repo(), &request.email, &request.password).await?;
    let (access_token, expires_in) = issue_token(&user, &state.config.auth)?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in,
        user: user.to_dto(),
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let (user, patient) = users::register(state.repo(), request, state.bcrypt_cost()).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: user.to_dto(),
            patient: patient.to_dto(),
        }),
    ))
}

/// GET /api/auth/me
pub async fn me(State(state): State<AppState>, caller: AuthUser) -> HandlerResult<UserDto> {
    let user_id = caller
        .user_id
        .ok_or_else(|| AppError::Unauthorized("no signed-in user".to_string()))?;
    let user: User = crud::get(state.repo(), user_id).await?;
    Ok(Json(user.to_dto()))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(body): ApiJson<CreateUserDto>,
) -> Result<(StatusCode, Json<UserDto>), AppError> {
    caller.require_admin()?;
    let user = users::create_user(state.repo(), body, state.bcrypt_cost()).await?;
    Ok((StatusCode::CREATED, Json(user.to_dto())))
}

/// PUT /api/users/{id}/password
///
/// Users changing their own password must send the current one.
pub async fn change_password(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<ChangePasswordDto>,
) -> Result<StatusCode, AppError> {
    let user_id = parse_id::<UserId>(&id)?;
    caller.require_self_or_admin(user_id)?;

    let own_account = caller.user_id == Some(user_id);
    let current = body.current_password.as_deref();
    if own_account && current.is_none() {
        return Err(AppError::BadRequest(
            "current_password is required".to_string(),
        ));
    }

    users::change_password(
        state.repo(),
        user_id,
        if own_account { current } else { None },
        &body.new_password,
        state.bcrypt_cost(),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Doctors and patients
// =============================================================================

/// GET /api/doctors/{id}/availability?date=YYYY-MM-DD
pub async fn doctor_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> HandlerResult<Vec<AvailabilityDto>> {
    let doctor_id = parse_id::<DoctorId>(&id)?;
    let slots = availability::list_for_doctor(state.repo(), doctor_id, query.date).await?;
    Ok(Json(to_dtos(slots)))
}

/// GET /api/doctors/{id}/appointments
pub async fn doctor_appointments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<AppointmentDto>> {
    let doctor_id = parse_id::<DoctorId>(&id)?;
    let items = appointments::list_for_doctor(state.repo(), doctor_id).await?;
    Ok(Json(to_dtos(items)))
}

/// GET /api/patients/{id}/appointments
pub async fn patient_appointments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<AppointmentDto>> {
    let patient_id = parse_id::<PatientId>(&id)?;
    let items = appointments::list_for_patient(state.repo(), patient_id).await?;
    Ok(Json(to_dtos(items)))
}

/// GET /api/doctors/{id}/medical-records
pub async fn doctor_medical_records(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<MedicalRecordDto>> {
    let doctor_id = parse_id::<DoctorId>(&id)?;
    let items = medical_records::list_for_doctor(state.repo(), doctor_id).await?;
    Ok(Json(to_dtos(items)))
}

/// GET /api/patients/{id}/medical-records
pub async fn patient_medical_records(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<MedicalRecordDto>> {
    let patient_id = parse_id::<PatientId>(&id)?;
    let items = medical_records::list_for_patient(state.repo(), patient_id).await?;
    Ok(Json(to_dtos(items)))
}

// =============================================================================
// Appointments
// =============================================================================

/// POST /api/appointments
pub async fn book_appointment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAppointmentDto>,
) -> Result<(StatusCode, Json<AppointmentDto>), AppError> {
    let booked = appointments::book(state.repo(), Appointment::from_create(body)).await?;
    Ok((StatusCode::CREATED, Json(booked.to_dto())))
}

/// POST /api/appointments/{id}/cancel
pub async fn cancel_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<AppointmentDto> {
    let id = parse_id::<AppointmentId>(&id)?;
    let cancelled = appointments::cancel(state.repo(), id).await?;
    Ok(Json(cancelled.to_dto()))
}

// =============================================================================
// Notifications
// =============================================================================

/// GET /api/users/{id}/notifications?unread_only=true
pub async fn user_notifications(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    ApiQuery(query): ApiQuery<NotificationQuery>,
) -> HandlerResult<Vec<NotificationDto>> {
    let user_id = parse_id::<UserId>(&id)?;
    caller.require_self_or_admin(user_id)?;
    let items = notifications::list_for_user(state.repo(), user_id, query.unread_only).await?;
    Ok(Json(to_dtos(items)))
}

/// GET /api/notifications?unread_only=true
///
/// Administrators see every notification, other users only their own.
pub async fn list_notifications(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiQuery(query): ApiQuery<NotificationQuery>,
) -> HandlerResult<Vec<NotificationDto>> {
    let items = match caller.user_id {
        Some(user_id) if !caller.is_admin() => {
            notifications::list_for_user(state.repo(), user_id, query.unread_only).await?
        }
        _ => {
            caller.require_admin()?;
            let all: Vec<Notification> = crud::list(state.repo()).await?;
            all.into_iter()
                .filter(|n| !query.unread_only || !n.is_read)
                .collect()
        }
    };
    Ok(Json(to_dtos(items)))
}

async fn owned_notification(
    state: &AppState,
    caller: &AuthUser,
    id: &str,
) -> Result<Notification, AppError> {
    let id = parse_id::<NotificationId>(id)?;
    let notification: Notification = crud::get(state.repo(), id).await?;
    caller.require_self_or_admin(notification.user_id)?;
    Ok(notification)
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> HandlerResult<NotificationDto> {
    let notification = owned_notification(&state, &caller, &id).await?;
    Ok(Json(notification.to_dto()))
}

/// POST /api/notifications/{id}/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> HandlerResult<NotificationDto> {
    let owned = owned_notification(&state, &caller, &id).await?;
    let notification = notifications::mark_read(state.repo(), owned.id).await?;
    Ok(Json(notification.to_dto()))
}

/// POST /api/users/{id}/notifications/read-all
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> HandlerResult<MarkAllReadResponse> {
    let user_id = parse_id::<UserId>(&id)?;
    caller.require_self_or_admin(user_id)?;
    let updated = notifications::mark_all_read(state.repo(), user_id).await?;
    Ok(Json(MarkAllReadResponse { updated }))
}

// =============================================================================
// Reports
// =============================================================================

/// GET /api/reports/appointments?from=&to=&doctor_id=&status_id=
pub async fn appointment_report(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<ReportFilter>,
) -> HandlerResult<ReportViewModel> {
    Ok(Json(reports::appointment_report(state.repo(), filter).await?))
}

/// GET /api/reports/{id}/run
pub async fn run_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<ReportViewModel> {
    let id = parse_id::<ReportId>(&id)?;
    Ok(Json(reports::run_saved_report(state.repo(), id).await?))
}
