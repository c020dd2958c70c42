//! Appointment booking and lookups.

use log::{info, warn};

use super::crud;
use super::error::{ServiceError, ServiceResult};
use super::notifications::notify;
use crate::db::repository::{FullRepository, Repository};
use crate::models::status::{STATUS_CANCELLED, STATUS_SCHEDULED};
use crate::models::{
    unsaved, Appointment, AppointmentId, Doctor, DoctorAvailability, DoctorId, NotificationKind,
    Patient, PatientId, Status, StatusId, User, UserId,
};

async fn status_by_name<R>(repo: &R, name: &str) -> ServiceResult<Status>
where
    R: FullRepository + ?Sized,
{
    repo.get_status_by_name(name)
        .await?
        .ok_or_else(|| ServiceError::Validation(format!("status '{}' is not configured", name)))
}

/// Notify one account about an appointment. Failures are logged and dropped.
async fn deliver<R>(repo: &R, user_id: UserId, title: &str, message: String)
where
    R: FullRepository + ?Sized,
{
    match Repository::<User>::exists(repo, user_id).await {
        Ok(true) => {}
        Ok(false) => {
            warn!("Skipping notification for missing user {}", user_id);
            return;
        }
        Err(e) => {
            warn!("Could not look up user {} for notification: {}", user_id, e);
            return;
        }
    }
    if let Err(e) = notify(repo, user_id, NotificationKind::Appointment, title, message).await {
        warn!("Failed to notify user {}: {}", user_id, e);
    }
}

async fn notify_participants<R>(repo: &R, appointment: &Appointment, title: &str)
where
    R: FullRepository + ?Sized,
{
    let patient = Repository::<Patient>::get_by_id(repo, appointment.patient_id).await;
    let doctor = Repository::<Doctor>::get_by_id(repo, appointment.doctor_id).await;
    let (patient, doctor) = match (patient, doctor) {
        (Ok(Some(patient)), Ok(Some(doctor))) => (patient, doctor),
        (Err(e), _) | (_, Err(e)) => {
            warn!("Skipping notifications for appointment {}: {}", appointment.id, e);
            return;
        }
        _ => return,
    };
    let when = appointment.scheduled_at.format("%Y-%m-%d %H:%M UTC");

    if let Some(user_id) = patient.user_id {
        let message = format!("Appointment with {} on {}", doctor.display_name(), when);
        deliver(repo, user_id, title, message).await;
    }
    if let Some(user_id) = doctor.user_id {
        let message = format!(
            "Appointment with {} on {}",
            patient.person.full_name(),
            when
        );
        deliver(repo, user_id, title, message).await;
    }
}

/// Create an appointment and notify the patient and doctor accounts.
///
/// An appointment without a status is booked as `Scheduled`. A linked slot
/// must belong to the same doctor.
pub async fn book<R>(repo: &R, mut appointment: Appointment) -> ServiceResult<Appointment>
where
    R: FullRepository + ?Sized,
{
    if appointment.status_id == unsaved::<StatusId>() {
        appointment.status_id = status_by_name(repo, STATUS_SCHEDULED).await?.id;
    }

    if let Some(slot_id) = appointment.availability_id {
        let slot: Option<DoctorAvailability> =
            Repository::<DoctorAvailability>::get_by_id(repo, slot_id).await?;
        if let Some(slot) = slot {
            if slot.doctor_id != appointment.doctor_id {
                return Err(ServiceError::Validation(format!(
                    "availability {} belongs to doctor {}, not doctor {}",
                    slot_id, slot.doctor_id, appointment.doctor_id
                )));
            }
        }
    }

    let booked = crud::create(repo, appointment).await?;
    notify_participants(repo, &booked, "Appointment booked").await;
    Ok(booked)
}

/// Set the appointment status to `Cancelled`.
pub async fn cancel<R>(repo: &R, id: AppointmentId) -> ServiceResult<Appointment>
where
    R: FullRepository + ?Sized,
{
    let cancelled = status_by_name(repo, STATUS_CANCELLED).await?;
    let appointment: Appointment = crud::get(repo, id).await?;
    if appointment.status_id == cancelled.id {
        return Ok(appointment);
    }

    let status_id = cancelled.id;
    let updated = crud::modify(repo, id, move |a: &mut Appointment| a.status_id = status_id).await?;
    info!("Cancelled appointment {}", id);
    notify_participants(repo, &updated, "Appointment cancelled").await;
    Ok(updated)
}

pub async fn list_for_patient<R>(repo: &R, patient_id: PatientId) -> ServiceResult<Vec<Appointment>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<Patient, R>(repo, patient_id).await?;
    Ok(repo.get_appointments_by_patient_id(patient_id).await?)
}

pub async fn list_for_doctor<R>(repo: &R, doctor_id: DoctorId) -> ServiceResult<Vec<Appointment>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<Doctor, R>(repo, doctor_id).await?;
    Ok(repo.get_appointments_by_doctor_id(doctor_id).await?)
}

pub async fn list_by_status<R>(repo: &R, status_id: StatusId) -> ServiceResult<Vec<Appointment>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<Status, R>(repo, status_id).await?;
    Ok(repo.get_appointments_by_status_id(status_id).await?)
}
