//! Appointment report view models.
//!
//! Everything here is read-side: the report is recomputed from the current
//! appointments on every request.

use chrono::{Duration, NaiveDate, NaiveTime};
use log::debug;
use std::collections::HashMap;

use super::crud;
use super::error::{ServiceError, ServiceResult};
use crate::db::repository::{FullRepository, Repository};
use crate::models::{Appointment, Doctor, DoctorId, Patient, Report, ReportId, Status, StatusId};
use crate::routes::report::{
    AppointmentRow, DoctorCount, ReportFilter, ReportViewModel, SelectOption, StatusCount,
};

fn day_start(date: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

async fn load_appointments<R>(repo: &R, filter: &ReportFilter) -> ServiceResult<Vec<Appointment>>
where
    R: FullRepository + ?Sized,
{
    // A `to` on the last representable day has no next day; the range is
    // then left open and the day filter below bounds it.
    let window = match (filter.from, filter.to) {
        (Some(from), Some(to)) => to
            .checked_add_signed(Duration::days(1))
            .map(|end| (day_start(from), day_start(end))),
        _ => None,
    };
    let mut appointments = match window {
        Some((start, end)) => repo.get_appointments_between(start, end).await?,
        None => Repository::<Appointment>::get_all(repo).await?,
    };

    appointments.retain(|a| {
        let day = a.scheduled_at.date_naive();
        filter.from.map_or(true, |from| day >= from)
            && filter.to.map_or(true, |to| day <= to)
            && filter.doctor_id.map_or(true, |d| a.doctor_id == d)
            && filter.status_id.map_or(true, |s| a.status_id == s)
    });
    appointments.sort_by_key(|a| (a.scheduled_at, a.id));
    Ok(appointments)
}

/// Build the appointment report for a filter.
pub async fn appointment_report<R>(repo: &R, filter: ReportFilter) -> ServiceResult<ReportViewModel>
where
    R: FullRepository + ?Sized,
{
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(ServiceError::Validation(format!(
                "from ({}) must not be after to ({})",
                from, to
            )));
        }
    }

    let appointments = load_appointments(repo, &filter).await?;
    let doctors: Vec<Doctor> = Repository::<Doctor>::get_all(repo).await?;
    let statuses: Vec<Status> = Repository::<Status>::get_all(repo).await?;
    let patients: Vec<Patient> = Repository::<Patient>::get_all(repo).await?;

    let doctor_names: HashMap<DoctorId, String> =
        doctors.iter().map(|d| (d.id, d.display_name())).collect();
    let patient_names: HashMap<_, String> = patients
        .iter()
        .map(|p| (p.id, p.person.full_name()))
        .collect();
    let status_by_id: HashMap<StatusId, &Status> = statuses.iter().map(|s| (s.id, s)).collect();

    let mut per_status: HashMap<StatusId, usize> = HashMap::new();
    let mut per_doctor: HashMap<DoctorId, usize> = HashMap::new();
    for a in &appointments {
        *per_status.entry(a.status_id).or_default() += 1;
        *per_doctor.entry(a.doctor_id).or_default() += 1;
    }

    let status_counts = statuses
        .iter()
        .map(|s| StatusCount {
            status_id: s.id,
            name: s.name.clone(),
            color: s.color.clone(),
            count: per_status.get(&s.id).copied().unwrap_or(0),
        })
        .collect();

    let mut doctor_counts: Vec<DoctorCount> = per_doctor
        .into_iter()
        .map(|(doctor_id, count)| DoctorCount {
            doctor_id,
            doctor_name: doctor_names.get(&doctor_id).cloned().unwrap_or_default(),
            count,
        })
        .collect();
    doctor_counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.doctor_name.cmp(&b.doctor_name))
    });

    let rows = appointments
        .iter()
        .map(|a| {
            let status = status_by_id.get(&a.status_id);
            AppointmentRow {
                appointment_id: a.id,
                scheduled_at: a.scheduled_at,
                duration_minutes: a.duration_minutes,
                patient_id: a.patient_id,
                patient_name: patient_names.get(&a.patient_id).cloned().unwrap_or_default(),
                doctor_id: a.doctor_id,
                doctor_name: doctor_names.get(&a.doctor_id).cloned().unwrap_or_default(),
                status_name: status.map(|s| s.name.clone()).unwrap_or_default(),
                status_color: status.and_then(|s| s.color.clone()),
                reason: a.reason.clone(),
            }
        })
        .collect();

    let doctor_options = doctors
        .iter()
        .filter(|d| d.is_active)
        .map(|d| SelectOption::new(d.id, d.display_name()))
        .collect();
    let status_options = statuses
        .iter()
        .filter(|s| s.is_active)
        .map(|s| SelectOption::new(s.id, s.name.clone()))
        .collect();

    debug!(
        "Appointment report: {} rows for filter {:?}",
        appointments.len(),
        filter
    );

    Ok(ReportViewModel {
        filter,
        total_appointments: appointments.len(),
        status_counts,
        doctor_counts,
        appointments: rows,
        doctors: doctor_options,
        statuses: status_options,
    })
}

/// Re-run a saved report with the filter stored in its parameters.
pub async fn run_saved_report<R>(repo: &R, id: ReportId) -> ServiceResult<ReportViewModel>
where
    R: FullRepository + ?Sized,
{
    let report: Report = crud::get(repo, id).await?;
    let filter = if report.parameters.is_null() {
        ReportFilter::default()
    } else {
        serde_json::from_value(report.parameters.clone()).map_err(|e| {
            ServiceError::Validation(format!("report {} has invalid parameters: {}", id, e))
        })?
    };
    appointment_report(repo, filter).await
}
