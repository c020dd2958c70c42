use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{patch, FromCreate, Resource};
use crate::models::{
    unsaved, AppointmentId, DoctorId, EntityId, PatientId, Report, ReportId, ReportKind, StatusId,
    UserId,
};

/// Appointment report filter. Dates are inclusive calendar days (UTC).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub doctor_id: Option<DoctorId>,
    pub status_id: Option<StatusId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status_id: StatusId,
    pub name: String,
    pub color: Option<String>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorCount {
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub appointment_id: AppointmentId,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub status_name: String,
    pub status_color: Option<String>,
    pub reason: Option<String>,
}

/// Dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: i64,
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl EntityId, label: impl Into<String>) -> Self {
        Self {
            value: id.as_i64(),
            label: label.into(),
        }
    }
}

/// Everything the appointment report page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportViewModel {
    pub filter: ReportFilter,
    pub total_appointments: usize,
    pub status_counts: Vec<StatusCount>,
    pub doctor_counts: Vec<DoctorCount>,
    pub appointments: Vec<AppointmentRow>,
    pub doctors: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDto {
    pub id: ReportId,
    pub title: String,
    pub kind: ReportKind,
    pub generated_by: Option<UserId>,
    pub parameters: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportDto {
    pub title: String,
    pub kind: ReportKind,
    #[serde(default)]
    pub generated_by: Option<UserId>,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReportDto {
    pub title: Option<String>,
    pub kind: Option<ReportKind>,
    pub parameters: Option<serde_json::Value>,
}

impl Resource for Report {
    type Dto = ReportDto;
    type Update = UpdateReportDto;
    const PATH: &'static str = "reports";

    fn to_dto(&self) -> ReportDto {
        ReportDto {
            id: self.id,
            title: self.title.clone(),
            kind: self.kind,
            generated_by: self.generated_by,
            parameters: self.parameters.clone(),
            created_at: self.created_at,
        }
    }

    fn apply_update(&mut self, update: UpdateReportDto) {
        patch(&mut self.title, update.title);
        patch(&mut self.kind, update.kind);
        patch(&mut self.parameters, update.parameters);
    }
}

impl FromCreate for Report {
    type Create = CreateReportDto;

    fn from_create(create: CreateReportDto) -> Self {
        Report {
            id: unsaved(),
            title: create.title,
            kind: create.kind,
            generated_by: create.generated_by,
            parameters: create.parameters,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_accepts_partial_input() {
        let filter: ReportFilter = serde_json::from_value(json!({ "doctor_id": 3 })).unwrap();
        assert_eq!(filter.doctor_id, Some(DoctorId(3)));
        assert!(filter.from.is_none());

        let empty: ReportFilter = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ReportFilter::default());
    }

    #[test]
    fn test_select_option_uses_numeric_id() {
        let opt = SelectOption::new(StatusId(5), "NoShow");
        assert_eq!(opt.value, 5);
        assert_eq!(opt.label, "NoShow");
    }
}
