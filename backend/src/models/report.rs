use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{ReportId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    AppointmentSummary,
    DoctorWorkload,
    PatientActivity,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::AppointmentSummary => "appointment_summary",
            ReportKind::DoctorWorkload => "doctor_workload",
            ReportKind::PatientActivity => "patient_activity",
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "appointment_summary" => Ok(Self::AppointmentSummary),
            "doctor_workload" => Ok(Self::DoctorWorkload),
            "patient_activity" => Ok(Self::PatientActivity),
            _ => Err(format!("Unknown report kind: {}", s)),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A saved report definition; `parameters` holds the filter it was run with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub kind: ReportKind,
    pub generated_by: Option<UserId>,
    pub parameters: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

crate::impl_entity!(Report, ReportId, "report", created);
