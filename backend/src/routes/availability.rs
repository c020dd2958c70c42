use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::{default_true, patch, patch_opt, FromCreate, Resource};
use crate::models::{
    unsaved, AvailabilityId, AvailabilityMode, AvailabilityModeId, DayOfWeek, DoctorAvailability,
    DoctorId,
};

/// Query string of `GET /api/doctors/{id}/availability`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityModeDto {
    pub id: AvailabilityModeId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAvailabilityModeDto {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAvailabilityModeDto {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

impl Resource for AvailabilityMode {
    type Dto = AvailabilityModeDto;
    type Update = UpdateAvailabilityModeDto;
    const PATH: &'static str = "availability-modes";
    const REQUIRES_ADMIN: bool = true;

    fn to_dto(&self) -> AvailabilityModeDto {
        AvailabilityModeDto {
            id: self.id,
            name: self.name.clone(),
            is_active: self.is_active,
        }
    }

    fn apply_update(&mut self, update: UpdateAvailabilityModeDto) {
        patch(&mut self.name, update.name);
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for AvailabilityMode {
    type Create = CreateAvailabilityModeDto;

    fn from_create(create: CreateAvailabilityModeDto) -> Self {
        AvailabilityMode {
            id: unsaved(),
            name: create.name,
            is_active: create.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityDto {
    pub id: AvailabilityId,
    pub doctor_id: DoctorId,
    pub available_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub day_of_week: DayOfWeek,
    pub availability_mode_id: Option<AvailabilityModeId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// `day_of_week` is derived from `available_date` on write.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAvailabilityDto {
    pub doctor_id: DoctorId,
    pub available_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub availability_mode_id: Option<AvailabilityModeId>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAvailabilityDto {
    pub available_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub availability_mode_id: Option<AvailabilityModeId>,
    pub is_active: Option<bool>,
}

impl Resource for DoctorAvailability {
    type Dto = AvailabilityDto;
    type Update = UpdateAvailabilityDto;
    const PATH: &'static str = "availability";

    fn to_dto(&self) -> AvailabilityDto {
        AvailabilityDto {
            id: self.id,
            doctor_id: self.doctor_id,
            available_date: self.available_date,
            start_time: self.start_time,
            end_time: self.end_time,
            day_of_week: self.day_of_week,
            availability_mode_id: self.availability_mode_id,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdateAvailabilityDto) {
        patch(&mut self.available_date, update.available_date);
        patch(&mut self.start_time, update.start_time);
        patch(&mut self.end_time, update.end_time);
        patch_opt(&mut self.availability_mode_id, update.availability_mode_id);
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for DoctorAvailability {
    type Create = CreateAvailabilityDto;

    fn from_create(create: CreateAvailabilityDto) -> Self {
        DoctorAvailability {
            id: unsaved(),
            doctor_id: create.doctor_id,
            available_date: create.available_date,
            start_time: create.start_time,
            end_time: create.end_time,
            day_of_week: DayOfWeek::from_date(create.available_date),
            availability_mode_id: create.availability_mode_id,
            is_active: create.is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}
