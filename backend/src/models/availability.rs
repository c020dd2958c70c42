//! Doctor availability slots and their modes.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AvailabilityId, AvailabilityModeId, DoctorId};

/// Day of the week, numbered from Sunday = 0 as stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    pub fn as_i16(self) -> i16 {
        self as i16
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl TryFrom<i16> for DayOfWeek {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or_else(|| format!("Invalid day of week: {}", value))
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown day of week: {}", s))
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a slot is delivered (in person, telehealth, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityMode {
    pub id: AvailabilityModeId,
    pub name: String,
    pub is_active: bool,
}

crate::impl_entity!(AvailabilityMode, AvailabilityModeId, "availability mode");

/// A bookable time window owned by a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorAvailability {
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

crate::impl_entity!(DoctorAvailability, AvailabilityId, "availability", audited);

impl DoctorAvailability {
    /// Length of the slot in minutes; zero or negative for inverted slots.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Keep `day_of_week` consistent with `available_date`.
    pub fn sync_day_of_week(&mut self) {
        self.day_of_week = DayOfWeek::from_date(self.available_date);
    }
}
