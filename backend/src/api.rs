//! Public API surface of the HealtSync backend.
//!
//! Consolidates the wire types of the HTTP API in one place. All types
//! derive Serialize/Deserialize for JSON.

pub use crate::routes::appointment::{AppointmentDto, CreateAppointmentDto, UpdateAppointmentDto};
pub use crate::routes::auth::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
pub use crate::routes::availability::{
    AvailabilityDto, AvailabilityModeDto, AvailabilityQuery, CreateAvailabilityDto,
    CreateAvailabilityModeDto, UpdateAvailabilityDto, UpdateAvailabilityModeDto,
};
pub use crate::routes::doctor::{CreateDoctorDto, DoctorDto, UpdateDoctorDto};
pub use crate::routes::insurance::{
    CreateInsuranceProviderDto, InsuranceProviderDto, UpdateInsuranceProviderDto,
};
pub use crate::routes::medical_record::{
    CreateMedicalRecordDto, MedicalRecordDto, UpdateMedicalRecordDto,
};
pub use crate::routes::notification::{
    CreateNotificationDto, MarkAllReadResponse, NotificationDto, NotificationQuery,
    UpdateNotificationDto,
};
pub use crate::routes::patient::{CreatePatientDto, PatientDto, UpdatePatientDto};
pub use crate::routes::report::{
    AppointmentRow, CreateReportDto, DoctorCount, ReportDto, ReportFilter, ReportViewModel,
    SelectOption, StatusCount, UpdateReportDto,
};
pub use crate::routes::role::{CreateRoleDto, RoleDto, UpdateRoleDto};
pub use crate::routes::specialty::{CreateSpecialtyDto, SpecialtyDto, UpdateSpecialtyDto};
pub use crate::routes::status::{CreateStatusDto, StatusDto, UpdateStatusDto};
pub use crate::routes::user::{ChangePasswordDto, CreateUserDto, UpdateUserDto, UserDto};
pub use crate::routes::{map_to_dto, ExistsResponse, FromCreate, PersonUpdate, Resource};

pub use crate::models::{
    AppointmentId, AvailabilityId, AvailabilityModeId, DoctorId, InsuranceProviderId,
    MedicalRecordId, NotificationId, PatientId, ReportId, RoleId, SpecialtyId, StatusId, UserId,
};
