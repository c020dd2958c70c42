//! Reference data every fresh store starts with.
//!
//! The Postgres migration inserts the same rows; keep the two in step.

/// `(role_name, description)`
pub const ROLES: &[(&str, &str)] = &[
    ("Admin", "Manages users and reference data"),
    ("Doctor", "Provides care and manages availability"),
    ("Patient", "Books appointments"),
];

/// `(name, color, description)`
pub const STATUSES: &[(&str, &str, &str)] = &[
    ("Scheduled", "#1976d2", "Booked and awaiting confirmation"),
    ("Confirmed", "#388e3c", "Confirmed by the clinic"),
    ("Completed", "#616161", "Visit took place"),
    ("Cancelled", "#d32f2f", "Cancelled by patient or clinic"),
    ("NoShow", "#f57c00", "Patient did not attend"),
];

pub const AVAILABILITY_MODES: &[&str] = &["In person", "Telehealth"];

/// `(name, description)`
pub const SPECIALTIES: &[(&str, &str)] = &[
    ("General Practice", "Primary care"),
    ("Cardiology", "Heart and blood vessels"),
    ("Pediatrics", "Care of children"),
];
