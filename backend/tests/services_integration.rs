//! Service workflows run end to end against the in-memory store.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

use healtsync::db::repository::Repository;
use healtsync::db::LocalRepository;
use healtsync::models::{
    unsaved, Appointment, DayOfWeek, Doctor, DoctorAvailability, DoctorId, MedicalRecord,
    PatientId, PersonBase, Role, SpecialtyId, Status, StatusId, User,
};
use healtsync::services::users::{self, NewUser, Registration};
use healtsync::services::{appointments, crud, medical_records, notifications, ServiceError};

const COST: u32 = 4;

fn registration(email: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: "s3cure-enough".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: Some("555-0100".to_string()),
    }
}

async fn doctor(repo: &LocalRepository) -> Doctor {
    crud::create(
        repo,
        Doctor {
            id: unsaved(),
            person: PersonBase {
                first_name: "Gregory".to_string(),
                last_name: "House".to_string(),
                ..Default::default()
            },
            user_id: None,
            specialty_id: SpecialtyId(1),
            specialty: None,
            license_number: "PPTH-1".to_string(),
            years_of_experience: None,
            consultation_fee: Some(120.0),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_register_then_authenticate() {
    let repo = LocalRepository::with_reference_data();
    let (user, patient) = users::register(&repo, registration(" Ada@Example.ORG "), COST)
        .await
        .unwrap();

    assert_eq!(user.email, "ada@example.org");
    assert_eq!(user.role_name(), Some("Patient"));
    assert_eq!(patient.user_id, Some(user.id));
    assert_eq!(patient.person.phone.as_deref(), Some("555-0100"));

    let authed = users::authenticate(&repo, "ADA@example.org", "s3cure-enough")
        .await
        .unwrap();
    assert_eq!(authed.id, user.id);

    let err = users::authenticate(&repo, "ada@example.org", "wrong-password")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));

    let err = users::authenticate(&repo, "nobody@example.org", "s3cure-enough")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let repo = LocalRepository::with_reference_data();
    users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();
    let err = users::register(&repo, registration("ADA@example.org"), COST)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));
}

#[tokio::test]
async fn test_short_password_rejected() {
    let repo = LocalRepository::with_reference_data();
    let mut reg = registration("ada@example.org");
    reg.password = "short".to_string();
    let err = users::register(&repo, reg, COST).await.unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_deactivated_user_cannot_log_in() {
    let repo = LocalRepository::with_reference_data();
    let (user, _) = users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();
    users::deactivate(&repo, user.id).await.unwrap();

    let err = users::authenticate(&repo, "ada@example.org", "s3cure-enough")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));
}

#[tokio::test]
async fn test_change_password_checks_current() {
    let repo = LocalRepository::with_reference_data();
    let (user, _) = users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();

    let err = users::change_password(&repo, user.id, Some("not-it"), "brand-new-pass", COST)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Unauthorized(_)));

    users::change_password(&repo, user.id, Some("s3cure-enough"), "brand-new-pass", COST)
        .await
        .unwrap();
    assert!(users::authenticate(&repo, "ada@example.org", "brand-new-pass")
        .await
        .is_ok());
}

#[tokio::test]
async fn test_bootstrap_admin_runs_once() {
    let repo = LocalRepository::with_reference_data();
    let first = users::bootstrap_admin(&repo, "admin@clinic.org", "admin-password", COST)
        .await
        .unwrap();
    assert!(first.as_ref().is_some_and(User::is_admin));

    let second = users::bootstrap_admin(&repo, "admin@clinic.org", "admin-password", COST)
        .await
        .unwrap();
    assert!(second.is_none());
}

#[tokio::test]
async fn test_user_with_unknown_role_rejected() {
    let repo = LocalRepository::with_reference_data();
    let err = users::create_user(
        &repo,
        NewUser {
            email: "x@clinic.org".to_string(),
            password: "long-enough-pw".to_string(),
            first_name: "X".to_string(),
            last_name: "Y".to_string(),
            role_id: healtsync::models::RoleId(77),
            is_active: true,
        },
        COST,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_reference_names_are_unique() {
    let repo = LocalRepository::with_reference_data();
    let err = crud::create(
        &repo,
        Status {
            id: unsaved(),
            name: "Cancelled".to_string(),
            color: None,
            description: None,
            is_active: true,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    let mut admin: Role = repo_role(&repo, "Admin").await;
    admin.description = Some("Superusers".to_string());
    let updated = crud::update(&repo, admin).await.unwrap();
    assert_eq!(updated.description.as_deref(), Some("Superusers"));
}

async fn repo_role(repo: &LocalRepository, name: &str) -> Role {
    let roles: Vec<Role> = crud::list(repo).await.unwrap();
    roles.into_iter().find(|r| r.role_name == name).unwrap()
}

#[tokio::test]
async fn test_inverted_availability_rejected() {
    let repo = LocalRepository::with_reference_data();
    let d = doctor(&repo).await;
    let date = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    let err = crud::create(
        &repo,
        DoctorAvailability {
            id: unsaved(),
            doctor_id: d.id,
            available_date: date,
            start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            day_of_week: DayOfWeek::from_date(date),
            availability_mode_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_booking_flow_notifies_and_cancels() {
    let repo = LocalRepository::with_reference_data();
    let (user, patient) = users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();
    let d = doctor(&repo).await;

    let booked = appointments::book(
        &repo,
        Appointment {
            id: unsaved(),
            patient_id: patient.id,
            doctor_id: d.id,
            status_id: unsaved(),
            status: None,
            availability_id: None,
            scheduled_at: Utc.with_ymd_and_hms(2025, 7, 1, 10, 0, 0).unwrap(),
            duration_minutes: 30,
            reason: Some("Follow-up".to_string()),
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(booked.status.as_ref().map(|s| s.name.as_str()), Some("Scheduled"));

    let cancelled = appointments::cancel(&repo, booked.id).await.unwrap();
    assert_eq!(cancelled.status.as_ref().map(|s| s.name.as_str()), Some("Cancelled"));

    let inbox = notifications::list_for_user(&repo, user.id, true).await.unwrap();
    assert_eq!(inbox.len(), 2);

    let changed = notifications::mark_all_read(&repo, user.id).await.unwrap();
    assert_eq!(changed, 2);
    assert!(notifications::list_for_user(&repo, user.id, true)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_appointment_for_missing_doctor_rejected() {
    let repo = LocalRepository::with_reference_data();
    let (_, patient) = users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();

    let err = appointments::book(
        &repo,
        Appointment {
            id: unsaved(),
            patient_id: patient.id,
            doctor_id: DoctorId(404),
            status_id: StatusId(1),
            status: None,
            availability_id: None,
            scheduled_at: Utc::now(),
            duration_minutes: 15,
            reason: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_medical_records_for_patient() {
    let repo = LocalRepository::with_reference_data();
    let (_, patient) = users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();
    let d = doctor(&repo).await;

    for day in [3, 1] {
        crud::create(
            &repo,
            MedicalRecord {
                id: unsaved(),
                patient_id: patient.id,
                doctor_id: d.id,
                appointment_id: None,
                record_date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
                diagnosis: "Seasonal allergy".to_string(),
                treatment: None,
                prescription: Some("Cetirizine".to_string()),
                notes: None,
                created_at: Utc::now(),
                updated_at: None,
            },
        )
        .await
        .unwrap();
    }

    let records = medical_records::list_for_patient(&repo, patient.id).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].record_date < records[1].record_date);
    assert_eq!(
        medical_records::list_for_doctor(&repo, d.id).await.unwrap().len(),
        2
    );

    let err = medical_records::list_for_patient(&repo, PatientId(999))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let repo = LocalRepository::with_reference_data();
    let err = crud::delete::<Doctor, _>(&repo, DoctorId(12)).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    let d = doctor(&repo).await;
    crud::delete::<Doctor, _>(&repo, d.id).await.unwrap();
    assert!(Repository::<Doctor>::get_by_id(&repo, d.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_booking_survives_deleted_patient_account() {
    let repo = LocalRepository::with_reference_data();
    let (user, patient) = users::register(&repo, registration("ada@example.org"), COST)
        .await
        .unwrap();
    let d = doctor(&repo).await;
    crud::delete::<User, _>(&repo, user.id).await.unwrap();

    let booked = appointments::book(
        &repo,
        Appointment {
            id: unsaved(),
            patient_id: patient.id,
            doctor_id: d.id,
            status_id: unsaved(),
            status: None,
            availability_id: None,
            scheduled_at: Utc.with_ymd_and_hms(2025, 7, 2, 10, 0, 0).unwrap(),
            duration_minutes: 30,
            reason: None,
            notes: None,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap();
    assert!(Repository::<Appointment>::exists(&repo, booked.id)
        .await
        .unwrap());

    let cancelled = appointments::cancel(&repo, booked.id).await.unwrap();
    assert_eq!(cancelled.status.as_ref().map(|s| s.name.as_str()), Some("Cancelled"));
    assert!(notifications::list_for_user(&repo, user.id, false)
        .await
        .unwrap()
        .is_empty());
}
