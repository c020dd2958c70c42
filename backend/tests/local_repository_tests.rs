//! Behavioural tests for the in-memory repository.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use serde_json::json;

use healtsync::db::repository::{
    AppointmentRepository, AvailabilityRepository, FullRepository, NotificationRepository,
    PatientRepository, ReportRepository, Repository, RoleRepository, UserRepository,
};
use healtsync::db::LocalRepository;
use healtsync::models::{
    unsaved, Appointment, DayOfWeek, Doctor, DoctorAvailability, DoctorId, InsuranceProvider,
    Notification, NotificationKind, Patient, PatientId, PersonBase, Report, ReportKind, Role,
    RoleId, SpecialtyId, StatusId, User, UserId,
};

fn person(first: &str, last: &str) -> PersonBase {
    PersonBase {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    }
}

fn patient(first: &str) -> Patient {
    Patient {
        id: unsaved(),
        person: person(first, "Tester"),
        user_id: None,
        insurance_provider_id: None,
        insurance_provider: None,
        policy_number: None,
        blood_type: Some("O+".to_string()),
        allergies: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn doctor() -> Doctor {
    Doctor {
        id: unsaved(),
        person: person("Leonard", "McCoy"),
        user_id: None,
        specialty_id: SpecialtyId(1),
        specialty: None,
        license_number: "SF-1701".to_string(),
        years_of_experience: Some(20),
        consultation_fee: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    }
}

fn appointment(patient_id: PatientId, doctor_id: DoctorId, day: u32, hour: u32) -> Appointment {
    Appointment {
        id: unsaved(),
        patient_id,
        doctor_id,
        status_id: StatusId(1),
        status: None,
        availability_id: None,
        scheduled_at: Utc.with_ymd_and_hms(2025, 5, day, hour, 0, 0).unwrap(),
        duration_minutes: 20,
        reason: None,
        notes: None,
        created_at: Utc::now(),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_add_then_get_returns_equal_record() {
    let repo = LocalRepository::new();
    let stored = Repository::<Patient>::add(&repo, patient("Ann")).await.unwrap();
    let loaded = Repository::<Patient>::get_by_id(&repo, stored.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, stored);
    assert_ne!(stored.id, unsaved::<PatientId>());
}

#[tokio::test]
async fn test_delete_then_absent() {
    let repo = LocalRepository::new();
    let stored = Repository::<Patient>::add(&repo, patient("Ann")).await.unwrap();

    assert!(Repository::<Patient>::delete(&repo, stored.id).await.unwrap());
    assert!(Repository::<Patient>::get_by_id(&repo, stored.id)
        .await
        .unwrap()
        .is_none());
    assert!(!Repository::<Patient>::exists(&repo, stored.id).await.unwrap());
    assert!(!Repository::<Patient>::delete(&repo, stored.id).await.unwrap());
}

#[tokio::test]
async fn test_get_all_returns_each_live_record_once() {
    let repo = LocalRepository::new();
    let mut ids = Vec::new();
    for name in ["Ann", "Bob", "Cid", "Dee"] {
        ids.push(Repository::<Patient>::add(&repo, patient(name)).await.unwrap().id);
    }
    Repository::<Patient>::delete(&repo, ids[1]).await.unwrap();

    let all: Vec<Patient> = Repository::<Patient>::get_all(&repo).await.unwrap();
    let got: Vec<PatientId> = all.iter().map(|p| p.id).collect();
    assert_eq!(got, vec![ids[0], ids[2], ids[3]]);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let repo = LocalRepository::new();
    let first = Repository::<Patient>::add(&repo, patient("Ann")).await.unwrap();
    Repository::<Patient>::delete(&repo, first.id).await.unwrap();
    let second = Repository::<Patient>::add(&repo, patient("Bob")).await.unwrap();
    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_update_replaces_record() {
    let repo = LocalRepository::new();
    let mut stored = Repository::<Patient>::add(&repo, patient("Ann")).await.unwrap();
    stored.blood_type = Some("AB-".to_string());

    let updated = Repository::<Patient>::update(&repo, stored.clone())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.blood_type.as_deref(), Some("AB-"));

    let mut ghost = stored;
    ghost.id = PatientId(999);
    assert!(Repository::<Patient>::update(&repo, ghost).await.unwrap().is_none());
}

#[tokio::test]
async fn test_patient_insurance_is_resolved() {
    let repo = LocalRepository::new();
    let provider = Repository::<InsuranceProvider>::add(
        &repo,
        InsuranceProvider {
            id: unsaved(),
            name: "Blue Shield".to_string(),
            phone: None,
            email: None,
            website: None,
            coverage_details: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap();

    let mut p = patient("Ann");
    p.insurance_provider_id = Some(provider.id);
    let stored = Repository::<Patient>::add(&repo, p).await.unwrap();

    let insured = repo
        .get_patients_by_insurance_provider_id(provider.id)
        .await
        .unwrap();
    assert_eq!(insured.len(), 1);
    assert_eq!(
        insured[0].insurance_provider.as_ref().map(|i| i.name.as_str()),
        Some("Blue Shield")
    );
    assert_eq!(insured[0].id, stored.id);
}

#[tokio::test]
async fn test_users_by_email_and_role() {
    let repo = LocalRepository::with_reference_data();
    let admin_role: Role = repo.get_role_by_name("Admin").await.unwrap().unwrap();

    let user = Repository::<User>::add(
        &repo,
        User {
            id: unsaved(),
            email: "root@clinic.org".to_string(),
            password_hash: "x".to_string(),
            first_name: "Root".to_string(),
            last_name: "User".to_string(),
            role_id: admin_role.id,
            role: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        },
    )
    .await
    .unwrap();

    let found = repo.get_user_by_email("root@clinic.org").await.unwrap().unwrap();
    assert_eq!(found.id, user.id);
    assert!(found.is_admin());
    assert!(repo.get_user_by_email("nobody@clinic.org").await.unwrap().is_none());
    assert_eq!(repo.get_users_by_role_id(admin_role.id).await.unwrap().len(), 1);
    assert!(repo.get_users_by_role_id(RoleId(99)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_appointments_between_is_half_open_and_ordered() {
    let repo = LocalRepository::with_reference_data();
    let p = Repository::<Patient>::add(&repo, patient("Ann")).await.unwrap();
    let d = Repository::<Doctor>::add(&repo, doctor()).await.unwrap();

    for (day, hour) in [(3, 15), (1, 9), (2, 9), (3, 0)] {
        Repository::<Appointment>::add(&repo, appointment(p.id, d.id, day, hour))
            .await
            .unwrap();
    }

    let from = Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2025, 5, 3, 0, 0, 0).unwrap();
    let window = repo.get_appointments_between(from, to).await.unwrap();

    assert_eq!(window.len(), 2);
    assert!(window[0].scheduled_at < window[1].scheduled_at);
    assert_eq!(window[0].scheduled_at, from);

    let by_doctor = repo.get_appointments_by_doctor_id(d.id).await.unwrap();
    assert_eq!(by_doctor.len(), 4);
    assert!(by_doctor.windows(2).all(|w| w[0].scheduled_at <= w[1].scheduled_at));
    assert_eq!(by_doctor[0].status.as_ref().map(|s| s.name.as_str()), Some("Scheduled"));
}

#[tokio::test]
async fn test_availability_by_doctor_and_date() {
    let repo = LocalRepository::new();
    let d = Repository::<Doctor>::add(&repo, doctor()).await.unwrap();
    let monday = NaiveDate::from_ymd_opt(2025, 5, 5).unwrap();
    let tuesday = NaiveDate::from_ymd_opt(2025, 5, 6).unwrap();

    for (date, start) in [(monday, 14), (tuesday, 9), (monday, 8)] {
        Repository::<DoctorAvailability>::add(
            &repo,
            DoctorAvailability {
                id: unsaved(),
                doctor_id: d.id,
                available_date: date,
                start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(start + 1, 0, 0).unwrap(),
                day_of_week: DayOfWeek::from_date(date),
                availability_mode_id: None,
                is_active: true,
                created_at: Utc::now(),
                updated_at: None,
            },
        )
        .await
        .unwrap();
    }

    let monday_slots = repo
        .get_availability_by_doctor_and_date(d.id, monday)
        .await
        .unwrap();
    assert_eq!(monday_slots.len(), 2);
    assert!(monday_slots[0].start_time < monday_slots[1].start_time);

    let all = repo.get_availability_by_doctor_id(d.id).await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].available_date, tuesday);
}

#[tokio::test]
async fn test_notifications_newest_first_and_unread() {
    let repo = LocalRepository::new();
    let user_id = UserId(1);
    for (minute, read) in [(0, false), (10, true), (5, false)] {
        Repository::<Notification>::add(
            &repo,
            Notification {
                id: unsaved(),
                user_id,
                title: format!("t{}", minute),
                message: String::new(),
                kind: NotificationKind::Reminder,
                is_read: read,
                created_at: Utc.with_ymd_and_hms(2025, 5, 1, 8, minute, 0).unwrap(),
                read_at: None,
            },
        )
        .await
        .unwrap();
    }

    let all = repo.get_notifications_by_user_id(user_id).await.unwrap();
    let titles: Vec<&str> = all.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, vec!["t10", "t5", "t0"]);

    let unread = repo.get_unread_notifications_by_user_id(user_id).await.unwrap();
    assert_eq!(unread.len(), 2);
    assert_eq!(unread[0].title, "t5");
}

#[tokio::test]
async fn test_reports_by_author() {
    let repo = LocalRepository::new();
    for author in [Some(UserId(1)), Some(UserId(2)), Some(UserId(1)), None] {
        Repository::<Report>::add(
            &repo,
            Report {
                id: unsaved(),
                title: "Weekly".to_string(),
                kind: ReportKind::AppointmentSummary,
                generated_by: author,
                parameters: json!({}),
                created_at: Utc::now(),
            },
        )
        .await
        .unwrap();
    }
    assert_eq!(repo.get_reports_by_generated_by(UserId(1)).await.unwrap().len(), 2);
    assert!(repo.get_reports_by_generated_by(UserId(3)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_adds_get_distinct_ids() {
    let repo = std::sync::Arc::new(LocalRepository::new());
    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            Repository::<Patient>::add(repo.as_ref(), patient(&format!("P{}", i)))
                .await
                .unwrap()
                .id
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    assert!(repo.health_check().await.unwrap());
}
