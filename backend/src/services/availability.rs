//! Doctor availability queries.

use chrono::NaiveDate;

use super::crud;
use super::error::ServiceResult;
use crate::db::repository::FullRepository;
use crate::models::{Doctor, DoctorAvailability, DoctorId};

/// Slots for one doctor, optionally restricted to a single date.
pub async fn list_for_doctor<R>(
    repo: &R,
    doctor_id: DoctorId,
    date: Option<NaiveDate>,
) -> ServiceResult<Vec<DoctorAvailability>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<Doctor, R>(repo, doctor_id).await?;
    let slots = match date {
        Some(date) => repo.get_availability_by_doctor_and_date(doctor_id, date).await?,
        None => repo.get_availability_by_doctor_id(doctor_id).await?,
    };
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::LocalRepository;
    use crate::models::{unsaved, DayOfWeek, PersonBase, SpecialtyId};
    use crate::services::ServiceError;
    use chrono::{NaiveTime, Utc};

    async fn doctor(repo: &LocalRepository) -> Doctor {
        crud::create(
            repo,
            Doctor {
                id: unsaved(),
                person: PersonBase {
                    first_name: "John".to_string(),
                    last_name: "Watson".to_string(),
                    ..Default::default()
                },
                user_id: None,
                specialty_id: SpecialtyId::new(1),
                specialty: None,
                license_number: "GMC-221B".to_string(),
                years_of_experience: Some(12),
                consultation_fee: None,
                is_active: true,
                created_at: Utc::now(),
                updated_at: None,
            },
        )
        .await
        .unwrap()
    }

    fn slot(doctor_id: DoctorId, day: u32, hour: u32) -> DoctorAvailability {
        DoctorAvailability {
            id: unsaved(),
            doctor_id,
            available_date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
            day_of_week: DayOfWeek::Sunday,
            availability_mode_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_filters_by_date_and_sorts() {
        let repo = LocalRepository::with_reference_data();
        let d = doctor(&repo).await;
        crud::create(&repo, slot(d.id, 10, 14)).await.unwrap();
        crud::create(&repo, slot(d.id, 10, 9)).await.unwrap();
        crud::create(&repo, slot(d.id, 11, 9)).await.unwrap();

        let all = list_for_doctor(&repo, d.id, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let day = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
        let on_day = list_for_doctor(&repo, d.id, Some(day)).await.unwrap();
        assert_eq!(on_day.len(), 2);
        assert!(on_day[0].start_time < on_day[1].start_time);
        assert_eq!(on_day[0].day_of_week, DayOfWeek::Tuesday);
    }

    #[tokio::test]
    async fn test_unknown_doctor_is_not_found() {
        let repo = LocalRepository::with_reference_data();
        let err = list_for_doctor(&repo, DoctorId::new(404), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_slot_for_missing_doctor_rejected() {
        let repo = LocalRepository::with_reference_data();
        let err = crud::create(&repo, slot(DoctorId::new(9), 10, 9))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
