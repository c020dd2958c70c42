use super::crud;
use super::error::ServiceResult;
use crate::db::repository::FullRepository;
use crate::models::{Doctor, DoctorId, MedicalRecord, Patient, PatientId};

pub async fn list_for_patient<R>(
    repo: &R,
    patient_id: PatientId,
) -> ServiceResult<Vec<MedicalRecord>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<Patient, R>(repo, patient_id).await?;
    Ok(repo.get_medical_records_by_patient_id(patient_id).await?)
}

pub async fn list_for_doctor<R>(repo: &R, doctor_id: DoctorId) -> ServiceResult<Vec<MedicalRecord>>
where
    R: FullRepository + ?Sized,
{
    crud::ensure_exists::<Doctor, R>(repo, doctor_id).await?;
    Ok(repo.get_medical_records_by_doctor_id(doctor_id).await?)
}
