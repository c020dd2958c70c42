use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{default_true, patch, patch_opt, FromCreate, PersonUpdate, Resource};
use crate::models::{unsaved, Doctor, DoctorId, PersonBase, SpecialtyId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorDto {
    pub id: DoctorId,
    #[serde(flatten)]
    pub person: PersonBase,
    pub user_id: Option<UserId>,
    pub specialty_id: SpecialtyId,
    pub specialty_name: String,
    pub license_number: String,
    pub years_of_experience: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctorDto {
    #[serde(flatten)]
    pub person: PersonBase,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub specialty_id: SpecialtyId,
    pub license_number: String,
    #[serde(default)]
    pub years_of_experience: Option<i32>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDoctorDto {
    #[serde(flatten)]
    pub person: PersonUpdate,
    pub user_id: Option<UserId>,
    pub specialty_id: Option<SpecialtyId>,
    pub license_number: Option<String>,
    pub years_of_experience: Option<i32>,
    pub consultation_fee: Option<f64>,
    pub is_active: Option<bool>,
}

impl Resource for Doctor {
    type Dto = DoctorDto;
    type Update = UpdateDoctorDto;
    const PATH: &'static str = "doctors";

    fn to_dto(&self) -> DoctorDto {
        DoctorDto {
            id: self.id,
            person: self.person.clone(),
            user_id: self.user_id,
            specialty_id: self.specialty_id,
            specialty_name: self
                .specialty
                .as_ref()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            license_number: self.license_number.clone(),
            years_of_experience: self.years_of_experience,
            consultation_fee: self.consultation_fee,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn apply_update(&mut self, update: UpdateDoctorDto) {
        update.person.apply(&mut self.person);
        patch_opt(&mut self.user_id, update.user_id);
        if let Some(specialty_id) = update.specialty_id {
            if specialty_id != self.specialty_id {
                self.specialty_id = specialty_id;
                self.specialty = None;
            }
        }
        patch(&mut self.license_number, update.license_number);
        patch_opt(&mut self.years_of_experience, update.years_of_experience);
        patch_opt(&mut self.consultation_fee, update.consultation_fee);
        patch(&mut self.is_active, update.is_active);
    }
}

impl FromCreate for Doctor {
    type Create = CreateDoctorDto;

    fn from_create(create: CreateDoctorDto) -> Self {
        Doctor {
            id: unsaved(),
            person: create.person,
            user_id: create.user_id,
            specialty_id: create.specialty_id,
            specialty: None,
            license_number: create.license_number,
            years_of_experience: create.years_of_experience,
            consultation_fee: create.consultation_fee,
            is_active: create.is_active,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Specialty;
    use serde_json::json;

    #[test]
    fn test_create_body_with_flattened_person() {
        let body = json!({
            "first_name": "Gregory",
            "last_name": "House",
            "specialty_id": 2,
            "license_number": "NJ-1138"
        });
        let create: CreateDoctorDto = serde_json::from_value(body).unwrap();
        let doctor = Doctor::from_create(create);
        assert_eq!(doctor.person.full_name(), "Gregory House");
        assert!(doctor.is_active);
        assert_eq!(doctor.specialty_id, SpecialtyId(2));
    }

    #[test]
    fn test_dto_flattens_specialty() {
        let mut doctor = Doctor::from_create(CreateDoctorDto {
            person: PersonBase {
                first_name: "James".to_string(),
                last_name: "Wilson".to_string(),
                ..Default::default()
            },
            user_id: None,
            specialty_id: SpecialtyId(1),
            license_number: "NJ-2001".to_string(),
            years_of_experience: None,
            consultation_fee: None,
            is_active: true,
        });
        assert_eq!(doctor.to_dto().specialty_name, "");

        doctor.specialty = Some(Specialty {
            id: SpecialtyId(1),
            name: "Oncology".to_string(),
            description: None,
            is_active: true,
        });
        let json = serde_json::to_value(doctor.to_dto()).unwrap();
        assert_eq!(json["specialty_name"], "Oncology");
        assert_eq!(json["first_name"], "James");
    }
}
