//! Accounts: creation, registration, login and password changes.
//!
//! bcrypt work runs on the blocking pool so request tasks stay responsive.

use chrono::Utc;
use log::{info, warn};
use serde::Deserialize;

use super::crud;
use super::error::{ServiceError, ServiceResult};
use crate::db::repository::FullRepository;
use crate::models::role::{ADMIN_ROLE, PATIENT_ROLE};
use crate::models::user::normalize_email;
use crate::models::{unsaved, Patient, PersonBase, RoleId, User, UserId};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Input for creating an account.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role_id: RoleId,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Self-service sign-up. Always produces a `Patient` account.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

fn check_password_strength(password: &str) -> ServiceResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ServiceError::Validation(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

pub async fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ServiceError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| ServiceError::Internal(format!("Password hashing failed: {}", e)))
}

pub async fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ServiceError::Internal(format!("Task join error: {}", e)))?
        .or_else(|e| {
            // A malformed stored hash is a failed login, not a server error.
            warn!("Password verification error: {}", e);
            Ok(false)
        })
}

pub async fn create_user<R>(repo: &R, input: NewUser, bcrypt_cost: u32) -> ServiceResult<User>
where
    R: FullRepository + ?Sized,
{
    check_password_strength(&input.password)?;
    let password_hash = hash_password(&input.password, bcrypt_cost).await?;

    let user = User {
        id: unsaved(),
        email: input.email,
        password_hash,
        first_name: input.first_name,
        last_name: input.last_name,
        role_id: input.role_id,
        role: None,
        is_active: input.is_active,
        created_at: Utc::now(),
        updated_at: None,
    };
    crud::create(repo, user).await
}

/// Create a `Patient` account plus the linked patient profile.
pub async fn register<R>(
    repo: &R,
    registration: Registration,
    bcrypt_cost: u32,
) -> ServiceResult<(User, Patient)>
where
    R: FullRepository + ?Sized,
{
    let role = repo.get_role_by_name(PATIENT_ROLE).await?.ok_or_else(|| {
        ServiceError::Validation(format!("role '{}' is not configured", PATIENT_ROLE))
    })?;

    let user = create_user(
        repo,
        NewUser {
            email: registration.email,
            password: registration.password,
            first_name: registration.first_name,
            last_name: registration.last_name,
            role_id: role.id,
            is_active: true,
        },
        bcrypt_cost,
    )
    .await?;

    let profile = Patient {
        id: unsaved(),
        person: PersonBase {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: Some(user.email.clone()),
            phone: registration.phone,
            ..Default::default()
        },
        user_id: Some(user.id),
        insurance_provider_id: None,
        insurance_provider: None,
        policy_number: None,
        blood_type: None,
        allergies: None,
        emergency_contact_name: None,
        emergency_contact_phone: None,
        is_active: true,
        created_at: Utc::now(),
        updated_at: None,
    };
    let patient = crud::create(repo, profile).await?;

    info!("Registered user {} with patient {}", user.id, patient.id);
    Ok((user, patient))
}

/// Check credentials. Unknown email, wrong password and inactive accounts
/// all fail the same way.
pub async fn authenticate<R>(repo: &R, email: &str, password: &str) -> ServiceResult<User>
where
    R: FullRepository + ?Sized,
{
    let invalid = || ServiceError::Unauthorized("invalid email or password".to_string());

    let user = repo
        .get_user_by_email(&normalize_email(email))
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active || !verify_password(password, &user.password_hash).await? {
        return Err(invalid());
    }
    Ok(user)
}

/// Replace a password. When `current_password` is given it must match.
pub async fn change_password<R>(
    repo: &R,
    user_id: UserId,
    current_password: Option<&str>,
    new_password: &str,
    bcrypt_cost: u32,
) -> ServiceResult<()>
where
    R: FullRepository + ?Sized,
{
    let user: User = crud::get(repo, user_id).await?;

    if let Some(current) = current_password {
        if !verify_password(current, &user.password_hash).await? {
            return Err(ServiceError::Unauthorized(
                "current password is incorrect".to_string(),
            ));
        }
    }

    check_password_strength(new_password)?;
    let password_hash = hash_password(new_password, bcrypt_cost).await?;
    crud::modify(repo, user_id, move |u: &mut User| u.password_hash = password_hash).await?;
    info!("Password changed for user {}", user_id);
    Ok(())
}

pub async fn deactivate<R>(repo: &R, user_id: UserId) -> ServiceResult<User>
where
    R: FullRepository + ?Sized,
{
    crud::modify(repo, user_id, |u: &mut User| u.is_active = false).await
}

/// Make sure an administrator account exists. Returns the account when one
/// was created.
pub async fn bootstrap_admin<R>(
    repo: &R,
    email: &str,
    password: &str,
    bcrypt_cost: u32,
) -> ServiceResult<Option<User>>
where
    R: FullRepository + ?Sized,
{
    if repo
        .get_user_by_email(&normalize_email(email))
        .await?
        .is_some()
    {
        return Ok(None);
    }

    let role = repo.get_role_by_name(ADMIN_ROLE).await?.ok_or_else(|| {
        ServiceError::Validation(format!("role '{}' is not configured", ADMIN_ROLE))
    })?;

    let admin = create_user(
        repo,
        NewUser {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            role_id: role.id,
            is_active: true,
        },
        bcrypt_cost,
    )
    .await?;
    info!("Bootstrapped administrator {}", admin.email);
    Ok(Some(admin))
}
