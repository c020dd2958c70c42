//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Automatic retry for transient failures
//! - Connection health monitoring
//! - Automatic migration execution (schema plus reference data)
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)
//! - `PG_MAX_RETRIES`: Maximum retry attempts for transient failures (default: 3)
//! - `PG_RETRY_DELAY_MS`: Initial retry delay in milliseconds (default: 100)

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::dsl::exists;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task;

use crate::db::repository::{
    AppointmentRepository, AvailabilityModeRepository, AvailabilityRepository, DoctorRepository,
    ErrorContext, FullRepository, InsuranceProviderRepository, MedicalRecordRepository,
    NotificationRepository, PatientRepository, ReportRepository, Repository, RepositoryError,
    RepositoryResult, RoleRepository, SpecialtyRepository, StatusRepository, UserRepository,
};
use crate::models::{
    Appointment, AvailabilityMode, Doctor, DoctorAvailability, DoctorId, Entity,
    InsuranceProvider, InsuranceProviderId, MedicalRecord, Notification, Patient, PatientId,
    Report, Role, RoleId, Specialty, SpecialtyId, Status, StatusId, User, UserId,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connection_timeout_sec: u64,
    pub idle_timeout_sec: u64,
    /// Maximum number of retry attempts for transient failures
    pub max_retries: u32,
    /// Initial retry delay in milliseconds (doubles with each retry)
    pub retry_delay_ms: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
            max_retries: 3,
            retry_delay_ms: 100,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables (see module docs).
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
            max_retries: env_or("PG_MAX_RETRIES", defaults.max_retries),
            retry_delay_ms: env_or("PG_RETRY_DELAY_MS", defaults.retry_delay_ms),
        })
    }

    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Pool health statistics.
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    pub connections_in_use: u32,
    pub idle_connections: u32,
    pub total_connections: u32,
    pub max_size: u32,
    /// Total successful queries executed
    pub total_queries: u64,
    pub failed_queries: u64,
    pub retried_operations: u64,
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
    config: PostgresConfig,
    total_queries: Arc<AtomicU64>,
    failed_queries: Arc<AtomicU64>,
    retried_operations: Arc<AtomicU64>,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        log::info!(
            "Postgres repository ready (pool max={}, min={})",
            config.max_pool_size,
            config.min_pool_size
        );

        Ok(Self {
            pool,
            config,
            total_queries: Arc::new(AtomicU64::new(0)),
            failed_queries: Arc::new(AtomicU64::new(0)),
            retried_operations: Arc::new(AtomicU64::new(0)),
        })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;

        Ok(())
    }

    /// Execute a database operation with automatic retry for transient failures.
    ///
    /// Retries up to `max_retries` times on retryable errors (connection
    /// errors, timeouts, serialization failures) with exponential backoff.
    async fn with_conn<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static + Clone,
    {
        let pool = self.pool.clone();
        let max_retries = self.config.max_retries;
        let retry_delay_ms = self.config.retry_delay_ms;
        let total_queries = self.total_queries.clone();
        let failed_queries = self.failed_queries.clone();
        let retried_operations = self.retried_operations.clone();

        task::spawn_blocking(move || {
            let mut last_error = None;
            let mut retry_delay = Duration::from_millis(retry_delay_ms);

            for attempt in 0..=max_retries {
                if attempt > 0 {
                    retried_operations.fetch_add(1, Ordering::Relaxed);
                    std::thread::sleep(retry_delay);
                    retry_delay *= 2;
                }

                let mut conn = match pool.get() {
                    Ok(c) => c,
                    Err(e) => {
                        let err = RepositoryError::connection_with_context(
                            e.to_string(),
                            ErrorContext::new("get_connection")
                                .with_details(format!("attempt={}", attempt + 1)),
                        );
                        if attempt < max_retries {
                            last_error = Some(err);
                            continue;
                        }
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(err);
                    }
                };

                total_queries.fetch_add(1, Ordering::Relaxed);
                match f.clone()(&mut conn) {
                    Ok(result) => return Ok(result),
                    Err(e) if e.is_retryable() && attempt < max_retries => {
                        log::warn!("Retrying after transient error: {}", e);
                        last_error = Some(e);
                        continue;
                    }
                    Err(e) => {
                        failed_queries.fetch_add(1, Ordering::Relaxed);
                        return Err(e);
                    }
                }
            }

            failed_queries.fetch_add(1, Ordering::Relaxed);
            Err(last_error.unwrap_or_else(|| {
                RepositoryError::internal("Max retries exceeded with no error captured")
            }))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new("spawn_blocking"),
            )
        })?
    }

    /// Current pool state and query counters.
    pub fn get_pool_stats(&self) -> PoolStats {
        let state = self.pool.state();
        PoolStats {
            connections_in_use: state.connections - state.idle_connections,
            idle_connections: state.idle_connections,
            total_connections: state.connections,
            max_size: self.config.max_pool_size,
            total_queries: self.total_queries.load(Ordering::Relaxed),
            failed_queries: self.failed_queries.load(Ordering::Relaxed),
            retried_operations: self.retried_operations.load(Ordering::Relaxed),
        }
    }

    /// Returns `(is_healthy, latency_ms, error_message)`.
    pub async fn health_check_detailed(&self) -> (bool, Option<u64>, Option<String>) {
        let start = Instant::now();
        let result = self.health_check().await;
        let latency = Some(start.elapsed().as_millis() as u64);
        match result {
            Ok(true) => (true, latency, None),
            Ok(false) => (false, latency, Some("Health check returned false".to_string())),
            Err(e) => (false, latency, Some(e.to_string())),
        }
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

/// Resolve navigation references after a row is decoded.
trait Hydrate: Sized {
    fn hydrate(self, _conn: &mut PgConnection) -> RepositoryResult<Self> {
        Ok(self)
    }
}

impl Hydrate for Role {}
impl Hydrate for Specialty {}
impl Hydrate for InsuranceProvider {}
impl Hydrate for Status {}
impl Hydrate for AvailabilityMode {}
impl Hydrate for DoctorAvailability {}
impl Hydrate for MedicalRecord {}
impl Hydrate for Notification {}
impl Hydrate for Report {}

impl Hydrate for User {
    fn hydrate(mut self, conn: &mut PgConnection) -> RepositoryResult<Self> {
        self.role = roles::table
            .find(self.role_id.0)
            .select(RoleRow::as_select())
            .first::<RoleRow>(conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(Role::try_from)
            .transpose()?;
        Ok(self)
    }
}

impl Hydrate for Doctor {
    fn hydrate(mut self, conn: &mut PgConnection) -> RepositoryResult<Self> {
        self.specialty = specialties::table
            .find(self.specialty_id.0)
            .select(SpecialtyRow::as_select())
            .first::<SpecialtyRow>(conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(Specialty::try_from)
            .transpose()?;
        Ok(self)
    }
}

impl Hydrate for Patient {
    fn hydrate(mut self, conn: &mut PgConnection) -> RepositoryResult<Self> {
        self.insurance_provider = match self.insurance_provider_id {
            Some(id) => insurance_providers::table
                .find(id.0)
                .select(InsuranceProviderRow::as_select())
                .first::<InsuranceProviderRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(InsuranceProvider::try_from)
                .transpose()?,
            None => None,
        };
        Ok(self)
    }
}

impl Hydrate for Appointment {
    fn hydrate(mut self, conn: &mut PgConnection) -> RepositoryResult<Self> {
        self.status = statuses::table
            .find(self.status_id.0)
            .select(StatusRow::as_select())
            .first::<StatusRow>(conn)
            .optional()
            .map_err(map_diesel_error)?
            .map(Status::try_from)
            .transpose()?;
        Ok(self)
    }
}

fn decode<R, E>(row: R, conn: &mut PgConnection) -> RepositoryResult<E>
where
    E: TryFrom<R, Error = RepositoryError> + Hydrate,
{
    E::try_from(row)?.hydrate(conn)
}

fn decode_all<R, E>(rows: Vec<R>, conn: &mut PgConnection) -> RepositoryResult<Vec<E>>
where
    E: TryFrom<R, Error = RepositoryError> + Hydrate,
{
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        out.push(decode(row, conn)?);
    }
    Ok(out)
}

fn decode_opt<R, E>(row: Option<R>, conn: &mut PgConnection) -> RepositoryResult<Option<E>>
where
    E: TryFrom<R, Error = RepositoryError> + Hydrate,
{
    match row {
        Some(row) => decode(row, conn).map(Some),
        None => Ok(None),
    }
}

/// Generic CRUD over one table. Every table keys on an integer `id` column.
macro_rules! pg_repository {
    ($entity:ty, $table:ident, $row:ty, $new_row:ty) => {
        #[async_trait]
        impl Repository<$entity> for PostgresRepository {
            async fn get_by_id(
                &self,
                id: <$entity as Entity>::Id,
            ) -> RepositoryResult<Option<$entity>> {
                self.with_conn(move |conn| {
                    let row = $table::table
                        .find(id.0)
                        .select(<$row>::as_select())
                        .first::<$row>(conn)
                        .optional()
                        .map_err(map_diesel_error)?;
                    decode_opt(row, conn)
                })
                .await
                .map_err(|e| e.with_operation("get_by_id").with_entity(<$entity as Entity>::NAME))
            }

            async fn get_all(&self) -> RepositoryResult<Vec<$entity>> {
                self.with_conn(|conn| {
                    let rows = $table::table
                        .order($table::id.asc())
                        .select(<$row>::as_select())
                        .load::<$row>(conn)
                        .map_err(map_diesel_error)?;
                    decode_all(rows, conn)
                })
                .await
                .map_err(|e| e.with_operation("get_all").with_entity(<$entity as Entity>::NAME))
            }

            async fn add(&self, entity: $entity) -> RepositoryResult<$entity> {
                let new_row = <$new_row>::from(&entity);
                self.with_conn(move |conn| {
                    let row = diesel::insert_into($table::table)
                        .values(&new_row)
                        .returning(<$row>::as_returning())
                        .get_result::<$row>(conn)
                        .map_err(map_diesel_error)?;
                    decode(row, conn)
                })
                .await
                .map_err(|e| e.with_operation("add").with_entity(<$entity as Entity>::NAME))
            }

            async fn update(&self, entity: $entity) -> RepositoryResult<Option<$entity>> {
                let id = entity.id().0;
                let changes = <$new_row>::from(&entity);
                self.with_conn(move |conn| {
                    let row = diesel::update($table::table.find(id))
                        .set(&changes)
                        .returning(<$row>::as_returning())
                        .get_result::<$row>(conn)
                        .optional()
                        .map_err(map_diesel_error)?;
                    decode_opt(row, conn)
                })
                .await
                .map_err(|e| e.with_operation("update").with_entity(<$entity as Entity>::NAME))
            }

            async fn delete(&self, id: <$entity as Entity>::Id) -> RepositoryResult<bool> {
                self.with_conn(move |conn| {
                    diesel::delete($table::table.find(id.0))
                        .execute(conn)
                        .map(|n| n > 0)
                        .map_err(map_diesel_error)
                })
                .await
                .map_err(|e| e.with_operation("delete").with_entity(<$entity as Entity>::NAME))
            }

            async fn exists(&self, id: <$entity as Entity>::Id) -> RepositoryResult<bool> {
                self.with_conn(move |conn| {
                    diesel::select(exists($table::table.find(id.0)))
                        .get_result::<bool>(conn)
                        .map_err(map_diesel_error)
                })
                .await
            }
        }
    };
}

pg_repository!(Role, roles, RoleRow, NewRoleRow);
pg_repository!(User, users, UserRow, NewUserRow);
pg_repository!(Specialty, specialties, SpecialtyRow, NewSpecialtyRow);
pg_repository!(Doctor, doctors, DoctorRow, NewDoctorRow);
pg_repository!(Patient, patients, PatientRow, NewPatientRow);
pg_repository!(
    InsuranceProvider,
    insurance_providers,
    InsuranceProviderRow,
    NewInsuranceProviderRow
);
pg_repository!(Status, statuses, StatusRow, NewStatusRow);
pg_repository!(
    AvailabilityMode,
    availability_modes,
    AvailabilityModeRow,
    NewAvailabilityModeRow
);
pg_repository!(
    DoctorAvailability,
    doctor_availability,
    AvailabilityRow,
    NewAvailabilityRow
);
pg_repository!(Appointment, appointments, AppointmentRow, NewAppointmentRow);
pg_repository!(
    MedicalRecord,
    medical_records,
    MedicalRecordRow,
    NewMedicalRecordRow
);
pg_repository!(Notification, notifications, NotificationRow, NewNotificationRow);
pg_repository!(Report, reports, ReportRow, NewReportRow);

#[async_trait]
impl RoleRepository for PostgresRepository {
    async fn get_role_by_name(&self, name: &str) -> RepositoryResult<Option<Role>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row = roles::table
                .filter(roles::role_name.eq(&name))
                .select(RoleRow::as_select())
                .first::<RoleRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }
}

#[async_trait]
impl UserRepository for PostgresRepository {
    async fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let email = email.to_string();
        self.with_conn(move |conn| {
            let row = users::table
                .filter(users::email.eq(&email))
                .select(UserRow::as_select())
                .first::<UserRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }

    async fn get_users_by_role_id(&self, role_id: RoleId) -> RepositoryResult<Vec<User>> {
        self.with_conn(move |conn| {
            let rows = users::table
                .filter(users::role_id.eq(role_id.0))
                .order(users::id.asc())
                .select(UserRow::as_select())
                .load::<UserRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl SpecialtyRepository for PostgresRepository {
    async fn get_specialty_by_name(&self, name: &str) -> RepositoryResult<Option<Specialty>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row = specialties::table
                .filter(specialties::name.eq(&name))
                .select(SpecialtyRow::as_select())
                .first::<SpecialtyRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }
}

#[async_trait]
impl DoctorRepository for PostgresRepository {
    async fn get_doctors_by_specialty_id(
        &self,
        specialty_id: SpecialtyId,
    ) -> RepositoryResult<Vec<Doctor>> {
        self.with_conn(move |conn| {
            let rows = doctors::table
                .filter(doctors::specialty_id.eq(specialty_id.0))
                .order(doctors::id.asc())
                .select(DoctorRow::as_select())
                .load::<DoctorRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_doctor_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Doctor>> {
        self.with_conn(move |conn| {
            let row = doctors::table
                .filter(doctors::user_id.eq(user_id.0))
                .select(DoctorRow::as_select())
                .first::<DoctorRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }
}

#[async_trait]
impl PatientRepository for PostgresRepository {
    async fn get_patient_by_user_id(&self, user_id: UserId) -> RepositoryResult<Option<Patient>> {
        self.with_conn(move |conn| {
            let row = patients::table
                .filter(patients::user_id.eq(user_id.0))
                .select(PatientRow::as_select())
                .first::<PatientRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }

    async fn get_patients_by_insurance_provider_id(
        &self,
        provider_id: InsuranceProviderId,
    ) -> RepositoryResult<Vec<Patient>> {
        self.with_conn(move |conn| {
            let rows = patients::table
                .filter(patients::insurance_provider_id.eq(provider_id.0))
                .order(patients::id.asc())
                .select(PatientRow::as_select())
                .load::<PatientRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl InsuranceProviderRepository for PostgresRepository {
    async fn get_insurance_provider_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<InsuranceProvider>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row = insurance_providers::table
                .filter(insurance_providers::name.eq(&name))
                .select(InsuranceProviderRow::as_select())
                .first::<InsuranceProviderRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }
}

#[async_trait]
impl StatusRepository for PostgresRepository {
    async fn get_status_by_name(&self, name: &str) -> RepositoryResult<Option<Status>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row = statuses::table
                .filter(statuses::name.eq(&name))
                .select(StatusRow::as_select())
                .first::<StatusRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }
}

#[async_trait]
impl AvailabilityModeRepository for PostgresRepository {
    async fn get_availability_mode_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<AvailabilityMode>> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let row = availability_modes::table
                .filter(availability_modes::name.eq(&name))
                .select(AvailabilityModeRow::as_select())
                .first::<AvailabilityModeRow>(conn)
                .optional()
                .map_err(map_diesel_error)?;
            decode_opt(row, conn)
        })
        .await
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresRepository {
    async fn get_availability_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<DoctorAvailability>> {
        self.with_conn(move |conn| {
            let rows = doctor_availability::table
                .filter(doctor_availability::doctor_id.eq(doctor_id.0))
                .order((
                    doctor_availability::available_date.asc(),
                    doctor_availability::start_time.asc(),
                ))
                .select(AvailabilityRow::as_select())
                .load::<AvailabilityRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_availability_by_doctor_and_date(
        &self,
        doctor_id: DoctorId,
        date: NaiveDate,
    ) -> RepositoryResult<Vec<DoctorAvailability>> {
        self.with_conn(move |conn| {
            let rows = doctor_availability::table
                .filter(doctor_availability::doctor_id.eq(doctor_id.0))
                .filter(doctor_availability::available_date.eq(date))
                .order(doctor_availability::start_time.asc())
                .select(AvailabilityRow::as_select())
                .load::<AvailabilityRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl AppointmentRepository for PostgresRepository {
    async fn get_appointments_by_patient_id(
        &self,
        patient_id: PatientId,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(move |conn| {
            let rows = appointments::table
                .filter(appointments::patient_id.eq(patient_id.0))
                .order(appointments::scheduled_at.asc())
                .select(AppointmentRow::as_select())
                .load::<AppointmentRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_appointments_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(move |conn| {
            let rows = appointments::table
                .filter(appointments::doctor_id.eq(doctor_id.0))
                .order(appointments::scheduled_at.asc())
                .select(AppointmentRow::as_select())
                .load::<AppointmentRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_appointments_by_status_id(
        &self,
        status_id: StatusId,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(move |conn| {
            let rows = appointments::table
                .filter(appointments::status_id.eq(status_id.0))
                .order(appointments::scheduled_at.asc())
                .select(AppointmentRow::as_select())
                .load::<AppointmentRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_appointments_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<Appointment>> {
        self.with_conn(move |conn| {
            let rows = appointments::table
                .filter(appointments::scheduled_at.ge(from))
                .filter(appointments::scheduled_at.lt(to))
                .order((appointments::scheduled_at.asc(), appointments::id.asc()))
                .select(AppointmentRow::as_select())
                .load::<AppointmentRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl MedicalRecordRepository for PostgresRepository {
    async fn get_medical_records_by_patient_id(
        &self,
        patient_id: PatientId,
    ) -> RepositoryResult<Vec<MedicalRecord>> {
        self.with_conn(move |conn| {
            let rows = medical_records::table
                .filter(medical_records::patient_id.eq(patient_id.0))
                .order((medical_records::record_date.asc(), medical_records::id.asc()))
                .select(MedicalRecordRow::as_select())
                .load::<MedicalRecordRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_medical_records_by_doctor_id(
        &self,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Vec<MedicalRecord>> {
        self.with_conn(move |conn| {
            let rows = medical_records::table
                .filter(medical_records::doctor_id.eq(doctor_id.0))
                .order((medical_records::record_date.asc(), medical_records::id.asc()))
                .select(MedicalRecordRow::as_select())
                .load::<MedicalRecordRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl NotificationRepository for PostgresRepository {
    async fn get_notifications_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Notification>> {
        self.with_conn(move |conn| {
            let rows = notifications::table
                .filter(notifications::user_id.eq(user_id.0))
                .order((notifications::created_at.desc(), notifications::id.desc()))
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }

    async fn get_unread_notifications_by_user_id(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Notification>> {
        self.with_conn(move |conn| {
            let rows = notifications::table
                .filter(notifications::user_id.eq(user_id.0))
                .filter(notifications::is_read.eq(false))
                .order((notifications::created_at.desc(), notifications::id.desc()))
                .select(NotificationRow::as_select())
                .load::<NotificationRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl ReportRepository for PostgresRepository {
    async fn get_reports_by_generated_by(
        &self,
        user_id: UserId,
    ) -> RepositoryResult<Vec<Report>> {
        self.with_conn(move |conn| {
            let rows = reports::table
                .filter(reports::generated_by.eq(user_id.0))
                .order(reports::id.asc())
                .select(ReportRow::as_select())
                .load::<ReportRow>(conn)
                .map_err(map_diesel_error)?;
            decode_all(rows, conn)
        })
        .await
    }
}

#[async_trait]
impl FullRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn(|conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }
}
