//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, compression, tracing, body
//! limit, authentication) and returns the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put, MethodRouter},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::state::AppState;
use super::{auth, crud, docs, handlers};
use crate::db::repository::{FullRepository, Repository};
use crate::models::{
    Appointment, AvailabilityMode, Doctor, DoctorAvailability, InsuranceProvider, MedicalRecord,
    Notification, Patient, Report, Role, Specialty, Status, User,
};
use crate::routes::{FromCreate, Resource};

/// List, read, update, delete and exists routes of one resource, with
/// `create` as its POST handler.
fn resource<E>(create: MethodRouter<AppState>) -> Router<AppState>
where
    E: Resource,
    dyn FullRepository: Repository<E>,
{
    Router::new()
        .route("/", get(crud::list::<E>).merge(create))
        .route(
            "/{id}",
            get(crud::get::<E>)
                .put(crud::update::<E>)
                .delete(crud::delete::<E>),
        )
        .route("/{id}/exists", get(crud::exists::<E>))
}

fn standard<E>() -> Router<AppState>
where
    E: FromCreate,
    dyn FullRepository: Repository<E>,
{
    resource::<E>(post(crud::create::<E>))
}

fn path<E: Resource>() -> String {
    format!("/{}", E::PATH)
}

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/auth/login", post(handlers::login))
        .route("/auth/register", post(handlers::register));

    let protected = Router::new()
        .route("/auth/me", get(handlers::me))
        // Reference data
        .nest(&path::<Role>(), standard::<Role>())
        .nest(&path::<Specialty>(), standard::<Specialty>())
        .nest(&path::<Status>(), standard::<Status>())
        .nest(&path::<AvailabilityMode>(), standard::<AvailabilityMode>())
        .nest(&path::<InsuranceProvider>(), standard::<InsuranceProvider>())
        // Accounts
        .nest(
            &path::<User>(),
            resource::<User>(post(handlers::create_user))
                .route("/{id}/password", put(handlers::change_password))
                .route("/{id}/notifications", get(handlers::user_notifications))
                .route(
                    "/{id}/notifications/read-all",
                    post(handlers::mark_all_notifications_read),
                ),
        )
        // People
        .nest(
            &path::<Doctor>(),
            standard::<Doctor>()
                .route("/{id}/availability", get(handlers::doctor_availability))
                .route("/{id}/appointments", get(handlers::doctor_appointments))
                .route("/{id}/medical-records", get(handlers::doctor_medical_records)),
        )
        .nest(
            &path::<Patient>(),
            standard::<Patient>()
                .route("/{id}/appointments", get(handlers::patient_appointments))
                .route("/{id}/medical-records", get(handlers::patient_medical_records)),
        )
        // Scheduling
        .nest(&path::<DoctorAvailability>(), standard::<DoctorAvailability>())
        .nest(
            &path::<Appointment>(),
            resource::<Appointment>(post(handlers::book_appointment))
                .route("/{id}/cancel", post(handlers::cancel_appointment)),
        )
        .nest(&path::<MedicalRecord>(), standard::<MedicalRecord>())
        // Inbox reads are scoped to the caller; writes need admin
        .nest(
            &path::<Notification>(),
            Router::new()
                .route(
                    "/",
                    get(handlers::list_notifications).post(crud::create::<Notification>),
                )
                .route(
                    "/{id}",
                    get(handlers::get_notification)
                        .put(crud::update::<Notification>)
                        .delete(crud::delete::<Notification>),
                )
                .route("/{id}/exists", get(crud::exists::<Notification>))
                .route("/{id}/read", post(handlers::mark_notification_read)),
        )
        .nest(
            &path::<Report>(),
            standard::<Report>()
                .route("/appointments", get(handlers::appointment_report))
                .route("/{id}/run", get(handlers::run_report)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", public.merge(protected));

    if state.config.is_development() {
        app = app.route("/api-docs", get(docs::api_docs));
    }

    app.layer(DefaultBodyLimit::max(state.config.body_limit_bytes()))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
