//! Route catalogue served at `/api-docs` in development.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{
    Appointment, AvailabilityMode, Doctor, DoctorAvailability, InsuranceProvider, MedicalRecord,
    Notification, Patient, Report, Role, Specialty, Status, User,
};
use crate::routes::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDoc {
    pub method: String,
    pub path: String,
    pub auth: bool,
    pub admin: bool,
    pub description: String,
}

impl RouteDoc {
    fn new(method: &str, path: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            method: method.to_string(),
            path: path.into(),
            auth: true,
            admin: false,
            description: description.into(),
        }
    }

    fn public(mut self) -> Self {
        self.auth = false;
        self
    }

    fn admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiCatalogue {
    pub name: String,
    pub version: String,
    pub routes: Vec<RouteDoc>,
}

fn resource_docs<E: Resource>(out: &mut Vec<RouteDoc>) {
    let base = format!("/api/{}", E::PATH);
    let item = format!("{}/{{id}}", base);
    let name = E::NAME;
    out.push(RouteDoc::new("GET", base.clone(), format!("List every {}", name)));
    out.push(
        RouteDoc::new("POST", base, format!("Create a {}", name)).admin(E::REQUIRES_ADMIN),
    );
    out.push(RouteDoc::new("GET", item.clone(), format!("Get one {}", name)));
    out.push(
        RouteDoc::new("PUT", item.clone(), format!("Partially update a {}", name))
            .admin(E::REQUIRES_ADMIN),
    );
    out.push(
        RouteDoc::new("DELETE", item.clone(), format!("Delete a {}", name))
            .admin(E::REQUIRES_ADMIN),
    );
    out.push(RouteDoc::new(
        "GET",
        format!("{}/exists", item),
        format!("Whether a {} exists", name),
    ));
}

pub fn catalogue() -> ApiCatalogue {
    let mut routes = vec![
        RouteDoc::new("GET", "/health", "Service and database health").public(),
        RouteDoc::new("POST", "/api/auth/login", "Exchange credentials for a JWT").public(),
        RouteDoc::new("POST", "/api/auth/register", "Create a patient account").public(),
        RouteDoc::new("GET", "/api/auth/me", "The signed-in user"),
    ];

    resource_docs::<Role>(&mut routes);
    resource_docs::<User>(&mut routes);
    resource_docs::<Specialty>(&mut routes);
    resource_docs::<Status>(&mut routes);
    resource_docs::<AvailabilityMode>(&mut routes);
    resource_docs::<InsuranceProvider>(&mut routes);
    resource_docs::<Doctor>(&mut routes);
    resource_docs::<Patient>(&mut routes);
    resource_docs::<DoctorAvailability>(&mut routes);
    resource_docs::<Appointment>(&mut routes);
    resource_docs::<MedicalRecord>(&mut routes);
    resource_docs::<Notification>(&mut routes);
    if let Some(list) = routes
        .iter_mut()
        .find(|r| r.method == "GET" && r.path == "/api/notifications")
    {
        list.description = "Notifications of the caller, every one for admins".to_string();
    }
    resource_docs::<Report>(&mut routes);

    routes.extend([
        RouteDoc::new("PUT", "/api/users/{id}/password", "Change a password"),
        RouteDoc::new(
            "GET",
            "/api/doctors/{id}/availability",
            "Availability slots of a doctor, optional ?date=YYYY-MM-DD",
        ),
        RouteDoc::new("GET", "/api/doctors/{id}/appointments", "Appointments of a doctor"),
        RouteDoc::new("GET", "/api/patients/{id}/appointments", "Appointments of a patient"),
        RouteDoc::new("GET", "/api/doctors/{id}/medical-records", "Records written by a doctor"),
        RouteDoc::new("GET", "/api/patients/{id}/medical-records", "Records of a patient"),
        RouteDoc::new("POST", "/api/appointments/{id}/cancel", "Cancel an appointment"),
        RouteDoc::new(
            "GET",
            "/api/users/{id}/notifications",
            "Notifications of a user, optional ?unread_only=true",
        ),
        RouteDoc::new("POST", "/api/notifications/{id}/read", "Mark an own notification read"),
        RouteDoc::new(
            "POST",
            "/api/users/{id}/notifications/read-all",
            "Mark every notification of a user read",
        ),
        RouteDoc::new(
            "GET",
            "/api/reports/appointments",
            "Appointment report, filters from, to, doctor_id, status_id",
        ),
        RouteDoc::new("GET", "/api/reports/{id}/run", "Run a saved report"),
    ]);

    ApiCatalogue {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        routes,
    }
}

/// GET /api-docs
pub async fn api_docs() -> Json<ApiCatalogue> {
    Json(catalogue())
}
