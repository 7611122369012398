use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::registrations::handlers;
use crate::features::registrations::services::RegistrationService;

/// Create routes for event registration
///
/// Note: these endpoints are public; the registration form is open to anyone.
pub fn routes(service: Arc<RegistrationService>) -> Router {
    Router::new()
        .route(
            "/api/events/{event_type}/participants",
            get(handlers::list_participants),
        )
        .route("/api/events/{event_type}/register", post(handlers::register))
        .route(
            "/api/events/{event_type}/shortlist",
            post(handlers::shortlist),
        )
        .with_state(service)
}
