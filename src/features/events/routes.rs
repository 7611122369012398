use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::events::handlers;
use crate::features::events::services::EventService;

pub fn routes(service: Arc<EventService>) -> Router {
    Router::new()
        .route("/api/events", get(handlers::list_events))
        .with_state(service)
}
