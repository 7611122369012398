use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::events::dtos::EventResponseDto;
use crate::features::events::services::EventService;
use crate::shared::types::{ApiResponse, Meta};

/// List all events open for registration
#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "Events retrieved", body = ApiResponse<Vec<EventResponseDto>>),
        (status = 500, description = "Internal server error")
    ),
    tag = "events"
)]
pub async fn list_events(
    State(service): State<Arc<EventService>>,
) -> Result<Json<ApiResponse<Vec<EventResponseDto>>>> {
    let events = service.list_events().await?;
    let total = events.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(events),
        None,
        Some(Meta {
            total,
            page: None,
            per_page: None,
        }),
    )))
}
