use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::events::dtos::EventDto;
use crate::features::participants::dtos::{RegistrationCreateDto, RegistrationData};
use crate::features::registrations::dtos::{
    RegistrationResponseDto, ShortlistDto, ShortlistResultDto,
};
use crate::features::registrations::services::RegistrationService;
use crate::shared::constants::DEFAULT_PAGE_SIZE;
use crate::shared::types::{ApiResponse, Meta, PaginationQuery};

fn take_number(params: &mut HashMap<String, String>, key: &str, default: i64) -> Result<i64> {
    match params.remove(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(format!("{} must be an integer", key))),
    }
}

/// List registrants of an event
///
/// `page` and `per_page` control paging; every other query parameter is an equality
/// filter on a participant field (e.g. `?organization=GDG&participant_status=SHORTLISTED`).
#[utoipa::path(
    get,
    path = "/api/events/{event_type}/participants",
    params(
        ("event_type" = String, Path, description = "WORKSHOP, CONFERENCE or HACKATHON"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Registrants retrieved", body = ApiResponse<EventDto>),
        (status = 400, description = "Invalid event type, page or filter"),
        (status = 404, description = "Event not found")
    ),
    tag = "registrations"
)]
pub async fn list_participants(
    State(service): State<Arc<RegistrationService>>,
    Path(event_type): Path<String>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<EventDto>>> {
    let page = take_number(&mut params, "page", 1)?;
    let per_page = take_number(&mut params, "per_page", DEFAULT_PAGE_SIZE)?;
    let pagination = PaginationQuery::new(page, per_page)?;

    let (event, total) = service
        .get_event_list(&event_type, pagination.page, pagination.per_page, &params)
        .await?;

    Ok(Json(ApiResponse::success(
        Some(event),
        None,
        Some(Meta::paginated(total, &pagination)),
    )))
}

/// Register for an event
///
/// The body is the registration form for the event type; unknown keys are ignored.
#[utoipa::path(
    post,
    path = "/api/events/{event_type}/register",
    params(("event_type" = String, Path, description = "WORKSHOP, CONFERENCE or HACKATHON")),
    request_body = RegistrationCreateDto,
    responses(
        (status = 201, description = "Registration created", body = ApiResponse<RegistrationResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found"),
        (status = 409, description = "Participant already registered for this event")
    ),
    tag = "registrations"
)]
pub async fn register(
    State(service): State<Arc<RegistrationService>>,
    Path(event_type): Path<String>,
    AppJson(data): AppJson<RegistrationData>,
) -> Result<(StatusCode, Json<ApiResponse<RegistrationResponseDto>>)> {
    let registration = service.register_event(&event_type, &data).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(registration),
            Some("Registration successful.".to_string()),
            None,
        )),
    ))
}

/// Shortlist registrants of an event
///
/// Ids that are not registered for the event are returned under `unmatched`.
#[utoipa::path(
    post,
    path = "/api/events/{event_type}/shortlist",
    params(("event_type" = String, Path, description = "WORKSHOP, CONFERENCE or HACKATHON")),
    request_body = ShortlistDto,
    responses(
        (status = 200, description = "Shortlist applied", body = ApiResponse<ShortlistResultDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Event not found")
    ),
    tag = "registrations"
)]
pub async fn shortlist(
    State(service): State<Arc<RegistrationService>>,
    Path(event_type): Path<String>,
    AppJson(dto): AppJson<ShortlistDto>,
) -> Result<Json<ApiResponse<ShortlistResultDto>>> {
    let result = service.shortlist_participants(dto, &event_type).await?;

    let message = format!("{} participant(s) shortlisted.", result.shortlisted.len());
    Ok(Json(ApiResponse::success(Some(result), Some(message), None)))
}
