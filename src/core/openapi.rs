use utoipa::{Modify, OpenApi};

use crate::features::events::{dtos as events_dtos, handlers as events_handlers};
use crate::features::events::models::EventType;
use crate::features::participants::dtos as participants_dtos;
use crate::features::participants::models::ParticipantStatus;
use crate::features::registrations::{
    dtos as registrations_dtos, handlers as registrations_handlers,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Events
        events_handlers::list_events,
        // Registrations
        registrations_handlers::list_participants,
        registrations_handlers::register,
        registrations_handlers::shortlist,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Events
            EventType,
            events_dtos::EventResponseDto,
            events_dtos::EventDto,
            ApiResponse<Vec<events_dtos::EventResponseDto>>,
            ApiResponse<events_dtos::EventDto>,
            // Participants
            ParticipantStatus,
            participants_dtos::ParticipantDto,
            participants_dtos::TeamMemberDto,
            participants_dtos::WorkshopParticipantDto,
            participants_dtos::ConferenceParticipantDto,
            participants_dtos::HackathonParticipantDto,
            participants_dtos::EventParticipantDto,
            participants_dtos::ParticipantCreateDto,
            participants_dtos::WorkshopParticipantCreateDto,
            participants_dtos::ConferenceParticipantCreateDto,
            participants_dtos::HackathonParticipantCreateDto,
            participants_dtos::RegistrationCreateDto,
            // Registrations
            registrations_dtos::RegistrationResponseDto,
            registrations_dtos::ShortlistDto,
            registrations_dtos::ShortlistResultDto,
            ApiResponse<registrations_dtos::RegistrationResponseDto>,
            ApiResponse<registrations_dtos::ShortlistResultDto>,
        )
    ),
    tags(
        (name = "events", description = "Events open for registration (public)"),
        (name = "registrations", description = "Event registration, registrant listings and shortlisting"),
    ),
    info(
        title = "GDG Registration API",
        version = "0.1.0",
        description = "API documentation for GDG event registration",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
