use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::events::models::{Event, EventType};
use crate::features::participants::dtos::EventParticipantDto;

/// Response DTO for an event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponseDto {
    pub id: Uuid,
    pub name: String,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponseDto {
    fn from(e: Event) -> Self {
        Self {
            id: e.id,
            name: e.name,
            event_type: e.event_type,
            description: e.description,
            created_at: e.created_at,
        }
    }
}

/// Registrant listing for one event
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDto {
    pub event_type: EventType,
    pub participants: Vec<EventParticipantDto>,
}
