use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// Event type enum matching database enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Type, ToSchema,
)]
#[sqlx(type_name = "event_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Workshop,
    Conference,
    Hackathon,
}

impl EventType {
    pub const ALL: [EventType; 3] = [
        EventType::Workshop,
        EventType::Conference,
        EventType::Hackathon,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Workshop => "WORKSHOP",
            EventType::Conference => "CONFERENCE",
            EventType::Hackathon => "HACKATHON",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = AppError;

    /// Case-insensitive, so `/api/events/hackathon/...` and `HACKATHON` resolve alike
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|event_type| event_type.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| AppError::BadRequest(format!("Invalid event type '{}'.", value)))
    }
}

/// Database model for event
#[derive(Debug, Clone, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_type: EventType,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
