use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::events::models::EventType;
use crate::features::participants::dtos::TeamMemberDto;
use crate::features::registrations::models::RegistrationDetail;
use crate::shared::constants::MAX_SHORTLIST_SIZE;

/// Response DTO for a created registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponseDto {
    pub id: Uuid,
    pub event_id: Uuid,
    pub event_type: EventType,
    pub participant_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workshop_participation: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub team_members: Vec<TeamMemberDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose_of_participation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_technologies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_projects: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RegistrationResponseDto {
    pub fn from_detail(event_type: EventType, detail: RegistrationDetail) -> Self {
        let RegistrationDetail {
            registration,
            participant,
            team_members,
        } = detail;

        Self {
            id: registration.id,
            event_id: registration.event_id,
            event_type,
            participant_id: participant.id,
            workshop_participation: registration.workshop_participation,
            job_role: match event_type {
                EventType::Conference => participant.job_role,
                _ => None,
            },
            team_name: registration.team_name,
            team_members: team_members.iter().map(TeamMemberDto::from).collect(),
            purpose_of_participation: registration.purpose_of_participation,
            google_technologies: registration.google_technologies,
            previous_projects: registration.previous_projects,
            created_at: registration.created_at,
        }
    }
}

/// Request DTO for shortlisting participants of an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ShortlistDto {
    #[validate(length(
        min = 1,
        max = MAX_SHORTLIST_SIZE,
        message = "Provide between 1 and 500 participant ids"
    ))]
    pub participants: Vec<Uuid>,
}

/// Per-id outcome of a shortlist request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ShortlistResultDto {
    /// Newly shortlisted by this request
    pub shortlisted: Vec<Uuid>,
    /// Registered for the event and already shortlisted earlier
    pub already_shortlisted: Vec<Uuid>,
    /// Not registered for this event (or unknown)
    pub unmatched: Vec<Uuid>,
}
