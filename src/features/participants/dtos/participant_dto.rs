use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::events::models::EventType;
use crate::features::participants::models::{Participant, ParticipantStatus};
use crate::features::registrations::models::{RegistrationDetail, TeamMember};
use crate::shared::constants::{MAX_LINKEDIN_URL_LENGTH, MAX_PHONE_LENGTH};
use crate::shared::validation::PHONE_REGEX;

/// Common read shape shared by every event-specific participant view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDto {
    pub id: Uuid,
    pub name: String,
    pub email_address: String,
    pub cnic: String,
    pub registered_as: String,
    pub phone_number: String,
    pub organization: String,
    pub linkedin_url: String,
    pub ambassador_name: String,
    pub payment_acknowledgement: Option<String>,
    pub status: ParticipantStatus,
}

impl From<&Participant> for ParticipantDto {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            email_address: p.email_address.clone(),
            cnic: p.cnic.clone(),
            registered_as: p.registered_as.clone(),
            phone_number: p.phone_number.clone(),
            organization: p.organization.clone(),
            linkedin_url: p.linkedin_url.clone(),
            ambassador_name: p.ambassador_name.clone(),
            payment_acknowledgement: p.payment_acknowledgement.clone(),
            status: p.participant_status,
        }
    }
}

/// Hackathon team member, used for both submission and listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TeamMemberDto {
    #[validate(length(min = 1, max = 255, message = "Team member name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid team member email format"))]
    pub email_address: String,

    #[serde(default)]
    #[validate(
        length(max = MAX_PHONE_LENGTH, message = "Team member phone number must not exceed 20 characters"),
        regex(path = *PHONE_REGEX, message = "Invalid team member phone number")
    )]
    pub phone_number: Option<String>,

    #[serde(default)]
    #[validate(
        length(max = MAX_LINKEDIN_URL_LENGTH, message = "Team member LinkedIn URL must not exceed 2048 characters"),
        url(message = "Invalid team member LinkedIn URL")
    )]
    pub linkedin_url: Option<String>,
}

impl From<&TeamMember> for TeamMemberDto {
    fn from(m: &TeamMember) -> Self {
        Self {
            name: m.name.clone(),
            email_address: m.email_address.clone(),
            phone_number: m.phone_number.clone(),
            linkedin_url: m.linkedin_url.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkshopParticipantDto {
    #[serde(flatten)]
    pub participant: ParticipantDto,
    pub workshop_participation: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConferenceParticipantDto {
    #[serde(flatten)]
    pub participant: ParticipantDto,
    pub job_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HackathonParticipantDto {
    #[serde(flatten)]
    pub participant: ParticipantDto,
    pub team_name: Option<String>,
    pub team_members: Vec<TeamMemberDto>,
    pub purpose_of_participation: Option<String>,
    pub google_technologies: Vec<String>,
    pub previous_projects: Option<String>,
}

/// Participant view for a listing, shaped by the event type
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EventParticipantDto {
    Workshop(WorkshopParticipantDto),
    Conference(ConferenceParticipantDto),
    Hackathon(HackathonParticipantDto),
}

impl EventParticipantDto {
    pub fn from_registration(event_type: EventType, detail: &RegistrationDetail) -> Self {
        let participant = ParticipantDto::from(&detail.participant);
        let registration = &detail.registration;

        match event_type {
            EventType::Workshop => EventParticipantDto::Workshop(WorkshopParticipantDto {
                participant,
                workshop_participation: registration
                    .workshop_participation
                    .clone()
                    .unwrap_or_default(),
            }),
            EventType::Conference => EventParticipantDto::Conference(ConferenceParticipantDto {
                participant,
                job_role: detail.participant.job_role.clone(),
            }),
            EventType::Hackathon => EventParticipantDto::Hackathon(HackathonParticipantDto {
                participant,
                team_name: registration.team_name.clone(),
                team_members: detail.team_members.iter().map(TeamMemberDto::from).collect(),
                purpose_of_participation: registration.purpose_of_participation.clone(),
                google_technologies: registration.google_technologies.clone().unwrap_or_default(),
                previous_projects: registration.previous_projects.clone(),
            }),
        }
    }
}

#[cfg(test)]
impl EventParticipantDto {
    pub fn participant(&self) -> &ParticipantDto {
        match self {
            EventParticipantDto::Workshop(dto) => &dto.participant,
            EventParticipantDto::Conference(dto) => &dto.participant,
            EventParticipantDto::Hackathon(dto) => &dto.participant,
        }
    }
}
