use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::features::events::models::EventType;
use crate::features::participants::models::{NewParticipant, Participant};

/// Database model for event registration
#[derive(Debug, Clone, FromRow)]
pub struct EventRegistration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub participant_id: Uuid,

    // Workshop
    pub workshop_participation: Option<Vec<String>>,

    // Hackathon
    pub team_name: Option<String>,
    pub purpose_of_participation: Option<String>,
    pub google_technologies: Option<Vec<String>>,
    pub previous_projects: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// Database model for a hackathon team member owned by a registration
#[derive(Debug, Clone, FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub registration_id: Uuid,
    pub position: i32,
    pub name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Registration joined with its participant and team members
#[derive(Debug, Clone)]
pub struct RegistrationDetail {
    pub registration: EventRegistration,
    pub participant: Participant,
    pub team_members: Vec<TeamMember>,
}

#[derive(Debug, Clone)]
pub struct NewTeamMember {
    pub name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Everything needed to persist one registration
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub event_type: EventType,
    pub participant: NewParticipant,
    pub workshop_participation: Option<Vec<String>>,
    pub team_name: Option<String>,
    pub purpose_of_participation: Option<String>,
    pub google_technologies: Option<Vec<String>>,
    pub previous_projects: Option<String>,
    pub team_members: Vec<NewTeamMember>,
}

/// Participant picked by a shortlist, with the team they registered under
#[derive(Debug, Clone, FromRow)]
pub struct ShortlistedParticipant {
    #[sqlx(flatten)]
    pub participant: Participant,
    pub team_name: Option<String>,
}

/// Result of a shortlist write
#[derive(Debug, Clone, Default)]
pub struct ShortlistOutcome {
    /// Participants whose status changed to SHORTLISTED in this call
    pub shortlisted: Vec<ShortlistedParticipant>,
    /// Registered participants that were already SHORTLISTED
    pub already_shortlisted: Vec<Uuid>,
}
