use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::core::error::AppError;

/// Participant status enum matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "participant_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantStatus {
    #[default]
    Pending,
    Shortlisted,
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantStatus::Pending => write!(f, "PENDING"),
            ParticipantStatus::Shortlisted => write!(f, "SHORTLISTED"),
        }
    }
}

impl FromStr for ParticipantStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(ParticipantStatus::Pending),
            "SHORTLISTED" => Ok(ParticipantStatus::Shortlisted),
            _ => Err(AppError::BadRequest(format!(
                "Invalid participant status '{}'.",
                value
            ))),
        }
    }
}

/// Database model for participant
#[derive(Debug, Clone, FromRow)]
pub struct Participant {
    pub id: Uuid,
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub cnic: String,
    pub registered_as: String,
    pub organization: String,
    pub linkedin_url: String,
    pub ambassador_name: String,
    pub payment_acknowledgement: Option<String>,
    pub job_role: Option<String>,
    pub participant_status: ParticipantStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Natural key used by get-or-create
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParticipantKey {
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub cnic: String,
    pub organization: String,
    pub linkedin_url: String,
    pub ambassador_name: String,
}

/// Insert payload for participant get-or-create
#[derive(Debug, Clone)]
pub struct NewParticipant {
    pub name: String,
    pub email_address: String,
    pub phone_number: String,
    pub cnic: String,
    pub registered_as: String,
    pub organization: String,
    pub linkedin_url: String,
    pub ambassador_name: String,
    pub payment_acknowledgement: Option<String>,
    pub job_role: Option<String>,
}

impl NewParticipant {
    pub fn key(&self) -> ParticipantKey {
        ParticipantKey {
            name: self.name.clone(),
            email_address: self.email_address.clone(),
            phone_number: self.phone_number.clone(),
            cnic: self.cnic.clone(),
            organization: self.organization.clone(),
            linkedin_url: self.linkedin_url.clone(),
            ambassador_name: self.ambassador_name.clone(),
        }
    }
}

impl Participant {
    pub fn key(&self) -> ParticipantKey {
        ParticipantKey {
            name: self.name.clone(),
            email_address: self.email_address.clone(),
            phone_number: self.phone_number.clone(),
            cnic: self.cnic.clone(),
            organization: self.organization.clone(),
            linkedin_url: self.linkedin_url.clone(),
            ambassador_name: self.ambassador_name.clone(),
        }
    }
}
