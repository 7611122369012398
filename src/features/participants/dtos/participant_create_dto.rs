//! Create-side participant DTOs.
//!
//! Registration payloads arrive as a loose JSON object. `RegistrationCreateDto::from_data`
//! picks the recognised keys, applies defaults and builds the variant for the event type;
//! `Validate` then checks field rules before anything touches the database.

use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::core::error::{AppError, Result};
use crate::features::events::models::EventType;
use crate::features::participants::dtos::TeamMemberDto;
use crate::features::participants::models::NewParticipant;
use crate::features::registrations::models::{NewRegistration, NewTeamMember};
use crate::shared::constants::{
    MAX_GOOGLE_TECHNOLOGIES, MAX_LINKEDIN_URL_LENGTH, MAX_PHONE_LENGTH, MAX_TEAM_MEMBERS,
    MAX_WORKSHOP_SELECTIONS,
};
use crate::shared::validation::{
    validate_optional_url, validate_selections, CNIC_REGEX, PHONE_REGEX,
};

/// Raw registration form as posted by the client
pub type RegistrationData = Map<String, Value>;

/// Fields every registration carries regardless of event type
#[derive(Debug, Clone, Validate, ToSchema)]
pub struct ParticipantCreateDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email_address: String,

    #[validate(
        length(max = MAX_PHONE_LENGTH, message = "Phone number must not exceed 20 characters"),
        regex(path = *PHONE_REGEX, message = "Invalid phone number")
    )]
    pub phone_number: String,

    #[validate(regex(path = *CNIC_REGEX, message = "Invalid CNIC"))]
    pub cnic: String,

    #[validate(length(min = 1, max = 50, message = "registered_as must be 1-50 characters"))]
    pub registered_as: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Organization must not exceed 255 characters"))]
    pub organization: String,

    #[serde(default)]
    #[validate(
        length(max = MAX_LINKEDIN_URL_LENGTH, message = "LinkedIn URL must not exceed 2048 characters"),
        custom(function = "validate_optional_url")
    )]
    pub linkedin_url: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Ambassador name must not exceed 255 characters"))]
    pub ambassador_name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Payment acknowledgement must not exceed 500 characters"))]
    pub payment_acknowledgement: Option<String>,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct WorkshopParticipantCreateDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub participant: ParticipantCreateDto,

    #[validate(
        length(min = 1, max = MAX_WORKSHOP_SELECTIONS, message = "Select between 1 and 10 workshops"),
        custom(function = "validate_selections")
    )]
    pub workshop_participation: Vec<String>,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct ConferenceParticipantCreateDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub participant: ParticipantCreateDto,

    #[validate(length(min = 1, max = 255, message = "Job role must be 1-255 characters"))]
    pub job_role: String,
}

#[derive(Debug, Clone, Validate, ToSchema)]
pub struct HackathonParticipantCreateDto {
    #[serde(flatten)]
    #[validate(nested)]
    pub participant: ParticipantCreateDto,

    #[validate(length(min = 1, max = 100, message = "Team name must be 1-100 characters"))]
    pub team_name: String,

    #[serde(default)]
    #[validate(length(max = MAX_TEAM_MEMBERS, message = "A team can list at most 4 members"), nested)]
    pub team_members: Vec<TeamMemberDto>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Purpose must not exceed 2000 characters"))]
    pub purpose_of_participation: String,

    #[serde(default)]
    #[validate(
        length(max = MAX_GOOGLE_TECHNOLOGIES, message = "List at most 20 technologies"),
        custom(function = "validate_selections")
    )]
    pub google_technologies: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 2000, message = "Previous projects must not exceed 2000 characters"))]
    pub previous_projects: String,
}

/// Registration payload, one variant per event type
#[derive(Debug, Clone, ToSchema)]
#[serde(untagged)]
pub enum RegistrationCreateDto {
    Workshop(WorkshopParticipantCreateDto),
    Conference(ConferenceParticipantCreateDto),
    Hackathon(HackathonParticipantCreateDto),
}

impl Validate for RegistrationCreateDto {
    fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        match self {
            RegistrationCreateDto::Workshop(dto) => dto.validate(),
            RegistrationCreateDto::Conference(dto) => dto.validate(),
            RegistrationCreateDto::Hackathon(dto) => dto.validate(),
        }
    }
}

impl RegistrationCreateDto {
    /// Builds the event-specific DTO from the submitted form.
    ///
    /// Missing required keys and wrongly typed values are `BadRequest`; field content is
    /// left to `validate()`.
    pub fn from_data(event_type: EventType, data: &RegistrationData) -> Result<Self> {
        let participant = ParticipantCreateDto {
            name: required_string(data, "name")?,
            email_address: required_string(data, "email_address")?,
            phone_number: required_string(data, "phone_number")?,
            cnic: required_string(data, "cnic")?,
            registered_as: required_string(data, "registered_as")?,
            organization: optional_string(data, "organization")?.unwrap_or_default(),
            linkedin_url: optional_string(data, "linkedin_url")?.unwrap_or_default(),
            ambassador_name: optional_string(data, "ambassador_name")?.unwrap_or_default(),
            payment_acknowledgement: optional_string(data, "payment_acknowledgement")?
                .filter(|value| !value.is_empty()),
        };

        let dto = match event_type {
            EventType::Workshop => RegistrationCreateDto::Workshop(WorkshopParticipantCreateDto {
                participant,
                workshop_participation: string_list(data, "workshop_participation")?,
            }),
            EventType::Conference => {
                RegistrationCreateDto::Conference(ConferenceParticipantCreateDto {
                    participant,
                    job_role: required_string(data, "job_role")?,
                })
            }
            EventType::Hackathon => {
                RegistrationCreateDto::Hackathon(HackathonParticipantCreateDto {
                    participant,
                    team_name: required_string(data, "team_name")?,
                    team_members: team_members(data)?,
                    purpose_of_participation: optional_string(data, "purpose_of_participation")?
                        .unwrap_or_default(),
                    google_technologies: string_list(data, "google_technologies")?,
                    previous_projects: optional_string(data, "previous_projects")?
                        .unwrap_or_default(),
                })
            }
        };

        Ok(dto)
    }

    pub fn event_type(&self) -> EventType {
        match self {
            RegistrationCreateDto::Workshop(_) => EventType::Workshop,
            RegistrationCreateDto::Conference(_) => EventType::Conference,
            RegistrationCreateDto::Hackathon(_) => EventType::Hackathon,
        }
    }

    pub fn participant(&self) -> &ParticipantCreateDto {
        match self {
            RegistrationCreateDto::Workshop(dto) => &dto.participant,
            RegistrationCreateDto::Conference(dto) => &dto.participant,
            RegistrationCreateDto::Hackathon(dto) => &dto.participant,
        }
    }

    /// Persistence payload; fields that do not belong to the event type stay `None`.
    pub fn into_new_registration(self) -> NewRegistration {
        let event_type = self.event_type();
        match self {
            RegistrationCreateDto::Workshop(dto) => NewRegistration {
                event_type,
                participant: dto.participant.into_new_participant(None),
                workshop_participation: Some(dto.workshop_participation),
                team_name: None,
                purpose_of_participation: None,
                google_technologies: None,
                previous_projects: None,
                team_members: Vec::new(),
            },
            RegistrationCreateDto::Conference(dto) => NewRegistration {
                event_type,
                participant: dto.participant.into_new_participant(Some(dto.job_role)),
                workshop_participation: None,
                team_name: None,
                purpose_of_participation: None,
                google_technologies: None,
                previous_projects: None,
                team_members: Vec::new(),
            },
            RegistrationCreateDto::Hackathon(dto) => NewRegistration {
                event_type,
                participant: dto.participant.into_new_participant(None),
                workshop_participation: None,
                team_name: Some(dto.team_name),
                purpose_of_participation: Some(dto.purpose_of_participation),
                google_technologies: Some(dto.google_technologies),
                previous_projects: Some(dto.previous_projects),
                team_members: dto
                    .team_members
                    .into_iter()
                    .map(|m| NewTeamMember {
                        name: m.name,
                        email_address: m.email_address,
                        phone_number: m.phone_number,
                        linkedin_url: m.linkedin_url,
                    })
                    .collect(),
            },
        }
    }
}

impl ParticipantCreateDto {
    fn into_new_participant(self, job_role: Option<String>) -> NewParticipant {
        NewParticipant {
            name: self.name,
            email_address: self.email_address,
            phone_number: self.phone_number,
            cnic: self.cnic,
            registered_as: self.registered_as,
            organization: self.organization,
            linkedin_url: self.linkedin_url,
            ambassador_name: self.ambassador_name,
            payment_acknowledgement: self.payment_acknowledgement,
            job_role,
        }
    }
}

fn required_string(data: &RegistrationData, key: &str) -> Result<String> {
    optional_string(data, key)?
        .ok_or_else(|| AppError::BadRequest(format!("Missing required field '{}'", key)))
}

fn optional_string(data: &RegistrationData, key: &str) -> Result<Option<String>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.trim().to_string())),
        Some(_) => Err(AppError::BadRequest(format!(
            "Field '{}' must be a string",
            key
        ))),
    }
}

fn string_list(data: &RegistrationData, key: &str) -> Result<Vec<String>> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(value) => Ok(value.trim().to_string()),
                _ => Err(AppError::BadRequest(format!(
                    "Field '{}' must be a list of strings",
                    key
                ))),
            })
            .collect(),
        Some(_) => Err(AppError::BadRequest(format!(
            "Field '{}' must be a list of strings",
            key
        ))),
    }
}

fn team_members(data: &RegistrationData) -> Result<Vec<TeamMemberDto>> {
    match data.get("team_members") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
            AppError::BadRequest(format!("Field 'team_members' is invalid: {}", e))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> RegistrationData {
        match value {
            Value::Object(map) => map,
            _ => panic!("form must be a JSON object"),
        }
    }

    fn base() -> Value {
        json!({
            "name": "A",
            "email_address": "a@x.com",
            "phone_number": "1",
            "cnic": "2",
            "registered_as": "student",
        })
    }

    fn with(extra: Value) -> RegistrationData {
        let mut data = form(base());
        data.extend(form(extra));
        data
    }

    #[test]
    fn test_common_fields_and_defaults() {
        let dto = RegistrationCreateDto::from_data(
            EventType::Workshop,
            &with(json!({ "workshop_participation": ["Gemini"] })),
        )
        .unwrap();

        let participant = dto.participant();
        assert_eq!(participant.name, "A");
        assert_eq!(participant.organization, "");
        assert_eq!(participant.linkedin_url, "");
        assert_eq!(participant.ambassador_name, "");
        assert!(participant.payment_acknowledgement.is_none());
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        for key in ["name", "email_address", "phone_number", "cnic", "registered_as"] {
            let mut data = with(json!({ "workshop_participation": ["Gemini"] }));
            data.remove(key);

            let err = RegistrationCreateDto::from_data(EventType::Workshop, &data).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(msg) if msg.contains(key)));
        }
    }

    #[test]
    fn test_wrong_type_is_bad_request() {
        let data = with(json!({ "name": 42 }));
        assert!(matches!(
            RegistrationCreateDto::from_data(EventType::Workshop, &data),
            Err(AppError::BadRequest(_))
        ));

        let data = with(json!({ "workshop_participation": "Gemini" }));
        assert!(matches!(
            RegistrationCreateDto::from_data(EventType::Workshop, &data),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_conference_requires_job_role() {
        let err = RegistrationCreateDto::from_data(EventType::Conference, &form(base()))
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("job_role")));

        let dto = RegistrationCreateDto::from_data(
            EventType::Conference,
            &with(json!({ "job_role": "Engineer" })),
        )
        .unwrap();
        assert!(dto.validate().is_ok());

        let registration = dto.into_new_registration();
        assert_eq!(registration.participant.job_role.as_deref(), Some("Engineer"));
        assert!(registration.workshop_participation.is_none());
        assert!(registration.team_name.is_none());
    }

    #[test]
    fn test_workshop_requires_a_selection() {
        let dto = RegistrationCreateDto::from_data(EventType::Workshop, &form(base())).unwrap();
        assert!(dto.validate().is_err());

        let dto = RegistrationCreateDto::from_data(
            EventType::Workshop,
            &with(json!({ "workshop_participation": ["Gemini", "gemini"] })),
        )
        .unwrap();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_hackathon_fields() {
        let dto = RegistrationCreateDto::from_data(
            EventType::Hackathon,
            &with(json!({
                "team_name": "T1",
                "team_members": [
                    { "name": "B", "email_address": "b@x.com" },
                    { "name": "C", "email_address": "c@x.com", "phone_number": "+92 1" }
                ],
                "google_technologies": ["Flutter"]
            })),
        )
        .unwrap();
        assert!(dto.validate().is_ok());

        let registration = dto.into_new_registration();
        assert_eq!(registration.event_type, EventType::Hackathon);
        assert_eq!(registration.team_name.as_deref(), Some("T1"));
        assert_eq!(registration.team_members.len(), 2);
        assert_eq!(registration.team_members[1].phone_number.as_deref(), Some("+92 1"));
        assert_eq!(
            registration.google_technologies,
            Some(vec!["Flutter".to_string()])
        );
        assert_eq!(registration.purpose_of_participation.as_deref(), Some(""));
        assert!(registration.workshop_participation.is_none());
        assert!(registration.participant.job_role.is_none());
    }

    #[test]
    fn test_hackathon_requires_team_name() {
        assert!(matches!(
            RegistrationCreateDto::from_data(EventType::Hackathon, &form(base())),
            Err(AppError::BadRequest(msg)) if msg.contains("team_name")
        ));
    }

    #[test]
    fn test_hackathon_team_limits() {
        let members: Vec<Value> = (0..5)
            .map(|i| json!({ "name": format!("M{}", i), "email_address": format!("m{}@x.com", i) }))
            .collect();
        let dto = RegistrationCreateDto::from_data(
            EventType::Hackathon,
            &with(json!({ "team_name": "T1", "team_members": members })),
        )
        .unwrap();
        assert!(dto.validate().is_err());

        let dto = RegistrationCreateDto::from_data(
            EventType::Hackathon,
            &with(json!({
                "team_name": "T1",
                "team_members": [{ "name": "B", "email_address": "nope" }]
            })),
        )
        .unwrap();
        assert!(dto.validate().is_err());

        assert!(matches!(
            RegistrationCreateDto::from_data(
                EventType::Hackathon,
                &with(json!({ "team_name": "T1", "team_members": [{ "name": "B" }] })),
            ),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_base_fields_fit_column_widths() {
        let phone = format!("+{}", "1".repeat(19));
        let linkedin = format!("https://linkedin.com/in/{}", "a".repeat(2048 - 24));
        let data = with(json!({
            "job_role": "Engineer",
            "phone_number": phone,
            "linkedin_url": linkedin,
        }));
        let dto = RegistrationCreateDto::from_data(EventType::Conference, &data).unwrap();
        assert!(dto.validate().is_ok());

        let cases = [
            json!({ "phone_number": format!("+{}", "1".repeat(20)) }),
            json!({ "phone_number": "1".repeat(21) }),
            json!({ "linkedin_url": format!("https://linkedin.com/in/{}", "a".repeat(2049 - 24)) }),
        ];
        for case in cases {
            let mut data = with(json!({ "job_role": "Engineer" }));
            data.extend(form(case));
            let dto = RegistrationCreateDto::from_data(EventType::Conference, &data).unwrap();
            assert!(dto.validate().is_err());
        }
    }

    #[test]
    fn test_invalid_base_fields_fail_validation() {
        let cases = [
            json!({ "email_address": "not-an-email" }),
            json!({ "phone_number": "phone" }),
            json!({ "cnic": "ABC" }),
            json!({ "name": "" }),
            json!({ "linkedin_url": "linkedin" }),
        ];

        for case in cases {
            let mut data = with(json!({ "job_role": "Engineer" }));
            data.extend(form(case.clone()));
            let dto = RegistrationCreateDto::from_data(EventType::Conference, &data).unwrap();
            assert!(dto.validate().is_err(), "expected {} to fail", case);
        }
    }
}
