//! In-memory doubles and fixtures for service and handler tests.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::events::models::{Event, EventType};
use crate::features::participants::dtos::RegistrationData;
use crate::features::participants::filters::ParticipantFilter;
use crate::features::participants::models::{Participant, ParticipantStatus};
use crate::features::registrations::models::{
    EventRegistration, NewRegistration, RegistrationDetail, ShortlistOutcome,
    ShortlistedParticipant, TeamMember,
};
use crate::features::registrations::repository::{
    RegistrationRepository, ALREADY_REGISTERED, EVENT_NOT_FOUND,
};
use crate::features::registrations::services::RegistrationService;
use crate::modules::notifications::{
    DeliveryError, NotificationMessage, Notifier, ParticipantContact,
};
use crate::shared::types::PaginationQuery;

// =============================================================================
// FIXTURES
// =============================================================================

pub fn sample_event(event_type: EventType) -> Event {
    let name = match event_type {
        EventType::Workshop => "Build with AI Workshops",
        EventType::Conference => "DevFest Conference",
        EventType::Hackathon => "Solution Challenge Hackathon",
    };

    Event {
        id: Uuid::now_v7(),
        name: name.to_string(),
        event_type,
        description: None,
        created_at: Utc::now(),
    }
}

pub fn sample_participant(name: &str, email_address: &str) -> Participant {
    Participant {
        id: Uuid::now_v7(),
        name: name.to_string(),
        email_address: email_address.to_string(),
        phone_number: "+92 300 1234567".to_string(),
        cnic: "35202-1234567-1".to_string(),
        registered_as: "Student".to_string(),
        organization: String::new(),
        linkedin_url: String::new(),
        ambassador_name: String::new(),
        payment_acknowledgement: None,
        job_role: None,
        participant_status: ParticipantStatus::Pending,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn form(value: Value) -> RegistrationData {
    match value {
        Value::Object(map) => map,
        _ => RegistrationData::new(),
    }
}

/// Common fields; identical inputs always produce the same natural key
fn base_form(name: &str, email_address: &str) -> RegistrationData {
    form(json!({
        "name": name,
        "email_address": email_address,
        "phone_number": "+92 300 1234567",
        "cnic": "35202-1234567-1",
        "registered_as": "Student",
    }))
}

pub fn workshop_form(name: &str, email_address: &str) -> RegistrationData {
    let mut data = base_form(name, email_address);
    data.insert(
        "workshop_participation".to_string(),
        json!(["Gemini APIs", "Flutter"]),
    );
    data
}

pub fn conference_form(name: &str, email_address: &str, job_role: &str) -> RegistrationData {
    let mut data = base_form(name, email_address);
    data.insert("job_role".to_string(), json!(job_role));
    data
}

pub fn hackathon_form(name: &str, email_address: &str, team_name: &str) -> RegistrationData {
    let purpose: String = Sentence(3..8).fake();
    let mut data = base_form(name, email_address);
    data.extend(form(json!({
        "team_name": team_name,
        "team_members": [
            { "name": "Member One", "email_address": "member1@example.com" }
        ],
        "purpose_of_participation": purpose,
        "google_technologies": ["Flutter"],
    })));
    data
}

/// Service wired to a fresh in-memory repository holding all three events
pub fn registration_service() -> (
    RegistrationService,
    Arc<InMemoryRegistrationRepository>,
    Arc<RecordingNotifier>,
) {
    let repository = Arc::new(InMemoryRegistrationRepository::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let service = RegistrationService::new(repository.clone(), notifier.clone());
    (service, repository, notifier)
}

// =============================================================================
// IN-MEMORY REPOSITORY
// =============================================================================

#[derive(Default)]
struct Store {
    events: Vec<Event>,
    participants: Vec<Participant>,
    registrations: Vec<EventRegistration>,
    team_members: Vec<TeamMember>,
}

/// Mirrors the Postgres constraints: one participant per natural key, one registration
/// per (participant, event), listings in insertion order.
pub struct InMemoryRegistrationRepository {
    store: Mutex<Store>,
}

impl Default for InMemoryRegistrationRepository {
    fn default() -> Self {
        Self::with_events(&EventType::ALL)
    }
}

impl InMemoryRegistrationRepository {
    pub fn with_events(event_types: &[EventType]) -> Self {
        let store = Store {
            events: event_types.iter().copied().map(sample_event).collect(),
            ..Store::default()
        };
        Self {
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn participant_count(&self) -> usize {
        self.lock().participants.len()
    }

    fn detail(store: &Store, registration: &EventRegistration) -> Result<RegistrationDetail> {
        let participant = store
            .participants
            .iter()
            .find(|p| p.id == registration.participant_id)
            .cloned()
            .ok_or_else(|| AppError::Internal("dangling participant".to_string()))?;

        let mut team_members: Vec<TeamMember> = store
            .team_members
            .iter()
            .filter(|m| m.registration_id == registration.id)
            .cloned()
            .collect();
        team_members.sort_by_key(|m| m.position);

        Ok(RegistrationDetail {
            registration: registration.clone(),
            participant,
            team_members,
        })
    }
}

#[async_trait]
impl RegistrationRepository for InMemoryRegistrationRepository {
    async fn list_events(&self) -> Result<Vec<Event>> {
        let mut events = self.lock().events.clone();
        events.sort_by_key(|e| e.event_type);
        Ok(events)
    }

    async fn find_event_by_type(&self, event_type: EventType) -> Result<Option<Event>> {
        Ok(self
            .lock()
            .events
            .iter()
            .find(|e| e.event_type == event_type)
            .cloned())
    }

    async fn list_registrations(
        &self,
        event_id: Uuid,
        filters: &[ParticipantFilter],
        pagination: PaginationQuery,
    ) -> Result<(Vec<RegistrationDetail>, i64)> {
        let store = self.lock();

        let matching = store
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .map(|r| Self::detail(&store, r))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .filter(|detail| filters.iter().all(|f| f.matches(&detail.participant)))
            .collect::<Vec<_>>();

        let total = matching.len() as i64;
        let page = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(pagination.limit()).unwrap_or(usize::MAX))
            .collect();

        Ok((page, total))
    }

    async fn shortlist(
        &self,
        event_id: Uuid,
        participant_ids: &[Uuid],
    ) -> Result<ShortlistOutcome> {
        let mut store = self.lock();
        let mut outcome = ShortlistOutcome::default();

        for id in participant_ids {
            let Some(team_name) = store
                .registrations
                .iter()
                .find(|r| r.event_id == event_id && r.participant_id == *id)
                .map(|r| r.team_name.clone())
            else {
                continue;
            };

            let Some(participant) = store.participants.iter_mut().find(|p| p.id == *id) else {
                continue;
            };

            if participant.participant_status == ParticipantStatus::Shortlisted {
                outcome.already_shortlisted.push(*id);
                continue;
            }

            participant.participant_status = ParticipantStatus::Shortlisted;
            participant.updated_at = Utc::now();
            outcome.shortlisted.push(ShortlistedParticipant {
                participant: participant.clone(),
                team_name,
            });
        }

        Ok(outcome)
    }

    async fn register(&self, new: NewRegistration) -> Result<RegistrationDetail> {
        let mut store = self.lock();

        let event_id = store
            .events
            .iter()
            .find(|e| e.event_type == new.event_type)
            .map(|e| e.id)
            .ok_or_else(|| AppError::NotFound(EVENT_NOT_FOUND.to_string()))?;

        let key = new.participant.key();
        let existing = store.participants.iter().position(|p| p.key() == key);
        let participant_id = match existing {
            Some(index) => {
                let existing = &mut store.participants[index];
                if let Some(job_role) = &new.participant.job_role {
                    existing.job_role = Some(job_role.clone());
                }
                existing.id
            }
            None => {
                let now = Utc::now();
                let participant = Participant {
                    id: Uuid::now_v7(),
                    name: new.participant.name.clone(),
                    email_address: new.participant.email_address.clone(),
                    phone_number: new.participant.phone_number.clone(),
                    cnic: new.participant.cnic.clone(),
                    registered_as: new.participant.registered_as.clone(),
                    organization: new.participant.organization.clone(),
                    linkedin_url: new.participant.linkedin_url.clone(),
                    ambassador_name: new.participant.ambassador_name.clone(),
                    payment_acknowledgement: new.participant.payment_acknowledgement.clone(),
                    job_role: new.participant.job_role.clone(),
                    participant_status: ParticipantStatus::Pending,
                    created_at: now,
                    updated_at: now,
                };
                let id = participant.id;
                store.participants.push(participant);
                id
            }
        };

        if store
            .registrations
            .iter()
            .any(|r| r.event_id == event_id && r.participant_id == participant_id)
        {
            return Err(AppError::Conflict(ALREADY_REGISTERED.to_string()));
        }

        let registration = EventRegistration {
            id: Uuid::now_v7(),
            event_id,
            participant_id,
            workshop_participation: new.workshop_participation,
            team_name: new.team_name,
            purpose_of_participation: new.purpose_of_participation,
            google_technologies: new.google_technologies,
            previous_projects: new.previous_projects,
            created_at: Utc::now(),
        };

        for (position, member) in new.team_members.into_iter().enumerate() {
            store.team_members.push(TeamMember {
                id: Uuid::now_v7(),
                registration_id: registration.id,
                position: position as i32,
                name: member.name,
                email_address: member.email_address,
                phone_number: member.phone_number,
                linkedin_url: member.linkedin_url,
            });
        }

        store.registrations.push(registration.clone());
        Self::detail(&store, &registration)
    }
}

// =============================================================================
// NOTIFIER
// =============================================================================

/// Keeps every delivered message; `failing()` rejects all deliveries
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(ParticipantContact, NotificationMessage)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(ParticipantContact, NotificationMessage)> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        contact: &ParticipantContact,
        message: &NotificationMessage,
    ) -> std::result::Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Delivery("transport unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((contact.clone(), message.clone()));
        Ok(())
    }
}
