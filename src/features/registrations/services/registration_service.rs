use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::events::dtos::EventDto;
use crate::features::events::models::{Event, EventType};
use crate::features::participants::dtos::{EventParticipantDto, RegistrationCreateDto, RegistrationData};
use crate::features::participants::filters::ParticipantFilter;
use crate::features::registrations::dtos::{
    RegistrationResponseDto, ShortlistDto, ShortlistResultDto,
};
use crate::features::registrations::models::ShortlistedParticipant;
use crate::features::registrations::repository::{RegistrationRepository, EVENT_NOT_FOUND};
use crate::modules::notifications::{render_shortlisted, Notifier, ParticipantContact};
use crate::shared::types::PaginationQuery;

/// Registration, listing and shortlisting for the three event types
pub struct RegistrationService {
    repository: Arc<dyn RegistrationRepository>,
    notifier: Arc<dyn Notifier>,
}

impl RegistrationService {
    pub fn new(repository: Arc<dyn RegistrationRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    async fn find_event(&self, event_type: EventType) -> Result<Event> {
        self.repository
            .find_event_by_type(event_type)
            .await?
            .ok_or_else(|| AppError::NotFound(EVENT_NOT_FOUND.to_string()))
    }

    /// List registrants of an event, filtered and paginated.
    ///
    /// Returns the page and the total number of matching registrations.
    pub async fn get_event_list(
        &self,
        event_type: &str,
        page: i64,
        per_page: i64,
        filter_by: &HashMap<String, String>,
    ) -> Result<(EventDto, i64)> {
        let event_type: EventType = event_type.parse()?;
        let pagination = PaginationQuery::new(page, per_page)?;
        let filters = ParticipantFilter::parse_all(filter_by)?;

        let event = self.find_event(event_type).await?;

        let (registrations, total) = self
            .repository
            .list_registrations(event.id, &filters, pagination)
            .await?;

        let participants = registrations
            .iter()
            .map(|detail| EventParticipantDto::from_registration(event.event_type, detail))
            .collect();

        Ok((
            EventDto {
                event_type: event.event_type,
                participants,
            },
            total,
        ))
    }

    /// Mark registered participants of an event as SHORTLISTED and notify them.
    ///
    /// Ids without a registration for the event are reported back, not rejected.
    pub async fn shortlist_participants(
        &self,
        shortlist_dto: ShortlistDto,
        event_type: &str,
    ) -> Result<ShortlistResultDto> {
        let event_type: EventType = event_type.parse()?;
        shortlist_dto.validate()?;

        let mut seen = HashSet::new();
        let requested: Vec<Uuid> = shortlist_dto
            .participants
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let event = self.find_event(event_type).await?;
        let outcome = self.repository.shortlist(event.id, &requested).await?;

        for entry in &outcome.shortlisted {
            self.notify_shortlisted(&event, entry).await;
        }

        let matched: HashSet<Uuid> = outcome
            .shortlisted
            .iter()
            .map(|entry| entry.participant.id)
            .chain(outcome.already_shortlisted.iter().copied())
            .collect();

        let result = ShortlistResultDto {
            shortlisted: outcome
                .shortlisted
                .iter()
                .map(|entry| entry.participant.id)
                .collect(),
            already_shortlisted: outcome.already_shortlisted,
            unmatched: requested
                .into_iter()
                .filter(|id| !matched.contains(id))
                .collect(),
        };

        tracing::info!(
            "Shortlist applied: event_type={}, shortlisted={}, already_shortlisted={}, unmatched={}",
            event.event_type,
            result.shortlisted.len(),
            result.already_shortlisted.len(),
            result.unmatched.len()
        );

        Ok(result)
    }

    /// Dispatch is fire-and-forget: failures are logged and never undo the shortlist.
    async fn notify_shortlisted(&self, event: &Event, entry: &ShortlistedParticipant) {
        if !self.notifier.is_enabled() {
            return;
        }

        let participant = &entry.participant;
        let message = match render_shortlisted(participant, event, entry.team_name.as_deref()) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(
                    "Skipping shortlist notification for participant {}: {}",
                    participant.id,
                    e
                );
                return;
            }
        };

        let contact = ParticipantContact::from(participant);
        if let Err(e) = self.notifier.send(&contact, &message).await {
            tracing::warn!(
                "Failed to notify shortlisted participant {}: {}",
                participant.id,
                e
            );
        }
    }

    /// Register a participant for an event from a raw form submission
    pub async fn register_event(
        &self,
        event_type: &str,
        data: &RegistrationData,
    ) -> Result<RegistrationResponseDto> {
        let event_type: EventType = event_type.parse()?;

        let dto = RegistrationCreateDto::from_data(event_type, data)?;
        tracing::debug!(
            "Registration submitted: event_type={}, email={}",
            event_type,
            dto.participant().email_address
        );
        dto.validate()?;

        let detail = self.repository.register(dto.into_new_registration()).await?;

        tracing::info!(
            "Registration created: id={}, event_type={}, participant_id={}",
            detail.registration.id,
            event_type,
            detail.participant.id
        );

        Ok(RegistrationResponseDto::from_detail(event_type, detail))
    }
}
