//! Persistence port for events, participants and registrations.
//!
//! The service layer only sees `RegistrationRepository`; `PostgresRegistrationRepository`
//! is the production implementation. Every write method runs inside a single transaction.

mod postgres;

pub use postgres::PostgresRegistrationRepository;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::events::models::{Event, EventType};
use crate::features::participants::filters::ParticipantFilter;
use crate::features::registrations::models::{NewRegistration, RegistrationDetail, ShortlistOutcome};
use crate::shared::types::PaginationQuery;

pub const ALREADY_REGISTERED: &str = "Participant is already registered for this event.";
pub const EVENT_NOT_FOUND: &str = "Event not found.";

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>>;

    async fn find_event_by_type(&self, event_type: EventType) -> Result<Option<Event>>;

    /// Registrations of an event whose participant matches every filter, ordered by
    /// (created_at, id), plus the unpaginated match count.
    async fn list_registrations(
        &self,
        event_id: Uuid,
        filters: &[ParticipantFilter],
        pagination: PaginationQuery,
    ) -> Result<(Vec<RegistrationDetail>, i64)>;

    /// Marks every listed participant registered for the event as SHORTLISTED.
    async fn shortlist(&self, event_id: Uuid, participant_ids: &[Uuid])
        -> Result<ShortlistOutcome>;

    /// Resolves the event, gets-or-creates the participant and inserts the registration.
    ///
    /// Fails with `NotFound` when the event is missing and `Conflict` when the participant
    /// is already registered for it.
    async fn register(&self, registration: NewRegistration) -> Result<RegistrationDetail>;
}
