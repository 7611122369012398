use std::sync::Arc;

use crate::core::error::Result;
use crate::features::events::dtos::EventResponseDto;
use crate::features::registrations::repository::RegistrationRepository;

/// Read-only access to the configured events
pub struct EventService {
    repository: Arc<dyn RegistrationRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn RegistrationRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_events(&self) -> Result<Vec<EventResponseDto>> {
        let events = self.repository.list_events().await?;
        Ok(events.into_iter().map(EventResponseDto::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::events::models::EventType;
    use crate::shared::test_helpers::InMemoryRegistrationRepository;

    #[tokio::test]
    async fn test_list_events() {
        let service = EventService::new(Arc::new(InMemoryRegistrationRepository::default()));

        let events = service.list_events().await.unwrap();
        let types: Vec<EventType> = events.iter().map(|e| e.event_type).collect();

        assert_eq!(types, EventType::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_list_events_empty() {
        let service =
            EventService::new(Arc::new(InMemoryRegistrationRepository::with_events(&[])));
        assert!(service.list_events().await.unwrap().is_empty());
    }
}
