//! Notification templates rendered with Jinja2 syntax.
//!
//! Templates live under `templates/notifications/` and are compiled into the binary, so
//! rendering never depends on the working directory.

use std::sync::OnceLock;

use minijinja::{context, Environment};

use crate::features::events::models::Event;
use crate::features::participants::models::Participant;
use crate::modules::notifications::{DeliveryError, NotificationMessage};

const SHORTLISTED_TEMPLATE: &str = "shortlisted.jinja";

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    if let Err(e) = env.add_template(
        SHORTLISTED_TEMPLATE,
        include_str!("../../../templates/notifications/shortlisted.jinja"),
    ) {
        tracing::warn!("Failed to load template {}: {}", SHORTLISTED_TEMPLATE, e);
    }
    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Renders the message sent to a participant once they are shortlisted
pub fn render_shortlisted(
    participant: &Participant,
    event: &Event,
    team_name: Option<&str>,
) -> Result<NotificationMessage, DeliveryError> {
    let template = get_environment()
        .get_template(SHORTLISTED_TEMPLATE)
        .map_err(|e| DeliveryError::Template(e.to_string()))?;

    let body = template
        .render(context! {
            name => &participant.name,
            email_address => &participant.email_address,
            event_name => &event.name,
            event_type => event.event_type.as_str(),
            team_name => team_name,
        })
        .map_err(|e| DeliveryError::Template(e.to_string()))?;

    Ok(NotificationMessage {
        subject: format!("You have been shortlisted for {}", event.name),
        body,
    })
}
