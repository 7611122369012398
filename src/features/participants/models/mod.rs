mod participant;

pub use participant::{NewParticipant, Participant, ParticipantKey, ParticipantStatus};
