mod registration;

pub use registration::{
    EventRegistration, NewRegistration, NewTeamMember, RegistrationDetail, ShortlistOutcome,
    ShortlistedParticipant, TeamMember,
};
