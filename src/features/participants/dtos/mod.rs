mod participant_create_dto;
mod participant_dto;

pub use participant_create_dto::{
    ConferenceParticipantCreateDto, HackathonParticipantCreateDto, ParticipantCreateDto,
    RegistrationCreateDto, RegistrationData, WorkshopParticipantCreateDto,
};
pub use participant_dto::{
    ConferenceParticipantDto, EventParticipantDto, HackathonParticipantDto, ParticipantDto,
    TeamMemberDto, WorkshopParticipantDto,
};
