//! Participant identity shared across event registrations.
//!
//! A participant is identified by its natural key (name, email, phone, CNIC, organization,
//! LinkedIn URL, ambassador) and reused by every registration that submits the same key.

pub mod dtos;
pub mod filters;
pub mod models;
