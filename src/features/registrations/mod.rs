//! Event registration, registrant listings and shortlisting.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/events/{event_type}/participants` | No | List registrants (paginated, filterable) |
//! | POST | `/api/events/{event_type}/register` | No | Register for an event |
//! | POST | `/api/events/{event_type}/shortlist` | No | Shortlist registrants |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::{PostgresRegistrationRepository, RegistrationRepository};
pub use services::RegistrationService;
