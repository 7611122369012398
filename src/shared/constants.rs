/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// REGISTRATION LIMITS
// =============================================================================

/// Maximum number of extra members on a hackathon team (the registrant is not counted)
pub const MAX_TEAM_MEMBERS: u64 = 4;

/// Maximum number of workshops a participant can select
pub const MAX_WORKSHOP_SELECTIONS: u64 = 10;

/// Maximum number of Google technologies listed on a hackathon registration
pub const MAX_GOOGLE_TECHNOLOGIES: u64 = 20;

/// Maximum number of participant ids accepted in one shortlist request
pub const MAX_SHORTLIST_SIZE: u64 = 500;

// =============================================================================
// COLUMN WIDTHS
// =============================================================================

/// Width of the `phone_number` columns
pub const MAX_PHONE_LENGTH: u64 = 20;

/// Width of the `linkedin_url` columns
pub const MAX_LINKEDIN_URL_LENGTH: u64 = 2048;
