//! Typed participant filters for registrant listings.
//!
//! Query keys are matched against a closed set of participant fields; each accepted key
//! becomes an equality predicate on a fixed column, so no request value ever reaches the
//! SQL text itself.

use std::collections::HashMap;

use sqlx::{Postgres, QueryBuilder};

use crate::core::error::{AppError, Result};
use crate::features::participants::models::ParticipantStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParticipantFilter {
    Name(String),
    EmailAddress(String),
    PhoneNumber(String),
    Cnic(String),
    RegisteredAs(String),
    Organization(String),
    LinkedinUrl(String),
    AmbassadorName(String),
    JobRole(String),
    Status(ParticipantStatus),
}

impl ParticipantFilter {
    /// Field names accepted in `filter_by`
    pub const FIELDS: [&'static str; 10] = [
        "name",
        "email_address",
        "phone_number",
        "cnic",
        "registered_as",
        "organization",
        "linkedin_url",
        "ambassador_name",
        "job_role",
        "participant_status",
    ];

    pub fn parse(field: &str, value: &str) -> Result<Self> {
        let value = value.to_string();
        let filter = match field {
            "name" => ParticipantFilter::Name(value),
            "email_address" => ParticipantFilter::EmailAddress(value),
            "phone_number" => ParticipantFilter::PhoneNumber(value),
            "cnic" => ParticipantFilter::Cnic(value),
            "registered_as" => ParticipantFilter::RegisteredAs(value),
            "organization" => ParticipantFilter::Organization(value),
            "linkedin_url" => ParticipantFilter::LinkedinUrl(value),
            "ambassador_name" => ParticipantFilter::AmbassadorName(value),
            "job_role" => ParticipantFilter::JobRole(value),
            "participant_status" | "status" => ParticipantFilter::Status(value.parse()?),
            _ => {
                return Err(AppError::BadRequest(format!(
                    "Invalid filter field '{}' provided. Allowed fields: {}.",
                    field,
                    Self::FIELDS.join(", ")
                )))
            }
        };
        Ok(filter)
    }

    /// Parses every entry; keys are visited in sorted order so errors are deterministic.
    pub fn parse_all(filter_by: &HashMap<String, String>) -> Result<Vec<Self>> {
        let mut fields: Vec<_> = filter_by.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        fields
            .into_iter()
            .map(|(field, value)| Self::parse(field, value))
            .collect()
    }

    /// Column on the `participants` table this filter compares against
    pub fn column(&self) -> &'static str {
        match self {
            ParticipantFilter::Name(_) => "name",
            ParticipantFilter::EmailAddress(_) => "email_address",
            ParticipantFilter::PhoneNumber(_) => "phone_number",
            ParticipantFilter::Cnic(_) => "cnic",
            ParticipantFilter::RegisteredAs(_) => "registered_as",
            ParticipantFilter::Organization(_) => "organization",
            ParticipantFilter::LinkedinUrl(_) => "linkedin_url",
            ParticipantFilter::AmbassadorName(_) => "ambassador_name",
            ParticipantFilter::JobRole(_) => "job_role",
            ParticipantFilter::Status(_) => "participant_status",
        }
    }

    /// Appends `AND <alias>.<column> = $n` to the query
    pub fn push_predicate(&self, builder: &mut QueryBuilder<'_, Postgres>, alias: &str) {
        builder
            .push(" AND ")
            .push(alias)
            .push(".")
            .push(self.column())
            .push(" = ");

        match self {
            ParticipantFilter::Status(status) => {
                builder.push_bind(*status);
            }
            ParticipantFilter::Name(value)
            | ParticipantFilter::EmailAddress(value)
            | ParticipantFilter::PhoneNumber(value)
            | ParticipantFilter::Cnic(value)
            | ParticipantFilter::RegisteredAs(value)
            | ParticipantFilter::Organization(value)
            | ParticipantFilter::LinkedinUrl(value)
            | ParticipantFilter::AmbassadorName(value)
            | ParticipantFilter::JobRole(value) => {
                builder.push_bind(value.clone());
            }
        }
    }
}

#[cfg(test)]
impl ParticipantFilter {
    pub fn matches(&self, participant: &crate::features::participants::models::Participant) -> bool {
        match self {
            ParticipantFilter::Name(v) => participant.name == *v,
            ParticipantFilter::EmailAddress(v) => participant.email_address == *v,
            ParticipantFilter::PhoneNumber(v) => participant.phone_number == *v,
            ParticipantFilter::Cnic(v) => participant.cnic == *v,
            ParticipantFilter::RegisteredAs(v) => participant.registered_as == *v,
            ParticipantFilter::Organization(v) => participant.organization == *v,
            ParticipantFilter::LinkedinUrl(v) => participant.linkedin_url == *v,
            ParticipantFilter::AmbassadorName(v) => participant.ambassador_name == *v,
            ParticipantFilter::JobRole(v) => participant.job_role.as_deref() == Some(v.as_str()),
            ParticipantFilter::Status(s) => participant.participant_status == *s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_fields() {
        for field in ParticipantFilter::FIELDS {
            let value = if field == "participant_status" {
                "PENDING"
            } else {
                "x"
            };
            let filter = ParticipantFilter::parse(field, value).unwrap();
            assert_eq!(filter.column(), field);
        }
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = ParticipantFilter::parse("password", "x").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("password")));

        // internal columns are not filterable either
        assert!(ParticipantFilter::parse("id", "x").is_err());
        assert!(ParticipantFilter::parse("created_at", "x").is_err());
    }

    #[test]
    fn test_rejects_bad_status_value() {
        assert!(matches!(
            ParticipantFilter::parse("participant_status", "WINNER"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_parse_all_is_sorted() {
        let filter_by = HashMap::from([
            ("organization".to_string(), "GDG".to_string()),
            ("cnic".to_string(), "2".to_string()),
        ]);
        let filters = ParticipantFilter::parse_all(&filter_by).unwrap();
        assert_eq!(
            filters,
            vec![
                ParticipantFilter::Cnic("2".to_string()),
                ParticipantFilter::Organization("GDG".to_string()),
            ]
        );
    }

    #[test]
    fn test_push_predicate_binds_values() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT 1 FROM participants p WHERE TRUE");
        ParticipantFilter::Cnic("2".to_string()).push_predicate(&mut builder, "p");
        ParticipantFilter::Status(ParticipantStatus::Shortlisted).push_predicate(&mut builder, "p");

        assert_eq!(
            builder.sql(),
            "SELECT 1 FROM participants p WHERE TRUE AND p.cnic = $1 AND p.participant_status = $2"
        );
    }
}
