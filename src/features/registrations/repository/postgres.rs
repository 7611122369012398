use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::events::models::{Event, EventType};
use crate::features::participants::filters::ParticipantFilter;
use crate::features::participants::models::{NewParticipant, Participant, ParticipantStatus};
use crate::features::registrations::models::{
    EventRegistration, NewRegistration, NewTeamMember, RegistrationDetail, ShortlistOutcome,
    ShortlistedParticipant, TeamMember,
};
use crate::features::registrations::repository::{
    RegistrationRepository, ALREADY_REGISTERED, EVENT_NOT_FOUND,
};
use crate::shared::types::PaginationQuery;

/// PostgreSQL-backed registration store
pub struct PostgresRegistrationRepository {
    pool: PgPool,
}

impl PostgresRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        tracing::error!("Failed to {}: {:?}", context, e);
        AppError::Database(e)
    }
}

/// `FROM ... WHERE` part shared by the count and page queries
fn push_registration_scope(
    builder: &mut QueryBuilder<'_, Postgres>,
    event_id: Uuid,
    filters: &[ParticipantFilter],
) {
    builder
        .push(
            " FROM event_registrations r JOIN participants p ON p.id = r.participant_id WHERE r.event_id = ",
        )
        .push_bind(event_id);
    for filter in filters {
        filter.push_predicate(builder, "p");
    }
}

async fn find_event(conn: &mut PgConnection, event_type: EventType) -> Result<Option<Event>> {
    sqlx::query_as::<_, Event>(
        r#"
        SELECT id, name, event_type, description, created_at
        FROM events
        WHERE event_type = $1
        "#,
    )
    .bind(event_type)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("find event"))
}

/// Insert-or-fetch on `participants_natural_key`; a concurrent insert of the same key
/// makes `ON CONFLICT DO NOTHING` return no row and the locking select picks it up.
async fn get_or_create_participant(
    conn: &mut PgConnection,
    new: &NewParticipant,
) -> Result<Participant> {
    let inserted = sqlx::query_as::<_, Participant>(
        r#"
        INSERT INTO participants (
            name, email_address, phone_number, cnic, registered_as,
            organization, linkedin_url, ambassador_name,
            payment_acknowledgement, job_role
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT ON CONSTRAINT participants_natural_key DO NOTHING
        RETURNING
            id, name, email_address, phone_number, cnic, registered_as,
            organization, linkedin_url, ambassador_name,
            payment_acknowledgement, job_role, participant_status,
            created_at, updated_at
        "#,
    )
    .bind(&new.name)
    .bind(&new.email_address)
    .bind(&new.phone_number)
    .bind(&new.cnic)
    .bind(&new.registered_as)
    .bind(&new.organization)
    .bind(&new.linkedin_url)
    .bind(&new.ambassador_name)
    .bind(&new.payment_acknowledgement)
    .bind(&new.job_role)
    .fetch_optional(&mut *conn)
    .await
    .map_err(db_error("insert participant"))?;

    if let Some(participant) = inserted {
        tracing::debug!("Participant created: id={}", participant.id);
        return Ok(participant);
    }

    let key = new.key();
    let existing = sqlx::query_as::<_, Participant>(
        r#"
        SELECT
            id, name, email_address, phone_number, cnic, registered_as,
            organization, linkedin_url, ambassador_name,
            payment_acknowledgement, job_role, participant_status,
            created_at, updated_at
        FROM participants
        WHERE name = $1 AND email_address = $2 AND phone_number = $3 AND cnic = $4
          AND organization = $5 AND linkedin_url = $6 AND ambassador_name = $7
        FOR UPDATE
        "#,
    )
    .bind(&key.name)
    .bind(&key.email_address)
    .bind(&key.phone_number)
    .bind(&key.cnic)
    .bind(&key.organization)
    .bind(&key.linkedin_url)
    .bind(&key.ambassador_name)
    .fetch_one(&mut *conn)
    .await
    .map_err(db_error("load existing participant"))?;

    debug_assert_eq!(existing.key(), key);
    tracing::debug!("Participant reused: id={}", existing.id);

    match &new.job_role {
        Some(job_role) if existing.job_role.as_ref() != Some(job_role) => {
            sqlx::query_as::<_, Participant>(
                r#"
                UPDATE participants
                SET job_role = $1, updated_at = NOW()
                WHERE id = $2
                RETURNING
                    id, name, email_address, phone_number, cnic, registered_as,
                    organization, linkedin_url, ambassador_name,
                    payment_acknowledgement, job_role, participant_status,
                    created_at, updated_at
                "#,
            )
            .bind(job_role)
            .bind(existing.id)
            .fetch_one(&mut *conn)
            .await
            .map_err(db_error("update participant job role"))
        }
        _ => Ok(existing),
    }
}

async fn insert_team_members(
    conn: &mut PgConnection,
    registration_id: Uuid,
    members: &[NewTeamMember],
) -> Result<Vec<TeamMember>> {
    if members.is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = QueryBuilder::<Postgres>::new(
        "INSERT INTO hackathon_team_members (registration_id, position, name, email_address, phone_number, linkedin_url) ",
    );
    builder.push_values(members.iter().enumerate(), |mut row, (position, member)| {
        row.push_bind(registration_id)
            .push_bind(position as i32)
            .push_bind(member.name.clone())
            .push_bind(member.email_address.clone())
            .push_bind(member.phone_number.clone())
            .push_bind(member.linkedin_url.clone());
    });
    builder.push(
        " RETURNING id, registration_id, position, name, email_address, phone_number, linkedin_url",
    );

    let mut inserted = builder
        .build_query_as::<TeamMember>()
        .fetch_all(&mut *conn)
        .await
        .map_err(db_error("insert team members"))?;
    inserted.sort_by_key(|m| m.position);
    Ok(inserted)
}

#[async_trait]
impl RegistrationRepository for PostgresRegistrationRepository {
    async fn list_events(&self) -> Result<Vec<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, name, event_type, description, created_at
            FROM events
            ORDER BY event_type
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list events"))
    }

    async fn find_event_by_type(&self, event_type: EventType) -> Result<Option<Event>> {
        let mut conn = self.pool.acquire().await.map_err(db_error("acquire connection"))?;
        find_event(&mut conn, event_type).await
    }

    async fn list_registrations(
        &self,
        event_id: Uuid,
        filters: &[ParticipantFilter],
        pagination: PaginationQuery,
    ) -> Result<(Vec<RegistrationDetail>, i64)> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let mut count_query = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
        push_registration_scope(&mut count_query, event_id, filters);
        let total: i64 = count_query
            .build_query_scalar()
            .fetch_one(&mut *tx)
            .await
            .map_err(db_error("count registrations"))?;

        let mut page_query = QueryBuilder::<Postgres>::new(
            "SELECT r.id, r.event_id, r.participant_id, r.workshop_participation, r.team_name, \
             r.purpose_of_participation, r.google_technologies, r.previous_projects, r.created_at",
        );
        push_registration_scope(&mut page_query, event_id, filters);
        page_query
            .push(" ORDER BY r.created_at ASC, r.id ASC OFFSET ")
            .push_bind(pagination.offset())
            .push(" LIMIT ")
            .push_bind(pagination.limit());

        let registrations: Vec<EventRegistration> = page_query
            .build_query_as()
            .fetch_all(&mut *tx)
            .await
            .map_err(db_error("list registrations"))?;

        if registrations.is_empty() {
            tx.commit().await.map_err(db_error("commit transaction"))?;
            return Ok((Vec::new(), total));
        }

        let participant_ids: Vec<Uuid> = registrations.iter().map(|r| r.participant_id).collect();
        let registration_ids: Vec<Uuid> = registrations.iter().map(|r| r.id).collect();

        let participants: HashMap<Uuid, Participant> = sqlx::query_as::<_, Participant>(
            r#"
            SELECT
                id, name, email_address, phone_number, cnic, registered_as,
                organization, linkedin_url, ambassador_name,
                payment_acknowledgement, job_role, participant_status,
                created_at, updated_at
            FROM participants
            WHERE id = ANY($1)
            "#,
        )
        .bind(&participant_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("load participants"))?
        .into_iter()
        .map(|p| (p.id, p))
        .collect();

        let mut team_members: HashMap<Uuid, Vec<TeamMember>> = HashMap::new();
        let members = sqlx::query_as::<_, TeamMember>(
            r#"
            SELECT id, registration_id, position, name, email_address, phone_number, linkedin_url
            FROM hackathon_team_members
            WHERE registration_id = ANY($1)
            ORDER BY registration_id, position
            "#,
        )
        .bind(&registration_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("load team members"))?;
        for member in members {
            team_members
                .entry(member.registration_id)
                .or_default()
                .push(member);
        }

        tx.commit().await.map_err(db_error("commit transaction"))?;

        let details = registrations
            .into_iter()
            .map(|registration| {
                let participant = participants
                    .get(&registration.participant_id)
                    .cloned()
                    .ok_or_else(|| {
                        AppError::Internal(format!(
                            "Registration {} references missing participant {}",
                            registration.id, registration.participant_id
                        ))
                    })?;
                Ok(RegistrationDetail {
                    team_members: team_members.remove(&registration.id).unwrap_or_default(),
                    registration,
                    participant,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok((details, total))
    }

    async fn shortlist(
        &self,
        event_id: Uuid,
        participant_ids: &[Uuid],
    ) -> Result<ShortlistOutcome> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let registered = sqlx::query_as::<_, ShortlistedParticipant>(
            r#"
            SELECT
                p.id, p.name, p.email_address, p.phone_number, p.cnic, p.registered_as,
                p.organization, p.linkedin_url, p.ambassador_name,
                p.payment_acknowledgement, p.job_role, p.participant_status,
                p.created_at, p.updated_at, r.team_name
            FROM participants p
            JOIN event_registrations r ON r.participant_id = p.id
            WHERE r.event_id = $1 AND p.id = ANY($2)
            FOR UPDATE OF p
            "#,
        )
        .bind(event_id)
        .bind(participant_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error("load registered participants"))?;

        let (already, pending): (Vec<ShortlistedParticipant>, Vec<ShortlistedParticipant>) =
            registered.into_iter().partition(|entry| {
                entry.participant.participant_status == ParticipantStatus::Shortlisted
            });

        let pending_ids: Vec<Uuid> = pending.iter().map(|entry| entry.participant.id).collect();
        let mut updated: HashMap<Uuid, Participant> = HashMap::new();
        if !pending_ids.is_empty() {
            updated = sqlx::query_as::<_, Participant>(
                r#"
                UPDATE participants
                SET participant_status = $1, updated_at = NOW()
                WHERE id = ANY($2)
                RETURNING
                    id, name, email_address, phone_number, cnic, registered_as,
                    organization, linkedin_url, ambassador_name,
                    payment_acknowledgement, job_role, participant_status,
                    created_at, updated_at
                "#,
            )
            .bind(ParticipantStatus::Shortlisted)
            .bind(&pending_ids)
            .fetch_all(&mut *tx)
            .await
            .map_err(db_error("shortlist participants"))?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        }

        let shortlisted = pending
            .into_iter()
            .map(|entry| ShortlistedParticipant {
                participant: updated
                    .remove(&entry.participant.id)
                    .unwrap_or(entry.participant),
                team_name: entry.team_name,
            })
            .collect();

        tx.commit().await.map_err(db_error("commit transaction"))?;

        Ok(ShortlistOutcome {
            shortlisted,
            already_shortlisted: already.into_iter().map(|entry| entry.participant.id).collect(),
        })
    }

    async fn register(&self, new: NewRegistration) -> Result<RegistrationDetail> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        let event = find_event(&mut tx, new.event_type)
            .await?
            .ok_or_else(|| AppError::NotFound(EVENT_NOT_FOUND.to_string()))?;

        let participant = get_or_create_participant(&mut tx, &new.participant).await?;

        let already_registered: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM event_registrations WHERE participant_id = $1 AND event_id = $2
            )
            "#,
        )
        .bind(participant.id)
        .bind(event.id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("check existing registration"))?;

        if already_registered {
            return Err(AppError::Conflict(ALREADY_REGISTERED.to_string()));
        }

        // unique_participant_event catches the race the EXISTS check cannot
        let registration = sqlx::query_as::<_, EventRegistration>(
            r#"
            INSERT INTO event_registrations (
                event_id, participant_id, workshop_participation, team_name,
                purpose_of_participation, google_technologies, previous_projects
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, event_id, participant_id, workshop_participation, team_name,
                purpose_of_participation, google_technologies, previous_projects, created_at
            "#,
        )
        .bind(event.id)
        .bind(participant.id)
        .bind(&new.workshop_participation)
        .bind(&new.team_name)
        .bind(&new.purpose_of_participation)
        .bind(&new.google_technologies)
        .bind(&new.previous_projects)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::warn!("Failed to insert registration: {:?}", e);
            AppError::conflict_on_unique_violation(e, ALREADY_REGISTERED)
        })?;

        let team_members = insert_team_members(&mut tx, registration.id, &new.team_members).await?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit registration: {:?}", e);
            AppError::conflict_on_unique_violation(e, ALREADY_REGISTERED)
        })?;

        Ok(RegistrationDetail {
            registration,
            participant,
            team_members,
        })
    }
}
