use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::common::{PaginationParams, like_pattern};
use crate::dto::tournament::{
    CreateTournamentRequest, DEFAULT_MAX_ATHLETES, DEFAULT_MAX_COACHES, TournamentFilter,
    TournamentStats, UpdateTournamentRequest,
};
use crate::error::{Result, StorageError};
use crate::models::{Role, Tournament, TournamentStatus, Visibility};

pub struct TournamentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TournamentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Tournament> {
        sqlx::query_as::<_, Tournament>("SELECT * FROM tournaments WHERE tournament_id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<Tournament>> {
        let tournaments = sqlx::query_as::<_, Tournament>(
            "SELECT * FROM tournaments WHERE tournament_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(self.pool)
        .await?;

        Ok(tournaments)
    }

    #[tracing::instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(
        &self,
        request: &CreateTournamentRequest,
        created_by: Uuid,
        allowed_user_types: &[Role],
    ) -> Result<Tournament> {
        let tournament = sqlx::query_as::<_, Tournament>(
            r#"
            INSERT INTO tournaments (name, sport, date, participants, status, location, prize,
                                     organizer, description, registration_deadline, created_by,
                                     is_active, visibility, allowed_user_types, max_coaches,
                                     max_athletes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(request.name.trim())
        .bind(request.sport)
        .bind(request.date)
        .bind(request.participants)
        .bind(request.status.unwrap_or(TournamentStatus::Upcoming))
        .bind(request.location.trim())
        .bind(request.prize.trim())
        .bind(request.organizer.trim())
        .bind(request.description.as_deref())
        .bind(request.registration_deadline)
        .bind(created_by)
        .bind(request.is_active.unwrap_or(true))
        .bind(request.visibility.unwrap_or(Visibility::Public))
        .bind(allowed_user_types)
        .bind(request.max_coaches.unwrap_or(DEFAULT_MAX_COACHES))
        .bind(request.max_athletes.unwrap_or(DEFAULT_MAX_ATHLETES))
        .fetch_one(self.pool)
        .await?;

        Ok(tournament)
    }

    /// Lists tournaments matching `filter`, soonest first, with the unpaginated total.
    pub async fn list(
        &self,
        filter: &TournamentFilter,
        pagination: PaginationParams,
    ) -> Result<(Vec<Tournament>, i64)> {
        let mut count_query = QueryBuilder::new("SELECT COUNT(*) FROM tournaments WHERE 1=1");
        push_filter(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT * FROM tournaments WHERE 1=1");
        push_filter(&mut query, filter);
        query.push(" ORDER BY date ASC, created_at DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let tournaments = query
            .build_query_as::<Tournament>()
            .fetch_all(self.pool)
            .await?;

        Ok((tournaments, total))
    }

    #[tracing::instrument(skip(self, update))]
    pub async fn update(&self, id: Uuid, update: &UpdateTournamentRequest) -> Result<Tournament> {
        sqlx::query_as::<_, Tournament>(
            r#"
            UPDATE tournaments
            SET name = COALESCE($2, name),
                sport = COALESCE($3, sport),
                date = COALESCE($4, date),
                participants = COALESCE($5, participants),
                status = COALESCE($6, status),
                location = COALESCE($7, location),
                prize = COALESCE($8, prize),
                organizer = COALESCE($9, organizer),
                description = COALESCE($10, description),
                registration_deadline = COALESCE($11, registration_deadline),
                visibility = COALESCE($12, visibility),
                allowed_user_types = COALESCE($13, allowed_user_types),
                max_coaches = COALESCE($14, max_coaches),
                max_athletes = COALESCE($15, max_athletes),
                is_active = COALESCE($16, is_active),
                updated_at = now()
            WHERE tournament_id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.sport)
        .bind(update.date)
        .bind(update.participants)
        .bind(update.status)
        .bind(update.location.as_deref())
        .bind(update.prize.as_deref())
        .bind(update.organizer.as_deref())
        .bind(update.description.as_deref())
        .bind(update.registration_deadline)
        .bind(update.visibility)
        .bind(update.allowed_user_types.as_deref())
        .bind(update.max_coaches)
        .bind(update.max_athletes)
        .bind(update.is_active)
        .fetch_optional(self.pool)
        .await
        .map_err(StorageError::from)
        .map_err(|e| {
            if e.is_check_violation() {
                StorageError::ConstraintViolation(
                    "Capacity cannot be lower than the number of current registrations".into(),
                )
            } else {
                e
            }
        })?
        .ok_or(StorageError::NotFound)
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM tournaments WHERE tournament_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    pub async fn stats(&self) -> Result<TournamentStats> {
        let stats = sqlx::query_as::<_, TournamentStats>(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE status = 'active') AS active,
                   COUNT(*) FILTER (WHERE status = 'upcoming') AS upcoming,
                   COUNT(*) FILTER (WHERE status = 'completed') AS completed
            FROM tournaments
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(stats)
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &TournamentFilter) {
    if filter.active_only {
        query.push(" AND is_active = TRUE");
    }

    if let Some(role) = filter.allowed_role {
        query.push(" AND ");
        query.push_bind(role);
        query.push(" = ANY(allowed_user_types)");
    }

    if let Some(created_by) = filter.created_by {
        query.push(" AND created_by = ");
        query.push_bind(created_by);
    }

    if let Some(status) = filter.status {
        query.push(" AND status = ");
        query.push_bind(status);
    }

    if let Some(sport) = filter.sport {
        query.push(" AND sport = ");
        query.push_bind(sport);
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        query.push(" AND (name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR location ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR organizer ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}
