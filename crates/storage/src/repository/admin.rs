use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::dto::admin::{
    AthleteListQuery, AthleteSummary, CoachListQuery, CoachSort, CoachSummary,
};
use crate::dto::common::{CountBucket, PaginationParams, like_pattern};
use crate::error::Result;
use crate::models::Role;

const ATHLETE_SUMMARY_SELECT: &str = r#"
    SELECT a.account_id, a.name, a.email, a.sport, a.experience, a.status, a.verification,
           a.phone, a.location, p.level, p.profile_image, p.is_profile_complete,
           a.last_login, a.created_at
    FROM accounts a
    LEFT JOIN athlete_profiles p ON p.account_id = a.account_id
    WHERE a.role = 'athlete'
"#;

const COACH_SUMMARY_SELECT: &str = r#"
    SELECT a.account_id, a.name, a.email, a.phone, a.location, a.sport, a.experience,
           a.status, a.verification, p.profile_id, p.bio, p.sports, p.certifications,
           p.hourly_rate, p.profile_image, a.created_at
    FROM accounts a
    LEFT JOIN coach_profiles p ON p.account_id = a.account_id
    WHERE a.role = 'coach'
"#;

/// Read-side queries backing the admin dashboards.
pub struct AdminRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_athletes(
        &self,
        filter: &AthleteListQuery,
        pagination: PaginationParams,
    ) -> Result<(Vec<AthleteSummary>, i64)> {
        let mut count_query = QueryBuilder::new(
            r#"
            SELECT COUNT(*) FROM accounts a
            LEFT JOIN athlete_profiles p ON p.account_id = a.account_id
            WHERE a.role = 'athlete'
            "#,
        );
        push_athlete_filter(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(ATHLETE_SUMMARY_SELECT);
        push_athlete_filter(&mut query, filter);
        query.push(" ORDER BY a.created_at DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let athletes = query
            .build_query_as::<AthleteSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok((athletes, total))
    }

    /// `(total, active, verified)` athlete counts.
    pub async fn athlete_counts(&self) -> Result<(i64, i64, i64)> {
        let counts = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'active'),
                   COUNT(*) FILTER (WHERE verification = 'verified')
            FROM accounts WHERE role = 'athlete'
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }

    pub async fn athletes_by_level(&self) -> Result<Vec<CountBucket>> {
        let buckets = sqlx::query_as::<_, CountBucket>(
            r#"
            SELECT COALESCE(p.level::text, 'Unspecified') AS key, COUNT(*) AS count
            FROM accounts a
            LEFT JOIN athlete_profiles p ON p.account_id = a.account_id
            WHERE a.role = 'athlete'
            GROUP BY 1
            ORDER BY 2 DESC, 1
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(buckets)
    }

    pub async fn accounts_by_sport(&self, role: Role) -> Result<Vec<CountBucket>> {
        let buckets = sqlx::query_as::<_, CountBucket>(
            r#"
            SELECT COALESCE(NULLIF(sport, ''), 'Unspecified') AS key, COUNT(*) AS count
            FROM accounts
            WHERE role = $1
            GROUP BY 1
            ORDER BY 2 DESC, 1
            "#,
        )
        .bind(role)
        .fetch_all(self.pool)
        .await?;

        Ok(buckets)
    }

    pub async fn athlete_sports(&self) -> Result<Vec<String>> {
        let sports = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT sport FROM accounts
            WHERE role = 'athlete' AND sport IS NOT NULL AND sport <> ''
            ORDER BY sport
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(sports)
    }

    pub async fn list_coaches(
        &self,
        filter: &CoachListQuery,
        pagination: PaginationParams,
    ) -> Result<(Vec<CoachSummary>, i64)> {
        let mut count_query = QueryBuilder::new(
            r#"
            SELECT COUNT(*) FROM accounts a
            LEFT JOIN coach_profiles p ON p.account_id = a.account_id
            WHERE a.role = 'coach'
            "#,
        );
        push_coach_filter(&mut count_query, filter);
        let total = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(COACH_SUMMARY_SELECT);
        push_coach_filter(&mut query, filter);
        query.push(match filter.sort_by.unwrap_or_default() {
            CoachSort::Newest => " ORDER BY a.created_at DESC",
            CoachSort::Name => " ORDER BY a.name ASC",
            CoachSort::Rate => " ORDER BY p.hourly_rate DESC NULLS LAST",
        });
        query.push(" LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let coaches = query
            .build_query_as::<CoachSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok((coaches, total))
    }

    pub async fn search_coaches(&self, term: &str, limit: i64) -> Result<Vec<CoachSummary>> {
        let mut query = QueryBuilder::new(COACH_SUMMARY_SELECT);
        push_coach_search(&mut query, term);
        query.push(" ORDER BY a.name ASC LIMIT ");
        query.push_bind(limit);

        let coaches = query
            .build_query_as::<CoachSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok(coaches)
    }

    /// Coaches still waiting for an admin review, oldest first.
    pub async fn pending_coaches(&self) -> Result<Vec<CoachSummary>> {
        let mut query = QueryBuilder::new(COACH_SUMMARY_SELECT);
        query.push(" AND a.verification = 'unverified' ORDER BY a.created_at ASC");

        let coaches = query
            .build_query_as::<CoachSummary>()
            .fetch_all(self.pool)
            .await?;

        Ok(coaches)
    }

    /// `(total, verified, unverified, rejected)` coach counts.
    pub async fn coach_counts(&self) -> Result<(i64, i64, i64, i64)> {
        let counts = sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE verification = 'verified'),
                   COUNT(*) FILTER (WHERE verification = 'unverified'),
                   COUNT(*) FILTER (WHERE verification = 'rejected')
            FROM accounts WHERE role = 'coach'
            "#,
        )
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }
}

fn push_athlete_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &AthleteListQuery) {
    if let Some(sport) = filter.sport.as_deref().filter(|s| !s.trim().is_empty()) {
        query.push(" AND a.sport ILIKE ");
        query.push_bind(sport.trim().to_string());
    }

    if let Some(level) = filter.level {
        query.push(" AND p.level = ");
        query.push_bind(level);
    }

    if let Some(status) = filter.status {
        query.push(" AND a.status = ");
        query.push_bind(status);
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(search);
        query.push(" AND (a.name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR a.email ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR a.sport ILIKE ");
        query.push_bind(pattern);
        query.push(")");
    }
}

fn push_coach_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &CoachListQuery) {
    if let Some(sport) = filter.sport.as_deref().filter(|s| !s.trim().is_empty()) {
        query.push(" AND (a.sport ILIKE ");
        query.push_bind(sport.trim().to_string());
        query.push(" OR EXISTS (SELECT 1 FROM unnest(p.sports) s WHERE s ILIKE ");
        query.push_bind(sport.trim().to_string());
        query.push("))");
    }

    if let Some(location) = filter.location.as_deref().filter(|s| !s.trim().is_empty()) {
        query.push(" AND a.location ILIKE ");
        query.push_bind(like_pattern(location));
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        push_coach_search(query, search);
    }
}

fn push_coach_search(query: &mut QueryBuilder<'_, Postgres>, term: &str) {
    let pattern = like_pattern(term);
    query.push(" AND (a.name ILIKE ");
    query.push_bind(pattern.clone());
    query.push(" OR a.email ILIKE ");
    query.push_bind(pattern.clone());
    query.push(" OR p.bio ILIKE ");
    query.push_bind(pattern.clone());
    query.push(" OR EXISTS (SELECT 1 FROM unnest(p.certifications) c WHERE c ILIKE ");
    query.push_bind(pattern);
    query.push("))");
}
