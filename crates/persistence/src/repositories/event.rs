//! Event repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{EventEntity, EventWithFightCountEntity, FightWithFightersEntity};
use crate::metrics::QueryTimer;

/// Fight completion stats for a live event.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct EventFightStats {
    pub completed: i64,
    pub total: i64,
}

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List events with fight counts, optionally filtered by status.
    pub async fn list_events(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<EventWithFightCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let result = sqlx::query_as::<_, EventWithFightCountEntity>(
            r#"
            SELECT
                e.id, e.name, e.slug, e.starts_at, e.location, e.status,
                (SELECT COUNT(*) FROM fights WHERE event_id = e.id) as fight_count
            FROM events e
            WHERE ($1::text IS NULL OR e.status = $1::event_status)
            ORDER BY e.starts_at ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_slug");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, slug, starts_at, location, status, created_at, updated_at
            FROM events
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, slug, starts_at, location, status, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an event's fights with both fighters joined in, in card order.
    pub async fn list_fights_with_fighters(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<FightWithFightersEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_fights_with_fighters");
        let result = sqlx::query_as::<_, FightWithFightersEntity>(
            r#"
            SELECT
                f.id, f.event_id, f.fight_order, f.is_main_event, f.weight_class,
                f.scheduled_rounds, f.status, f.winner_id, f.favorite_id,
                fa.id as fighter_a_id, fa.name as fighter_a_name,
                fa.nickname as fighter_a_nickname, fa.slug as fighter_a_slug,
                fa.weight_class as fighter_a_weight_class,
                fa.record_wins as fighter_a_wins, fa.record_losses as fighter_a_losses,
                fa.record_draws as fighter_a_draws, fa.record_no_contests as fighter_a_no_contests,
                fb.id as fighter_b_id, fb.name as fighter_b_name,
                fb.nickname as fighter_b_nickname, fb.slug as fighter_b_slug,
                fb.weight_class as fighter_b_weight_class,
                fb.record_wins as fighter_b_wins, fb.record_losses as fighter_b_losses,
                fb.record_draws as fighter_b_draws, fb.record_no_contests as fighter_b_no_contests
            FROM fights f
            JOIN fighters fa ON f.fighter_a_id = fa.id
            JOIN fighters fb ON f.fighter_b_id = fb.id
            WHERE f.event_id = $1
            ORDER BY f.fight_order ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a fight by ID.
    pub async fn find_fight_by_id(
        &self,
        fight_id: Uuid,
    ) -> Result<Option<crate::entities::FightEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_fight_by_id");
        let result = sqlx::query_as::<_, crate::entities::FightEntity>(
            r#"
            SELECT id, event_id, fighter_a_id, fighter_b_id, fight_order, is_main_event,
                   weight_class, scheduled_rounds, status, winner_id, favorite_id,
                   created_at, updated_at
            FROM fights
            WHERE id = $1
            "#,
        )
        .bind(fight_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch the next upcoming or live event, falling back to the most
    /// recently completed one. Drives the group event banner.
    pub async fn next_event_for_banner(&self) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("next_event_for_banner");
        let upcoming = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, slug, starts_at, location, status, created_at, updated_at
            FROM events
            WHERE status IN ('upcoming', 'live')
            ORDER BY starts_at ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        if let Some(event) = upcoming {
            timer.record();
            return Ok(Some(event));
        }

        let completed = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, name, slug, starts_at, location, status, created_at, updated_at
            FROM events
            WHERE status = 'completed'
            ORDER BY starts_at DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        completed
    }

    /// Get fight completion stats for an event.
    pub async fn fight_stats(&self, event_id: Uuid) -> Result<EventFightStats, sqlx::Error> {
        let timer = QueryTimer::new("event_fight_stats");
        let result = sqlx::query_as::<_, EventFightStats>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'completed') as completed,
                COUNT(*) as total
            FROM fights
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: EventRepository tests require a database connection and are
    // covered by integration tests
}
