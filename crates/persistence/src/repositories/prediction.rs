//! Prediction repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PredictionEntity;
use crate::metrics::QueryTimer;

/// Repository for prediction-related database operations.
#[derive(Clone)]
pub struct PredictionRepository {
    pool: PgPool,
}

impl PredictionRepository {
    /// Creates a new PredictionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or update a pick.
    ///
    /// At most one prediction exists per (profile, fight, group scope);
    /// a second save for the same tuple updates the picked fighter. The
    /// uniqueness constraint treats a null group scope as a distinct
    /// value, so global picks collapse the same way scoped ones do.
    pub async fn upsert_prediction(
        &self,
        profile_id: Uuid,
        fight_id: Uuid,
        group_id: Option<Uuid>,
        picked_fighter_id: Uuid,
        picked_favorite: bool,
    ) -> Result<PredictionEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_prediction");
        let result = sqlx::query_as::<_, PredictionEntity>(
            r#"
            INSERT INTO predictions (profile_id, fight_id, group_id, picked_fighter_id, picked_favorite)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (profile_id, fight_id, group_id)
            DO UPDATE SET picked_fighter_id = $4, picked_favorite = $5, updated_at = NOW()
            RETURNING id, profile_id, fight_id, group_id, picked_fighter_id, picked_favorite,
                      is_correct, points_earned, locked_at, created_at, updated_at
            "#,
        )
        .bind(profile_id)
        .bind(fight_id)
        .bind(group_id)
        .bind(picked_fighter_id)
        .bind(picked_favorite)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch a user's picks for one event in a given scope.
    pub async fn list_for_event(
        &self,
        profile_id: Uuid,
        event_id: Uuid,
        group_id: Option<Uuid>,
    ) -> Result<Vec<PredictionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_predictions_for_event");
        let result = sqlx::query_as::<_, PredictionEntity>(
            r#"
            SELECT p.id, p.profile_id, p.fight_id, p.group_id, p.picked_fighter_id,
                   p.picked_favorite, p.is_correct, p.points_earned, p.locked_at,
                   p.created_at, p.updated_at
            FROM predictions p
            JOIN fights f ON p.fight_id = f.id
            WHERE p.profile_id = $1
              AND f.event_id = $2
              AND p.group_id IS NOT DISTINCT FROM $3
            ORDER BY f.fight_order ASC
            "#,
        )
        .bind(profile_id)
        .bind(event_id)
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch all of a user's global-scope predictions in creation order.
    /// Input for the scoring engine.
    pub async fn list_global_for_profile(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<PredictionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_global_predictions_for_profile");
        let result = sqlx::query_as::<_, PredictionEntity>(
            r#"
            SELECT id, profile_id, fight_id, group_id, picked_fighter_id, picked_favorite,
                   is_correct, points_earned, locked_at, created_at, updated_at
            FROM predictions
            WHERE profile_id = $1 AND group_id IS NULL
            ORDER BY created_at ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch every global-scope prediction, in creation order per
    /// profile. Input for the global leaderboard cohort.
    pub async fn list_global_cohort(&self) -> Result<Vec<PredictionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_global_cohort");
        let result = sqlx::query_as::<_, PredictionEntity>(
            r#"
            SELECT id, profile_id, fight_id, group_id, picked_fighter_id, picked_favorite,
                   is_correct, points_earned, locked_at, created_at, updated_at
            FROM predictions
            WHERE group_id IS NULL
            ORDER BY profile_id, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch every prediction scoped to one group, in creation order
    /// per profile. Input for group standings.
    pub async fn list_group_cohort(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<PredictionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_group_cohort");
        let result = sqlx::query_as::<_, PredictionEntity>(
            r#"
            SELECT id, profile_id, fight_id, group_id, picked_fighter_id, picked_favorite,
                   is_correct, points_earned, locked_at, created_at, updated_at
            FROM predictions
            WHERE group_id = $1
            ORDER BY profile_id, created_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch one page of a user's prediction history, newest first.
    ///
    /// The cursor is the (created_at, id) of the last row of the
    /// previous page; rows strictly before it are returned.
    pub async fn list_history_page(
        &self,
        profile_id: Uuid,
        cursor: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<PredictionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_prediction_history_page");
        let (cursor_ts, cursor_id) = match cursor {
            Some((ts, id)) => (Some(ts), Some(id)),
            None => (None, None),
        };
        let result = sqlx::query_as::<_, PredictionEntity>(
            r#"
            SELECT id, profile_id, fight_id, group_id, picked_fighter_id, picked_favorite,
                   is_correct, points_earned, locked_at, created_at, updated_at
            FROM predictions
            WHERE profile_id = $1
              AND ($2::timestamptz IS NULL OR (created_at, id) < ($2, $3))
            ORDER BY created_at DESC, id DESC
            LIMIT $4
            "#,
        )
        .bind(profile_id)
        .bind(cursor_ts)
        .bind(cursor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: PredictionRepository tests require a database connection and
    // are covered by integration tests
}
