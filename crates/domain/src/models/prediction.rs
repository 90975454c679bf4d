//! Prediction domain models.
//!
//! A prediction is a user's pick for one fight, optionally scoped to a
//! group. At most one prediction exists per (profile, fight, group)
//! tuple; the mutation path is upsert-on-conflict. Correctness and
//! points are written once by the external scoring process after the
//! fight concludes — this service only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's pick for one fight's winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Prediction {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub fight_id: Uuid,
    /// Null means the pick counts toward the global leaderboard.
    pub group_id: Option<Uuid>,
    pub picked_fighter_id: Uuid,
    /// Whether the picked fighter was the betting favorite at pick time.
    pub picked_favorite: bool,
    /// Null until the fight is scored.
    pub is_correct: Option<bool>,
    pub points_earned: i32,
    pub locked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for saving a pick.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SavePredictionRequest {
    pub fight_id: Uuid,
    pub picked_fighter_id: Uuid,
    pub group_id: Option<Uuid>,
}

/// Query parameters for fetching the user's picks for one event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventPredictionsQuery {
    pub event_id: Uuid,
    pub group_id: Option<Uuid>,
}

/// Response for the user's picks on one event, keyed by fight.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventPredictionsResponse {
    pub data: Vec<Prediction>,
    pub count: usize,
}

/// Query parameters for the user's prediction history.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct HistoryQuery {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// One page of prediction history, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HistoryResponse {
    pub data: Vec<Prediction>,
    /// Cursor for the next page; absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
