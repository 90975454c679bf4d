//! Prediction entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the predictions table.
#[derive(Debug, Clone, FromRow)]
pub struct PredictionEntity {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub fight_id: Uuid,
    pub group_id: Option<Uuid>,
    pub picked_fighter_id: Uuid,
    pub picked_favorite: bool,
    pub is_correct: Option<bool>,
    pub points_earned: i32,
    pub locked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PredictionEntity> for domain::models::Prediction {
    fn from(entity: PredictionEntity) -> Self {
        Self {
            id: entity.id,
            profile_id: entity.profile_id,
            fight_id: entity.fight_id,
            group_id: entity.group_id,
            picked_fighter_id: entity.picked_fighter_id,
            picked_favorite: entity.picked_favorite,
            is_correct: entity.is_correct,
            points_earned: entity.points_earned,
            locked_at: entity.locked_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
