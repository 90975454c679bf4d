//! Fighter entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the fighters table.
#[derive(Debug, Clone, FromRow)]
pub struct FighterEntity {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub slug: String,
    pub weight_class: Option<String>,
    pub record_wins: i32,
    pub record_losses: i32,
    pub record_draws: i32,
    pub record_no_contests: i32,
    pub stance: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FighterEntity> for domain::models::Fighter {
    fn from(entity: FighterEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            nickname: entity.nickname,
            slug: entity.slug,
            weight_class: entity.weight_class,
            record_wins: entity.record_wins,
            record_losses: entity.record_losses,
            record_draws: entity.record_draws,
            record_no_contests: entity.record_no_contests,
            stance: entity.stance,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
