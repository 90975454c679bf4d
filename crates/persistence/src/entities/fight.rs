//! Fight entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::fight::FightStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for fight_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "fight_status", rename_all = "lowercase")]
pub enum FightStatusDb {
    Upcoming,
    Live,
    Completed,
    Cancelled,
}

impl From<FightStatusDb> for FightStatus {
    fn from(db_status: FightStatusDb) -> Self {
        match db_status {
            FightStatusDb::Upcoming => FightStatus::Upcoming,
            FightStatusDb::Live => FightStatus::Live,
            FightStatusDb::Completed => FightStatus::Completed,
            FightStatusDb::Cancelled => FightStatus::Cancelled,
        }
    }
}

impl From<FightStatus> for FightStatusDb {
    fn from(status: FightStatus) -> Self {
        match status {
            FightStatus::Upcoming => FightStatusDb::Upcoming,
            FightStatus::Live => FightStatusDb::Live,
            FightStatus::Completed => FightStatusDb::Completed,
            FightStatus::Cancelled => FightStatusDb::Cancelled,
        }
    }
}

/// Database row mapping for the fights table.
#[derive(Debug, Clone, FromRow)]
pub struct FightEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub fighter_a_id: Uuid,
    pub fighter_b_id: Uuid,
    pub fight_order: i32,
    pub is_main_event: bool,
    pub weight_class: Option<String>,
    pub scheduled_rounds: i32,
    pub status: FightStatusDb,
    pub winner_id: Option<Uuid>,
    pub favorite_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FightEntity> for domain::models::Fight {
    fn from(entity: FightEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            fighter_a_id: entity.fighter_a_id,
            fighter_b_id: entity.fighter_b_id,
            fight_order: entity.fight_order,
            is_main_event: entity.is_main_event,
            weight_class: entity.weight_class,
            scheduled_rounds: entity.scheduled_rounds,
            status: entity.status.into(),
            winner_id: entity.winner_id,
            favorite_id: entity.favorite_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Fight row with both fighters joined in, for event detail.
#[derive(Debug, Clone, FromRow)]
pub struct FightWithFightersEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub fight_order: i32,
    pub is_main_event: bool,
    pub weight_class: Option<String>,
    pub scheduled_rounds: i32,
    pub status: FightStatusDb,
    pub winner_id: Option<Uuid>,
    pub favorite_id: Option<Uuid>,
    // Fighter A
    pub fighter_a_id: Uuid,
    pub fighter_a_name: String,
    pub fighter_a_nickname: Option<String>,
    pub fighter_a_slug: String,
    pub fighter_a_weight_class: Option<String>,
    pub fighter_a_wins: i32,
    pub fighter_a_losses: i32,
    pub fighter_a_draws: i32,
    pub fighter_a_no_contests: i32,
    // Fighter B
    pub fighter_b_id: Uuid,
    pub fighter_b_name: String,
    pub fighter_b_nickname: Option<String>,
    pub fighter_b_slug: String,
    pub fighter_b_weight_class: Option<String>,
    pub fighter_b_wins: i32,
    pub fighter_b_losses: i32,
    pub fighter_b_draws: i32,
    pub fighter_b_no_contests: i32,
}
