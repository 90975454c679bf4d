//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::event::EventStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for event_status that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
pub enum EventStatusDb {
    Upcoming,
    Live,
    Completed,
}

impl From<EventStatusDb> for EventStatus {
    fn from(db_status: EventStatusDb) -> Self {
        match db_status {
            EventStatusDb::Upcoming => EventStatus::Upcoming,
            EventStatusDb::Live => EventStatus::Live,
            EventStatusDb::Completed => EventStatus::Completed,
        }
    }
}

impl From<EventStatus> for EventStatusDb {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Upcoming => EventStatusDb::Upcoming,
            EventStatus::Live => EventStatusDb::Live,
            EventStatus::Completed => EventStatusDb::Completed,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: EventStatusDb,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            starts_at: entity.starts_at,
            location: entity.location,
            status: entity.status.into(),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Event row with its fight count, for listings.
#[derive(Debug, Clone, FromRow)]
pub struct EventWithFightCountEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: EventStatusDb,
    pub fight_count: i64,
}
