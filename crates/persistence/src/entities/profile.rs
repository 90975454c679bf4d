//! Profile entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub auth_subject: String,
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for domain::models::Profile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            auth_subject: entity.auth_subject,
            username: entity.username,
            display_name: entity.display_name,
            avatar_url: entity.avatar_url,
            title: entity.title,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
