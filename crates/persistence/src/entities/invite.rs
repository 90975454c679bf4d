//! Invite entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the group_invites table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupInviteEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub token: String,
    pub created_by: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<GroupInviteEntity> for domain::models::GroupInvite {
    fn from(entity: GroupInviteEntity) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            token: entity.token,
            created_by: entity.created_by,
            expires_at: entity.expires_at,
            max_uses: entity.max_uses,
            use_count: entity.use_count,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
