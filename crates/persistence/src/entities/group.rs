//! Group entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::group::GroupRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for group_role that maps to the PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "group_role", rename_all = "lowercase")]
pub enum GroupRoleDb {
    Owner,
    Member,
}

impl From<GroupRoleDb> for GroupRole {
    fn from(db_role: GroupRoleDb) -> Self {
        match db_role {
            GroupRoleDb::Owner => GroupRole::Owner,
            GroupRoleDb::Member => GroupRole::Member,
        }
    }
}

impl From<GroupRole> for GroupRoleDb {
    fn from(role: GroupRole) -> Self {
        match role {
            GroupRole::Owner => GroupRoleDb::Owner,
            GroupRole::Member => GroupRoleDb::Member,
        }
    }
}

/// Database row mapping for the groups table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupEntity {
    pub id: Uuid,
    pub name: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GroupEntity> for domain::models::Group {
    fn from(entity: GroupEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the group_members table.
#[derive(Debug, Clone, FromRow)]
pub struct GroupMemberEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub profile_id: Uuid,
    pub role: GroupRoleDb,
    pub joined_at: DateTime<Utc>,
}

impl From<GroupMemberEntity> for domain::models::GroupMember {
    fn from(entity: GroupMemberEntity) -> Self {
        Self {
            id: entity.id,
            group_id: entity.group_id,
            profile_id: entity.profile_id,
            role: entity.role.into(),
            joined_at: entity.joined_at,
        }
    }
}

/// Member row with profile info joined in, for group detail.
#[derive(Debug, Clone, FromRow)]
pub struct MemberWithProfileEntity {
    pub id: Uuid,
    pub group_id: Uuid,
    pub profile_id: Uuid,
    pub role: GroupRoleDb,
    pub joined_at: DateTime<Utc>,
    // Profile info
    pub username: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub title: String,
}

/// Group row with the viewer's membership and member count, for the
/// user's group list.
#[derive(Debug, Clone, FromRow)]
pub struct UserGroupEntity {
    pub id: Uuid,
    pub name: String,
    pub member_count: i64,
    pub role: GroupRoleDb,
    pub joined_at: DateTime<Utc>,
}
