//! Group repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{
    GroupEntity, GroupMemberEntity, GroupRoleDb, MemberWithProfileEntity, UserGroupEntity,
};
use crate::metrics::QueryTimer;

/// Repository for group-related database operations.
#[derive(Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Creates a new GroupRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new group and add the creator as owner.
    pub async fn create_group(
        &self,
        name: &str,
        created_by: Uuid,
    ) -> Result<GroupEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_group");

        // Group and owner membership land atomically
        let mut tx = self.pool.begin().await?;

        let group = sqlx::query_as::<_, GroupEntity>(
            r#"
            INSERT INTO groups (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name, created_by, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(created_by)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO group_members (group_id, profile_id, role)
            VALUES ($1, $2, 'owner')
            "#,
        )
        .bind(group.id)
        .bind(created_by)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(group)
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<GroupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_group_by_id");
        let result = sqlx::query_as::<_, GroupEntity>(
            r#"
            SELECT id, name, created_by, created_at, updated_at
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find all groups a user belongs to, with member counts.
    pub async fn find_user_groups(
        &self,
        profile_id: Uuid,
    ) -> Result<Vec<UserGroupEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_groups");
        let result = sqlx::query_as::<_, UserGroupEntity>(
            r#"
            SELECT
                g.id, g.name,
                (SELECT COUNT(*) FROM group_members WHERE group_id = g.id) as member_count,
                m.role, m.joined_at
            FROM group_members m
            JOIN groups g ON m.group_id = g.id
            WHERE m.profile_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(profile_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get a user's membership in a group.
    pub async fn get_membership(
        &self,
        group_id: Uuid,
        profile_id: Uuid,
    ) -> Result<Option<GroupMemberEntity>, sqlx::Error> {
        let timer = QueryTimer::new("get_membership");
        let result = sqlx::query_as::<_, GroupMemberEntity>(
            r#"
            SELECT id, group_id, profile_id, role, joined_at
            FROM group_members
            WHERE group_id = $1 AND profile_id = $2
            "#,
        )
        .bind(group_id)
        .bind(profile_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count members of a group.
    pub async fn count_members(&self, group_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_members");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM group_members WHERE group_id = $1
            "#,
        )
        .bind(group_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a group's members with profile info, oldest first.
    pub async fn list_members(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<MemberWithProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_members");
        let result = sqlx::query_as::<_, MemberWithProfileEntity>(
            r#"
            SELECT
                m.id, m.group_id, m.profile_id, m.role, m.joined_at,
                p.username, p.display_name, p.avatar_url, p.title
            FROM group_members m
            JOIN profiles p ON m.profile_id = p.id
            WHERE m.group_id = $1
            ORDER BY m.joined_at ASC
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a membership row.
    pub async fn insert_member(
        &self,
        group_id: Uuid,
        profile_id: Uuid,
        role: GroupRoleDb,
    ) -> Result<GroupMemberEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_member");
        let result = sqlx::query_as::<_, GroupMemberEntity>(
            r#"
            INSERT INTO group_members (group_id, profile_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, group_id, profile_id, role, joined_at
            "#,
        )
        .bind(group_id)
        .bind(profile_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Remove a member from a group.
    pub async fn remove_member(
        &self,
        group_id: Uuid,
        profile_id: Uuid,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_member");
        let result = sqlx::query(
            r#"
            DELETE FROM group_members
            WHERE group_id = $1 AND profile_id = $2
            "#,
        )
        .bind(group_id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Update a member's role.
    pub async fn update_member_role(
        &self,
        group_id: Uuid,
        profile_id: Uuid,
        role: GroupRoleDb,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_member_role");
        let result = sqlx::query(
            r#"
            UPDATE group_members
            SET role = $3
            WHERE group_id = $1 AND profile_id = $2
            "#,
        )
        .bind(group_id)
        .bind(profile_id)
        .bind(role)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Rename a group.
    pub async fn rename_group(&self, id: Uuid, name: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("rename_group");
        let result = sqlx::query(
            r#"
            UPDATE groups
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(name)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Delete a group. Members, invites, and scoped predictions cascade
    /// via foreign keys.
    pub async fn delete_group(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_group");
        let result = sqlx::query(
            r#"
            DELETE FROM groups WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: GroupRepository tests require a database connection and are
    // covered by integration tests
}
