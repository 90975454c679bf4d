//! Invite repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GroupInviteEntity;
use crate::metrics::QueryTimer;

/// Repository for invite-related database operations.
#[derive(Clone)]
pub struct InviteRepository {
    pool: PgPool,
}

impl InviteRepository {
    /// Creates a new InviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new invite.
    pub async fn create_invite(
        &self,
        group_id: Uuid,
        token: &str,
        created_by: Uuid,
    ) -> Result<GroupInviteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_invite");
        let result = sqlx::query_as::<_, GroupInviteEntity>(
            r#"
            INSERT INTO group_invites (group_id, token, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, group_id, token, created_by, expires_at, max_uses, use_count,
                      is_active, created_at
            "#,
        )
        .bind(group_id)
        .bind(token)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an invite by token. Inactive invites are not returned;
    /// redemption reports them as invalid.
    pub async fn find_by_token(
        &self,
        token: &str,
    ) -> Result<Option<GroupInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_by_token");
        let result = sqlx::query_as::<_, GroupInviteEntity>(
            r#"
            SELECT id, group_id, token, created_by, expires_at, max_uses, use_count,
                   is_active, created_at
            FROM group_invites
            WHERE token = $1 AND is_active = true
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a group's active invite, if any.
    pub async fn find_active_for_group(
        &self,
        group_id: Uuid,
    ) -> Result<Option<GroupInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_invite_for_group");
        let result = sqlx::query_as::<_, GroupInviteEntity>(
            r#"
            SELECT id, group_id, token, created_by, expires_at, max_uses, use_count,
                   is_active, created_at
            FROM group_invites
            WHERE group_id = $1 AND is_active = true
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Increment use count for an invite after a successful join.
    ///
    /// The use cap is re-checked in SQL so two racing redemptions at
    /// the boundary cannot both bump past max_uses.
    pub async fn increment_use_count(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("increment_invite_use_count");
        let result = sqlx::query(
            r#"
            UPDATE group_invites
            SET use_count = use_count + 1
            WHERE id = $1
              AND is_active = true
              AND (max_uses IS NULL OR use_count < max_uses)
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Revoke (soft delete) an invite.
    pub async fn revoke_invite(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("revoke_invite");
        let result = sqlx::query(
            r#"
            UPDATE group_invites
            SET is_active = false
            WHERE id = $1 AND is_active = true
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Check if a token exists.
    pub async fn token_exists(&self, token: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_invite_token_exists");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM group_invites WHERE token = $1)
            "#,
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Generate a unique invite token by retrying on collision.
    pub async fn generate_unique_token<F>(&self, generator: F) -> Result<String, sqlx::Error>
    where
        F: Fn() -> String,
    {
        let mut token = generator();
        let mut attempts = 0;

        while self.token_exists(&token).await? {
            token = generator();
            attempts += 1;
            if attempts > 100 {
                return Err(sqlx::Error::Protocol(
                    "Could not generate unique invite token".to_string(),
                ));
            }
        }

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    // Note: InviteRepository tests require a database connection and are
    // covered by integration tests
}
