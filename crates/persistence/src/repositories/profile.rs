//! Profile repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;
use crate::metrics::QueryTimer;

/// Repository for profile-related database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a profile by its identity-provider subject.
    pub async fn find_by_auth_subject(
        &self,
        auth_subject: &str,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_auth_subject");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT id, auth_subject, username, display_name, avatar_url, title, created_at, updated_at
            FROM profiles
            WHERE auth_subject = $1
            "#,
        )
        .bind(auth_subject)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_id");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT id, auth_subject, username, display_name, avatar_url, title, created_at, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find profiles by ID.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profiles_by_ids");
        let result = sqlx::query_as::<_, ProfileEntity>(
            r#"
            SELECT id, auth_subject, username, display_name, avatar_url, title, created_at, updated_at
            FROM profiles
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Get or create a profile row for an identity-provider subject.
    ///
    /// Two concurrent first-login requests can both miss the select and
    /// race the insert; the unique constraint on auth_subject fails one
    /// of them with 23505 and we retry the select.
    pub async fn get_or_create(
        &self,
        auth_subject: &str,
        username: &str,
        display_name: &str,
        avatar_url: Option<&str>,
    ) -> Result<ProfileEntity, sqlx::Error> {
        if let Some(existing) = self.find_by_auth_subject(auth_subject).await? {
            return Ok(existing);
        }

        let timer = QueryTimer::new("create_profile");
        let inserted = sqlx::query_as::<_, ProfileEntity>(
            r#"
            INSERT INTO profiles (auth_subject, username, display_name, avatar_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, auth_subject, username, display_name, avatar_url, title, created_at, updated_at
            "#,
        )
        .bind(auth_subject)
        .bind(username)
        .bind(display_name)
        .bind(avatar_url)
        .fetch_one(&self.pool)
        .await;
        timer.record();

        match inserted {
            Ok(profile) => Ok(profile),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                // Lost the insert race; the row exists now
                self.find_by_auth_subject(auth_subject)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Update the stored leaderboard title for a profile.
    pub async fn update_title(&self, id: Uuid, title: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_profile_title");
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET title = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(title)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: ProfileRepository tests require a database connection and are
    // covered by integration tests
}
