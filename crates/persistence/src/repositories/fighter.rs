//! Fighter repository for database operations.

use sqlx::PgPool;

use crate::entities::FighterEntity;
use crate::metrics::QueryTimer;

/// Repository for fighter-related database operations.
#[derive(Clone)]
pub struct FighterRepository {
    pool: PgPool,
}

impl FighterRepository {
    /// Creates a new FighterRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List fighters, optionally filtered by weight class or a name
    /// search term.
    pub async fn list_fighters(
        &self,
        weight_class: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<FighterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_fighters");
        let search_pattern = search.map(|s| format!("%{}%", s));
        let result = sqlx::query_as::<_, FighterEntity>(
            r#"
            SELECT id, name, nickname, slug, weight_class, record_wins, record_losses,
                   record_draws, record_no_contests, stance, created_at, updated_at
            FROM fighters
            WHERE ($1::text IS NULL OR weight_class = $1)
              AND ($2::text IS NULL OR name ILIKE $2 OR nickname ILIKE $2)
            ORDER BY name ASC
            "#,
        )
        .bind(weight_class)
        .bind(search_pattern)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a fighter by slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<FighterEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_fighter_by_slug");
        let result = sqlx::query_as::<_, FighterEntity>(
            r#"
            SELECT id, name, nickname, slug, weight_class, record_wins, record_losses,
                   record_draws, record_no_contests, stance, created_at, updated_at
            FROM fighters
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: FighterRepository tests require a database connection and are
    // covered by integration tests
}
