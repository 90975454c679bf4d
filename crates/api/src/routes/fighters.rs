//! Fighter routes: browse fighters and their records.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::fighter::{Fighter, FighterSummary, ListFightersQuery, ListFightersResponse};
use persistence::repositories::FighterRepository;

use crate::app::AppState;
use crate::error::ApiError;

/// List fighters, optionally filtered by weight class or search term.
///
/// GET /api/v1/fighters?weight_class=Flyweight&search=pantoja
pub async fn list_fighters(
    State(state): State<AppState>,
    Query(query): Query<ListFightersQuery>,
) -> Result<Json<ListFightersResponse>, ApiError> {
    let repo = FighterRepository::new(state.pool.clone());
    let fighters = repo
        .list_fighters(query.weight_class.as_deref(), query.search.as_deref())
        .await?;

    let summaries: Vec<FighterSummary> = fighters
        .into_iter()
        .map(|f| {
            let fighter: Fighter = f.into();
            FighterSummary::from(&fighter)
        })
        .collect();

    let count = summaries.len();
    Ok(Json(ListFightersResponse {
        data: summaries,
        count,
    }))
}

/// Get a fighter by slug.
///
/// GET /api/v1/fighters/:slug
pub async fn get_fighter(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Fighter>, ApiError> {
    let repo = FighterRepository::new(state.pool.clone());
    let fighter = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Fighter not found".to_string()))?;

    Ok(Json(fighter.into()))
}
