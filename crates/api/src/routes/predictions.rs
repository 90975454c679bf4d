//! Prediction routes: save picks, view picks, personal stats.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::leaderboard::{Title, UserStatsResponse};
use domain::models::prediction::{
    EventPredictionsQuery, EventPredictionsResponse, HistoryQuery, HistoryResponse, Prediction,
    SavePredictionRequest,
};
use domain::services::{assign_title, compute_user_stats, rank_in_cohort};
use persistence::repositories::{
    EventRepository, GroupRepository, PredictionRepository, ProfileRepository,
};
use shared::pagination::{decode_cursor, encode_cursor};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::record_prediction_saved;
use crate::routes::leaderboard::aggregate_by_profile;

/// Create or update a pick for a fight.
///
/// PUT /api/v1/predictions
///
/// Picks are only accepted while the fight is still upcoming; the
/// fight's lifecycle state is the authority, re-checked here on every
/// save.
pub async fn save_prediction(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Json(request): Json<SavePredictionRequest>,
) -> Result<Json<Prediction>, ApiError> {
    let event_repo = EventRepository::new(state.pool.clone());
    let prediction_repo = PredictionRepository::new(state.pool.clone());

    let fight = event_repo
        .find_fight_by_id(request.fight_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Fight not found".to_string()))?;

    let status: domain::models::FightStatus = fight.status.into();
    if !status.accepts_picks() {
        return Err(ApiError::Conflict(
            "Picks are locked for this fight".to_string(),
        ));
    }

    if request.picked_fighter_id != fight.fighter_a_id
        && request.picked_fighter_id != fight.fighter_b_id
    {
        return Err(ApiError::Validation(
            "Picked fighter is not in this fight".to_string(),
        ));
    }

    // Group-scoped picks require membership
    if let Some(group_id) = request.group_id {
        let group_repo = GroupRepository::new(state.pool.clone());
        group_repo
            .get_membership(group_id, user_auth.profile_id)
            .await?
            .ok_or_else(|| {
                ApiError::NotFound("Group not found or you are not a member".to_string())
            })?;
    }

    let picked_favorite = fight.favorite_id == Some(request.picked_fighter_id);

    let prediction = prediction_repo
        .upsert_prediction(
            user_auth.profile_id,
            request.fight_id,
            request.group_id,
            request.picked_fighter_id,
            picked_favorite,
        )
        .await?;

    record_prediction_saved();
    info!(
        profile_id = %user_auth.profile_id,
        fight_id = %request.fight_id,
        group_id = ?request.group_id,
        picked_favorite = picked_favorite,
        "Prediction saved"
    );

    Ok(Json(prediction.into()))
}

/// The user's picks for one event in a given scope.
///
/// GET /api/v1/predictions?event_id=...&group_id=...
pub async fn event_predictions(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<EventPredictionsQuery>,
) -> Result<Json<EventPredictionsResponse>, ApiError> {
    let repo = PredictionRepository::new(state.pool.clone());
    let predictions = repo
        .list_for_event(user_auth.profile_id, query.event_id, query.group_id)
        .await?;

    let data: Vec<Prediction> = predictions.into_iter().map(Into::into).collect();
    let count = data.len();

    Ok(Json(EventPredictionsResponse { data, count }))
}

/// The authenticated user's aggregate stats, global rank, and title.
///
/// GET /api/v1/me/stats
pub async fn my_stats(
    State(state): State<AppState>,
    user_auth: UserAuth,
) -> Result<Json<UserStatsResponse>, ApiError> {
    let prediction_repo = PredictionRepository::new(state.pool.clone());
    let profile_repo = ProfileRepository::new(state.pool.clone());

    let rows = prediction_repo
        .list_global_for_profile(user_auth.profile_id)
        .await?;
    let predictions: Vec<Prediction> = rows.into_iter().map(Into::into).collect();
    let stats = compute_user_stats(&predictions);

    // Rank against the global cohort, using the same ordering the
    // leaderboard uses
    let cohort = aggregate_by_profile(prediction_repo.list_global_cohort().await?);
    let cohort_size = cohort.len() as i64;
    let rank = rank_in_cohort(cohort, user_auth.profile_id);

    let title = match rank {
        Some(rank) => assign_title(
            stats.accuracy,
            rank,
            cohort_size,
            Some(stats.current_losing_streak),
        ),
        None => Title::default(),
    };

    // Keep the stored title in sync; losing the race is harmless
    let _ = profile_repo
        .update_title(user_auth.profile_id, title.as_str())
        .await;

    Ok(Json(UserStatsResponse {
        stats,
        rank,
        cohort_size,
        title,
    }))
}

/// One page of the user's prediction history, newest first.
///
/// GET /api/v1/me/predictions?cursor=...&limit=20
pub async fn my_predictions(
    State(state): State<AppState>,
    user_auth: UserAuth,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let repo = PredictionRepository::new(state.pool.clone());

    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let cursor = query.cursor.as_deref().map(decode_cursor).transpose()?;

    // Fetch one extra row to know whether another page exists
    let mut rows = repo
        .list_history_page(user_auth.profile_id, cursor, limit + 1)
        .await?;

    let next_cursor = if rows.len() as i64 > limit {
        rows.truncate(limit as usize);
        rows.last().map(|row| encode_cursor(row.created_at, row.id))
    } else {
        None
    };

    let data: Vec<Prediction> = rows.into_iter().map(Into::into).collect();

    Ok(Json(HistoryResponse { data, next_cursor }))
}
