//! Leaderboard routes.
//!
//! Leaderboards are computed, not stored: prediction rows are fetched
//! for the cohort, folded into per-user aggregates by the scoring
//! service, and ranked by the ranking service.

use std::collections::HashMap;

use axum::{extract::State, Json};
use domain::models::leaderboard::{LeaderboardResponse, UserStats};
use domain::models::prediction::Prediction;
use domain::models::profile::{Profile, ProfileSummary};
use domain::services::{build_leaderboard, compute_user_stats};
use persistence::entities::PredictionEntity;
use persistence::repositories::{PredictionRepository, ProfileRepository};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Fold prediction rows (ordered by profile, then creation time) into
/// per-profile aggregates.
pub(crate) fn aggregate_by_profile(rows: Vec<PredictionEntity>) -> Vec<(Uuid, UserStats)> {
    let mut per_profile: Vec<(Uuid, Vec<Prediction>)> = Vec::new();
    for row in rows {
        let prediction: Prediction = row.into();
        match per_profile.last_mut() {
            Some((profile_id, predictions)) if *profile_id == prediction.profile_id => {
                predictions.push(prediction);
            }
            _ => per_profile.push((prediction.profile_id, vec![prediction])),
        }
    }

    per_profile
        .into_iter()
        .map(|(profile_id, predictions)| (profile_id, compute_user_stats(&predictions)))
        .collect()
}

/// Fetch profile summaries for a cohort, keyed by profile id.
pub(crate) async fn profile_summaries(
    repo: &ProfileRepository,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, ProfileSummary>, ApiError> {
    let profiles = repo.find_by_ids(ids).await?;
    Ok(profiles
        .into_iter()
        .map(|entity| {
            let profile: Profile = entity.into();
            (profile.id, ProfileSummary::from(&profile))
        })
        .collect())
}

/// The global leaderboard: every user with global-scope predictions,
/// ranked by total points.
///
/// GET /api/v1/leaderboard
pub async fn global_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let prediction_repo = PredictionRepository::new(state.pool.clone());
    let profile_repo = ProfileRepository::new(state.pool.clone());

    let rows = prediction_repo.list_global_cohort().await?;
    let aggregates = aggregate_by_profile(rows);

    let ids: Vec<Uuid> = aggregates.iter().map(|(id, _)| *id).collect();
    let mut summaries = profile_summaries(&profile_repo, &ids).await?;

    let cohort: Vec<(ProfileSummary, UserStats)> = aggregates
        .into_iter()
        .filter_map(|(id, stats)| summaries.remove(&id).map(|summary| (summary, stats)))
        .collect();

    let entries = build_leaderboard(cohort);
    let count = entries.len();

    Ok(Json(LeaderboardResponse {
        data: entries,
        count,
    }))
}
