//! Event routes: browse fight cards.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::event::{EventSummary, ListEventsQuery, ListEventsResponse};
use domain::models::fight::{EventDetail, FightWithFighters};
use domain::models::fighter::{format_record, FighterSummary};
use persistence::entities::FightWithFightersEntity;
use persistence::repositories::EventRepository;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;

/// List events with fight counts.
///
/// GET /api/v1/events?status=upcoming
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    // Reject unknown status filters up front
    if let Some(ref status) = query.status {
        status
            .parse::<domain::models::EventStatus>()
            .map_err(ApiError::Validation)?;
    }

    let repo = EventRepository::new(state.pool.clone());
    let events = repo.list_events(query.status.as_deref()).await?;

    let summaries: Vec<EventSummary> = events
        .into_iter()
        .map(|e| EventSummary {
            id: e.id,
            name: e.name,
            slug: e.slug,
            starts_at: e.starts_at,
            location: e.location,
            status: e.status.into(),
            fight_count: e.fight_count,
        })
        .collect();

    let count = summaries.len();
    Ok(Json(ListEventsResponse {
        data: summaries,
        count,
    }))
}

fn fight_response(f: FightWithFightersEntity) -> FightWithFighters {
    FightWithFighters {
        id: f.id,
        event_id: f.event_id,
        fight_order: f.fight_order,
        is_main_event: f.is_main_event,
        weight_class: f.weight_class,
        scheduled_rounds: f.scheduled_rounds,
        status: f.status.into(),
        winner_id: f.winner_id,
        favorite_id: f.favorite_id,
        fighter_a: FighterSummary {
            id: f.fighter_a_id,
            name: f.fighter_a_name,
            nickname: f.fighter_a_nickname,
            slug: f.fighter_a_slug,
            weight_class: f.fighter_a_weight_class,
            record: format_record(
                f.fighter_a_wins,
                f.fighter_a_losses,
                f.fighter_a_draws,
                f.fighter_a_no_contests,
            ),
        },
        fighter_b: FighterSummary {
            id: f.fighter_b_id,
            name: f.fighter_b_name,
            nickname: f.fighter_b_nickname,
            slug: f.fighter_b_slug,
            weight_class: f.fighter_b_weight_class,
            record: format_record(
                f.fighter_b_wins,
                f.fighter_b_losses,
                f.fighter_b_draws,
                f.fighter_b_no_contests,
            ),
        },
    }
}

/// Get an event with its full fight card.
///
/// GET /api/v1/events/:slug
pub async fn get_event(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EventDetail>, ApiError> {
    let repo = EventRepository::new(state.pool.clone());

    let event = repo
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    let fights = repo.list_fights_with_fighters(event.id).await?;

    info!(
        event_slug = %slug,
        fight_count = fights.len(),
        "Retrieved event detail"
    );

    Ok(Json(EventDetail {
        id: event.id,
        name: event.name,
        slug: event.slug,
        starts_at: event.starts_at,
        location: event.location,
        status: event.status.into(),
        fights: fights.into_iter().map(fight_response).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record() {
        assert_eq!(format_record(28, 8, 0, 0), "28-8-0");
        assert_eq!(format_record(22, 3, 1, 2), "22-3-1 (2 NC)");
    }
}
