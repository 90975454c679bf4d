//! Banner service: classify a group's next event into a display state.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::event::{Event, EventStatus};

/// The five-way classification of a group's relationship to its next
/// relevant event.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BannerState {
    NoEvent,
    PicksOpen {
        event: Event,
        days_until_lock: i64,
    },
    PicksLocked {
        event: Event,
    },
    Live {
        event: Event,
        fights_completed: u32,
        fights_total: u32,
    },
    BetweenEvents {
        last_event_name: Option<String>,
    },
}

/// Compute the banner state from event data.
///
/// `now` is passed in explicitly; identical inputs always yield the
/// identical state.
pub fn compute_banner_state(
    next_event: Option<&Event>,
    fights_completed: Option<u32>,
    fights_total: Option<u32>,
    now: DateTime<Utc>,
) -> BannerState {
    let Some(event) = next_event else {
        return BannerState::NoEvent;
    };

    match event.status {
        EventStatus::Live => BannerState::Live {
            event: event.clone(),
            fights_completed: fights_completed.unwrap_or(0),
            fights_total: fights_total.unwrap_or(0),
        },
        EventStatus::Completed => BannerState::BetweenEvents {
            last_event_name: Some(event.name.clone()),
        },
        EventStatus::Upcoming => {
            if now < event.starts_at {
                let secs_until = (event.starts_at - now).num_seconds();
                // Ceiling in whole days
                let days_until_lock = (secs_until + 86_399) / 86_400;
                BannerState::PicksOpen {
                    event: event.clone(),
                    days_until_lock,
                }
            } else {
                // Started but not yet flipped to live/completed by the
                // external scoring process
                BannerState::PicksLocked {
                    event: event.clone(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn event(status: EventStatus, starts_at: DateTime<Utc>) -> Event {
        Event {
            id: Uuid::new_v4(),
            name: "UFC 310: Pantoja vs. Asakura".to_string(),
            slug: "ufc-310".to_string(),
            starts_at,
            location: Some("Las Vegas, Nevada".to_string()),
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_event() {
        let state = compute_banner_state(None, None, None, Utc::now());
        assert!(matches!(state, BannerState::NoEvent));
    }

    #[test]
    fn test_live_event_carries_fight_counts() {
        let now = Utc::now();
        let ev = event(EventStatus::Live, now - Duration::hours(2));
        let state = compute_banner_state(Some(&ev), Some(4), Some(12), now);
        match state {
            BannerState::Live {
                fights_completed,
                fights_total,
                ..
            } => {
                assert_eq!(fights_completed, 4);
                assert_eq!(fights_total, 12);
            }
            other => panic!("expected live, got {:?}", other),
        }
    }

    #[test]
    fn test_live_event_defaults_counts_to_zero() {
        let now = Utc::now();
        let ev = event(EventStatus::Live, now - Duration::hours(2));
        let state = compute_banner_state(Some(&ev), None, None, now);
        match state {
            BannerState::Live {
                fights_completed,
                fights_total,
                ..
            } => {
                assert_eq!(fights_completed, 0);
                assert_eq!(fights_total, 0);
            }
            other => panic!("expected live, got {:?}", other),
        }
    }

    #[test]
    fn test_completed_event_is_between_events() {
        let now = Utc::now();
        let ev = event(EventStatus::Completed, now - Duration::days(3));
        let state = compute_banner_state(Some(&ev), None, None, now);
        match state {
            BannerState::BetweenEvents { last_event_name } => {
                assert_eq!(
                    last_event_name.as_deref(),
                    Some("UFC 310: Pantoja vs. Asakura")
                );
            }
            other => panic!("expected between_events, got {:?}", other),
        }
    }

    #[test]
    fn test_upcoming_event_three_days_out() {
        let now = Utc::now();
        let ev = event(EventStatus::Upcoming, now + Duration::days(3));
        let state = compute_banner_state(Some(&ev), None, None, now);
        match state {
            BannerState::PicksOpen {
                days_until_lock, ..
            } => assert_eq!(days_until_lock, 3),
            other => panic!("expected picks_open, got {:?}", other),
        }
    }

    #[test]
    fn test_days_until_lock_rounds_up() {
        let now = Utc::now();
        let ev = event(EventStatus::Upcoming, now + Duration::hours(30));
        let state = compute_banner_state(Some(&ev), None, None, now);
        match state {
            BannerState::PicksOpen {
                days_until_lock, ..
            } => assert_eq!(days_until_lock, 2),
            other => panic!("expected picks_open, got {:?}", other),
        }
    }

    #[test]
    fn test_upcoming_event_already_started_is_locked() {
        let now = Utc::now();
        let ev = event(EventStatus::Upcoming, now - Duration::minutes(10));
        let state = compute_banner_state(Some(&ev), None, None, now);
        assert!(matches!(state, BannerState::PicksLocked { .. }));
    }

    #[test]
    fn test_banner_state_serializes_with_type_tag() {
        let state = compute_banner_state(None, None, None, Utc::now());
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["type"], "no_event");
    }
}
