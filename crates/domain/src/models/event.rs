//! Event domain models for fight cards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Live,
    Completed,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Live => "live",
            EventStatus::Completed => "completed",
        }
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(EventStatus::Upcoming),
            "live" => Ok(EventStatus::Live),
            "completed" => Ok(EventStatus::Completed),
            _ => Err(format!("Invalid event status: {}", s)),
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents a fight event (e.g. "UFC 310: Pantoja vs. Asakura").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary of an event for listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSummary {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: EventStatus,
    pub fight_count: i64,
}

/// Query parameters for listing events.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListEventsQuery {
    pub status: Option<String>,
}

/// Response for listing events.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListEventsResponse {
    pub data: Vec<EventSummary>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_status_as_str() {
        assert_eq!(EventStatus::Upcoming.as_str(), "upcoming");
        assert_eq!(EventStatus::Live.as_str(), "live");
        assert_eq!(EventStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_event_status_from_str() {
        assert_eq!(
            EventStatus::from_str("upcoming").unwrap(),
            EventStatus::Upcoming
        );
        assert_eq!(EventStatus::from_str("LIVE").unwrap(), EventStatus::Live);
        assert_eq!(
            EventStatus::from_str("Completed").unwrap(),
            EventStatus::Completed
        );
        assert!(EventStatus::from_str("cancelled").is_err());
    }

    #[test]
    fn test_event_status_display() {
        assert_eq!(format!("{}", EventStatus::Upcoming), "upcoming");
        assert_eq!(format!("{}", EventStatus::Live), "live");
    }
}
