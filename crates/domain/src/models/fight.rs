//! Fight domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::fighter::FighterSummary;

/// Lifecycle status of a single fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FightStatus {
    Upcoming,
    Live,
    Completed,
    Cancelled,
}

impl FightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FightStatus::Upcoming => "upcoming",
            FightStatus::Live => "live",
            FightStatus::Completed => "completed",
            FightStatus::Cancelled => "cancelled",
        }
    }

    /// Picks are only accepted while the fight has not started.
    pub fn accepts_picks(&self) -> bool {
        matches!(self, FightStatus::Upcoming)
    }
}

impl FromStr for FightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upcoming" => Ok(FightStatus::Upcoming),
            "live" => Ok(FightStatus::Live),
            "completed" => Ok(FightStatus::Completed),
            "cancelled" => Ok(FightStatus::Cancelled),
            _ => Err(format!("Invalid fight status: {}", s)),
        }
    }
}

impl fmt::Display for FightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single bout on an event card.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Fight {
    pub id: Uuid,
    pub event_id: Uuid,
    pub fighter_a_id: Uuid,
    pub fighter_b_id: Uuid,
    pub fight_order: i32,
    pub is_main_event: bool,
    pub weight_class: Option<String>,
    pub scheduled_rounds: i32,
    pub status: FightStatus,
    pub winner_id: Option<Uuid>,
    /// Betting favorite at listing time, if the line has one.
    pub favorite_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fight with both fighters joined in, for event detail responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FightWithFighters {
    pub id: Uuid,
    pub event_id: Uuid,
    pub fight_order: i32,
    pub is_main_event: bool,
    pub weight_class: Option<String>,
    pub scheduled_rounds: i32,
    pub status: FightStatus,
    pub winner_id: Option<Uuid>,
    pub favorite_id: Option<Uuid>,
    pub fighter_a: FighterSummary,
    pub fighter_b: FighterSummary,
}

/// Event detail with its full fight card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EventDetail {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub starts_at: DateTime<Utc>,
    pub location: Option<String>,
    pub status: super::event::EventStatus,
    pub fights: Vec<FightWithFighters>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fight_status_accepts_picks() {
        assert!(FightStatus::Upcoming.accepts_picks());
        assert!(!FightStatus::Live.accepts_picks());
        assert!(!FightStatus::Completed.accepts_picks());
        assert!(!FightStatus::Cancelled.accepts_picks());
    }

    #[test]
    fn test_fight_status_from_str() {
        assert_eq!(
            FightStatus::from_str("upcoming").unwrap(),
            FightStatus::Upcoming
        );
        assert_eq!(
            FightStatus::from_str("CANCELLED").unwrap(),
            FightStatus::Cancelled
        );
        assert!(FightStatus::from_str("postponed").is_err());
    }

    #[test]
    fn test_fight_status_display() {
        assert_eq!(format!("{}", FightStatus::Completed), "completed");
    }
}
