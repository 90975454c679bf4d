//! Leaderboard domain models.
//!
//! Leaderboard entries are not stored — they are computed from
//! prediction records by the scoring and ranking services.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::profile::ProfileSummary;

/// Dynamic user title derived from leaderboard percentile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Title {
    #[serde(rename = "The Oracle")]
    Oracle,
    #[serde(rename = "Analyst")]
    Analyst,
    #[serde(rename = "Fight Fan")]
    FightFan,
    #[serde(rename = "Casual")]
    Casual,
    #[serde(rename = "Picking With Their Eyes Closed")]
    Blind,
}

impl Title {
    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Oracle => "The Oracle",
            Title::Analyst => "Analyst",
            Title::FightFan => "Fight Fan",
            Title::Casual => "Casual",
            Title::Blind => "Picking With Their Eyes Closed",
        }
    }
}

impl Default for Title {
    fn default() -> Self {
        Title::FightFan
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-user aggregate computed from their prediction records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserStats {
    pub total_predictions: u32,
    pub correct_predictions: u32,
    pub incorrect_predictions: u32,
    pub pending_predictions: u32,
    /// Integer percentage, round-half-up. Zero when no predictions exist.
    pub accuracy: u32,
    pub total_points: i64,
    /// Consecutive correct picks counted backward from the most recent
    /// scored prediction.
    pub current_streak: u32,
    /// Consecutive incorrect picks counted the same way. Feeds the
    /// losing-streak title.
    pub current_losing_streak: u32,
}

/// One row of a computed leaderboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardEntry {
    pub profile: ProfileSummary,
    pub rank: i64,
    pub total_points: i64,
    pub total_predictions: u32,
    pub correct_predictions: u32,
    pub accuracy: u32,
    pub title: Title,
}

/// Response for leaderboard endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardResponse {
    pub data: Vec<LeaderboardEntry>,
    pub count: usize,
}

/// Response for the authenticated user's own stats.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserStatsResponse {
    #[serde(flatten)]
    pub stats: UserStats,
    pub rank: Option<i64>,
    pub cohort_size: i64,
    pub title: Title,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_strings() {
        assert_eq!(Title::Oracle.as_str(), "The Oracle");
        assert_eq!(Title::Analyst.as_str(), "Analyst");
        assert_eq!(Title::FightFan.as_str(), "Fight Fan");
        assert_eq!(Title::Casual.as_str(), "Casual");
        assert_eq!(Title::Blind.as_str(), "Picking With Their Eyes Closed");
    }

    #[test]
    fn test_title_default_is_fight_fan() {
        assert_eq!(Title::default(), Title::FightFan);
    }

    #[test]
    fn test_title_serializes_to_display_string() {
        let json = serde_json::to_string(&Title::Oracle).unwrap();
        assert_eq!(json, "\"The Oracle\"");
        let json = serde_json::to_string(&Title::Blind).unwrap();
        assert_eq!(json, "\"Picking With Their Eyes Closed\"");
    }

    #[test]
    fn test_user_stats_default_is_empty() {
        let stats = UserStats::default();
        assert_eq!(stats.total_predictions, 0);
        assert_eq!(stats.accuracy, 0);
        assert_eq!(stats.current_streak, 0);
    }
}
