//! Fighter domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a fighter with their professional record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Fighter {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub slug: String,
    pub weight_class: Option<String>,
    pub record_wins: i32,
    pub record_losses: i32,
    pub record_draws: i32,
    pub record_no_contests: i32,
    pub stance: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fighter {
    /// Format the professional record as "W-L-D", with a no-contest
    /// suffix only when the fighter has any.
    pub fn record(&self) -> String {
        format_record(
            self.record_wins,
            self.record_losses,
            self.record_draws,
            self.record_no_contests,
        )
    }
}

/// Format a professional record as "W-L-D", appending " (N NC)" only
/// when there are no-contests.
pub fn format_record(wins: i32, losses: i32, draws: i32, no_contests: i32) -> String {
    let base = format!("{}-{}-{}", wins, losses, draws);
    if no_contests > 0 {
        format!("{} ({} NC)", base, no_contests)
    } else {
        base
    }
}

/// Summary of a fighter for listings and fight cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FighterSummary {
    pub id: Uuid,
    pub name: String,
    pub nickname: Option<String>,
    pub slug: String,
    pub weight_class: Option<String>,
    pub record: String,
}

impl From<&Fighter> for FighterSummary {
    fn from(fighter: &Fighter) -> Self {
        Self {
            id: fighter.id,
            name: fighter.name.clone(),
            nickname: fighter.nickname.clone(),
            slug: fighter.slug.clone(),
            weight_class: fighter.weight_class.clone(),
            record: fighter.record(),
        }
    }
}

/// Query parameters for listing fighters.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub struct ListFightersQuery {
    pub weight_class: Option<String>,
    pub search: Option<String>,
}

/// Response for listing fighters.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ListFightersResponse {
    pub data: Vec<FighterSummary>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fighter(wins: i32, losses: i32, draws: i32, nc: i32) -> Fighter {
        Fighter {
            id: Uuid::new_v4(),
            name: "Test Fighter".to_string(),
            nickname: None,
            slug: "test-fighter".to_string(),
            weight_class: Some("Flyweight".to_string()),
            record_wins: wins,
            record_losses: losses,
            record_draws: draws,
            record_no_contests: nc,
            stance: Some("Orthodox".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_record_without_no_contests() {
        assert_eq!(fighter(28, 8, 0, 0).record(), "28-8-0");
    }

    #[test]
    fn test_record_with_no_contests() {
        assert_eq!(fighter(22, 3, 1, 2).record(), "22-3-1 (2 NC)");
    }

    #[test]
    fn test_record_debut_fighter() {
        assert_eq!(fighter(0, 0, 0, 0).record(), "0-0-0");
    }

    #[test]
    fn test_fighter_summary_carries_formatted_record() {
        let f = fighter(15, 2, 0, 1);
        let summary = FighterSummary::from(&f);
        assert_eq!(summary.record, "15-2-0 (1 NC)");
        assert_eq!(summary.slug, "test-fighter");
    }
}
