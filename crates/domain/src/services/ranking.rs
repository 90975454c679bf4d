//! Ranking service: ordered leaderboards and percentile titles.
//!
//! The same algorithm serves the global leaderboard and per-group
//! standings; only the input cohort differs, so a user's rank and
//! title can legitimately differ between the two views.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::models::leaderboard::{LeaderboardEntry, Title, UserStats};
use crate::models::profile::ProfileSummary;

/// Losing streak at which the title short-circuits to the blind pick.
const LOSING_STREAK_TITLE_THRESHOLD: u32 = 5;

/// Standings order: points descending, then accuracy descending, then
/// profile id ascending. The explicit secondary keys make the ordering
/// deterministic rather than an accident of sort stability.
fn compare_standings(a: (i64, u32, Uuid), b: (i64, u32, Uuid)) -> Ordering {
    b.0.cmp(&a.0)
        .then_with(|| b.1.cmp(&a.1))
        .then_with(|| a.2.cmp(&b.2))
}

/// Assign a descriptive title from leaderboard position.
///
/// An active losing streak of five or more overrides everything else.
/// Otherwise the title follows the rank percentile within the cohort:
/// top 1% "The Oracle", top 10% "Analyst", bottom quartile "Casual",
/// everyone else "Fight Fan". Total over all inputs.
pub fn assign_title(
    _accuracy: u32,
    rank: i64,
    cohort_size: i64,
    losing_streak: Option<u32>,
) -> Title {
    if losing_streak.is_some_and(|streak| streak >= LOSING_STREAK_TITLE_THRESHOLD) {
        return Title::Blind;
    }

    let percentile = if cohort_size > 0 {
        (rank as f64 / cohort_size as f64) * 100.0
    } else {
        50.0
    };

    if percentile <= 1.0 {
        Title::Oracle
    } else if percentile <= 10.0 {
        Title::Analyst
    } else if percentile > 75.0 {
        Title::Casual
    } else {
        Title::FightFan
    }
}

/// Rank a profile within a cohort of aggregates, using the same
/// ordering as [`build_leaderboard`]. Returns None when the profile has
/// no entry in the cohort.
pub fn rank_in_cohort(cohort: Vec<(Uuid, UserStats)>, profile_id: Uuid) -> Option<i64> {
    let mut cohort = cohort;
    cohort.sort_by(|(a_id, a), (b_id, b)| {
        compare_standings(
            (a.total_points, a.accuracy, *a_id),
            (b.total_points, b.accuracy, *b_id),
        )
    });
    cohort
        .iter()
        .position(|(id, _)| *id == profile_id)
        .map(|i| i as i64 + 1)
}

/// Build a ranked leaderboard from a cohort of aggregated stats.
///
/// Ranks are the 1-based positions after sorting in standings order.
pub fn build_leaderboard(cohort: Vec<(ProfileSummary, UserStats)>) -> Vec<LeaderboardEntry> {
    let mut cohort = cohort;
    cohort.sort_by(|(a_profile, a), (b_profile, b)| {
        compare_standings(
            (a.total_points, a.accuracy, a_profile.id),
            (b.total_points, b.accuracy, b_profile.id),
        )
    });

    let cohort_size = cohort.len() as i64;
    cohort
        .into_iter()
        .enumerate()
        .map(|(i, (profile, stats))| {
            let rank = i as i64 + 1;
            let title = assign_title(
                stats.accuracy,
                rank,
                cohort_size,
                Some(stats.current_losing_streak),
            );
            LeaderboardEntry {
                profile,
                rank,
                total_points: stats.total_points,
                total_predictions: stats.total_predictions,
                correct_predictions: stats.correct_predictions,
                accuracy: stats.accuracy,
                title,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::Username;
    use fake::Fake;

    fn profile(id: Uuid) -> ProfileSummary {
        ProfileSummary {
            id,
            username: Username().fake(),
            display_name: "Test User".to_string(),
            avatar_url: None,
            title: Title::FightFan.to_string(),
        }
    }

    fn stats(points: i64, accuracy: u32) -> UserStats {
        UserStats {
            total_predictions: 10,
            correct_predictions: accuracy / 10,
            incorrect_predictions: 10 - accuracy / 10,
            pending_predictions: 0,
            accuracy,
            total_points: points,
            current_streak: 0,
            current_losing_streak: 0,
        }
    }

    #[test]
    fn test_assign_title_rank_one_of_hundred_is_oracle() {
        assert_eq!(assign_title(80, 1, 100, None), Title::Oracle);
    }

    #[test]
    fn test_assign_title_percentile_bands() {
        assert_eq!(assign_title(70, 5, 100, None), Title::Analyst);
        assert_eq!(assign_title(70, 10, 100, None), Title::Analyst);
        assert_eq!(assign_title(50, 50, 100, None), Title::FightFan);
        assert_eq!(assign_title(50, 75, 100, None), Title::FightFan);
        assert_eq!(assign_title(20, 76, 100, None), Title::Casual);
        assert_eq!(assign_title(10, 100, 100, None), Title::Casual);
    }

    #[test]
    fn test_assign_title_losing_streak_short_circuits() {
        assert_eq!(assign_title(90, 1, 100, Some(5)), Title::Blind);
        assert_eq!(assign_title(0, 100, 100, Some(9)), Title::Blind);
        // Below the threshold the streak is ignored
        assert_eq!(assign_title(90, 1, 100, Some(4)), Title::Oracle);
    }

    #[test]
    fn test_assign_title_empty_cohort_defaults_mid_pack() {
        // percentile defaults to 50 -> Fight Fan
        assert_eq!(assign_title(0, 1, 0, None), Title::FightFan);
    }

    #[test]
    fn test_assign_title_sole_user_lands_in_bottom_band() {
        // rank 1 of 1 is percentile 100
        assert_eq!(assign_title(100, 1, 1, None), Title::Casual);
    }

    #[test]
    fn test_build_leaderboard_orders_by_points() {
        let cohort = vec![
            (profile(Uuid::new_v4()), stats(10, 50)),
            (profile(Uuid::new_v4()), stats(42, 80)),
            (profile(Uuid::new_v4()), stats(22, 60)),
        ];
        let board = build_leaderboard(cohort);
        assert_eq!(board.len(), 3);
        assert_eq!(board[0].total_points, 42);
        assert_eq!(board[1].total_points, 22);
        assert_eq!(board[2].total_points, 10);
    }

    #[test]
    fn test_build_leaderboard_ranks_are_one_to_n() {
        let cohort: Vec<_> = (0..6)
            .map(|i| (profile(Uuid::new_v4()), stats(i * 3, 50)))
            .collect();
        let board = build_leaderboard(cohort);
        let ranks: Vec<i64> = board.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        // Points never increase as rank worsens
        for pair in board.windows(2) {
            assert!(pair[0].total_points >= pair[1].total_points);
        }
    }

    #[test]
    fn test_build_leaderboard_tie_breaks_by_accuracy_then_id() {
        let low_id = Uuid::from_u128(1);
        let high_id = Uuid::from_u128(2);
        let cohort = vec![
            (profile(high_id), stats(20, 60)),
            (profile(low_id), stats(20, 60)),
            (profile(Uuid::from_u128(3)), stats(20, 70)),
        ];
        let board = build_leaderboard(cohort);
        // Higher accuracy wins the tie, then lower id
        assert_eq!(board[0].profile.id, Uuid::from_u128(3));
        assert_eq!(board[1].profile.id, low_id);
        assert_eq!(board[2].profile.id, high_id);
    }

    #[test]
    fn test_build_leaderboard_empty_cohort() {
        assert!(build_leaderboard(vec![]).is_empty());
    }

    #[test]
    fn test_rank_in_cohort_matches_leaderboard_order() {
        let a = Uuid::from_u128(1);
        let b = Uuid::from_u128(2);
        let c = Uuid::from_u128(3);
        let cohort = vec![(a, stats(10, 50)), (b, stats(42, 80)), (c, stats(22, 60))];
        assert_eq!(rank_in_cohort(cohort.clone(), b), Some(1));
        assert_eq!(rank_in_cohort(cohort.clone(), c), Some(2));
        assert_eq!(rank_in_cohort(cohort.clone(), a), Some(3));
        assert_eq!(rank_in_cohort(cohort, Uuid::from_u128(99)), None);
    }

    #[test]
    fn test_build_leaderboard_titles_follow_percentile() {
        let cohort: Vec<_> = (0..100)
            .map(|i| (profile(Uuid::new_v4()), stats(1000 - i as i64, 50)))
            .collect();
        let board = build_leaderboard(cohort);
        assert_eq!(board[0].title, Title::Oracle);
        assert_eq!(board[5].title, Title::Analyst);
        assert_eq!(board[49].title, Title::FightFan);
        assert_eq!(board[99].title, Title::Casual);
    }
}
