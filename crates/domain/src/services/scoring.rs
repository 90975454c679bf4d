//! Scoring service: per-user aggregates from prediction records.
//!
//! Correctness and points are assigned externally after each fight is
//! scored; this service only folds the scored records into totals,
//! accuracy, and streaks. Input is assumed well-formed (non-negative
//! points, at most one prediction per fight per scope) — the store's
//! constraints guarantee it, so nothing is re-validated here.

use crate::models::leaderboard::UserStats;
use crate::models::prediction::Prediction;

/// Compute aggregate statistics from one user's predictions.
///
/// The slice must be in creation order (oldest first); streaks are
/// counted backward from the most recent scored prediction.
pub fn compute_user_stats(predictions: &[Prediction]) -> UserStats {
    let total = predictions.len() as u32;
    let correct = predictions
        .iter()
        .filter(|p| p.is_correct == Some(true))
        .count() as u32;
    let incorrect = predictions
        .iter()
        .filter(|p| p.is_correct == Some(false))
        .count() as u32;
    let pending = total - correct - incorrect;

    let accuracy = if total > 0 {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    let total_points = predictions.iter().map(|p| p.points_earned as i64).sum();

    // Walk scored predictions newest-first; the streak ends at the
    // first result that breaks the run.
    let mut current_streak = 0u32;
    let mut current_losing_streak = 0u32;
    for outcome in predictions
        .iter()
        .rev()
        .filter_map(|p| p.is_correct)
    {
        if outcome {
            if current_losing_streak > 0 {
                break;
            }
            current_streak += 1;
        } else {
            if current_streak > 0 {
                break;
            }
            current_losing_streak += 1;
        }
    }

    UserStats {
        total_predictions: total,
        correct_predictions: correct,
        incorrect_predictions: incorrect,
        pending_predictions: pending,
        accuracy,
        total_points,
        current_streak,
        current_losing_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn prediction(is_correct: Option<bool>, points: i32) -> Prediction {
        Prediction {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            fight_id: Uuid::new_v4(),
            group_id: None,
            picked_fighter_id: Uuid::new_v4(),
            picked_favorite: false,
            is_correct,
            points_earned: points,
            locked_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_input_yields_zeroes() {
        let stats = compute_user_stats(&[]);
        assert_eq!(stats, UserStats::default());
    }

    #[test]
    fn test_counts_partition_totals() {
        let preds = vec![
            prediction(Some(true), 2),
            prediction(Some(false), 0),
            prediction(None, 0),
            prediction(Some(true), 1),
            prediction(None, 0),
        ];
        let stats = compute_user_stats(&preds);
        assert_eq!(stats.total_predictions, 5);
        assert_eq!(stats.correct_predictions, 2);
        assert_eq!(stats.incorrect_predictions, 1);
        assert_eq!(stats.pending_predictions, 2);
        assert_eq!(
            stats.correct_predictions + stats.incorrect_predictions + stats.pending_predictions,
            stats.total_predictions
        );
        assert_eq!(stats.total_points, 3);
    }

    #[test]
    fn test_accuracy_rounds_half_up() {
        // 1/3 = 33.33... -> 33
        let preds = vec![
            prediction(Some(true), 1),
            prediction(Some(false), 0),
            prediction(Some(false), 0),
        ];
        assert_eq!(compute_user_stats(&preds).accuracy, 33);

        // 2/3 = 66.66... -> 67
        let preds = vec![
            prediction(Some(true), 1),
            prediction(Some(true), 1),
            prediction(Some(false), 0),
        ];
        assert_eq!(compute_user_stats(&preds).accuracy, 67);

        // 1/8 = 12.5 -> 13
        let mut preds = vec![prediction(Some(true), 1)];
        preds.extend((0..7).map(|_| prediction(Some(false), 0)));
        assert_eq!(compute_user_stats(&preds).accuracy, 13);
    }

    #[test]
    fn test_accuracy_zero_when_no_predictions() {
        assert_eq!(compute_user_stats(&[]).accuracy, 0);
    }

    #[test]
    fn test_pending_predictions_do_not_break_streak() {
        // Streak scans only scored predictions
        let preds = vec![
            prediction(Some(false), 0),
            prediction(Some(true), 1),
            prediction(None, 0),
            prediction(Some(true), 1),
            prediction(None, 0),
        ];
        assert_eq!(compute_user_stats(&preds).current_streak, 2);
    }

    #[test]
    fn test_streak_zero_when_nothing_scored() {
        let preds = vec![prediction(None, 0), prediction(None, 0)];
        let stats = compute_user_stats(&preds);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.current_losing_streak, 0);
    }

    #[test]
    fn test_streak_zero_when_latest_scored_is_incorrect() {
        let preds = vec![
            prediction(Some(true), 1),
            prediction(Some(true), 1),
            prediction(Some(false), 0),
        ];
        let stats = compute_user_stats(&preds);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.current_losing_streak, 1);
    }

    #[test]
    fn test_losing_streak_counts_consecutive_misses() {
        let preds = vec![
            prediction(Some(true), 1),
            prediction(Some(false), 0),
            prediction(Some(false), 0),
            prediction(Some(false), 0),
        ];
        let stats = compute_user_stats(&preds);
        assert_eq!(stats.current_losing_streak, 3);
        assert_eq!(stats.current_streak, 0);
    }

    #[test]
    fn test_ten_pick_scenario() {
        // 6 correct of 10, most-recent-last, third-from-last missed
        let outcomes = [
            true, true, false, true, false, true, false, false, true, true,
        ];
        let preds: Vec<Prediction> = outcomes
            .iter()
            .map(|&c| prediction(Some(c), if c { 1 } else { 0 }))
            .collect();
        let stats = compute_user_stats(&preds);
        assert_eq!(stats.total_predictions, 10);
        assert_eq!(stats.correct_predictions, 6);
        assert_eq!(stats.accuracy, 60);
        assert_eq!(stats.total_points, 6);
        // Last two are correct, third-from-last is incorrect
        assert_eq!(stats.current_streak, 2);
    }
}
