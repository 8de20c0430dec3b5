// src/leaderboard/aggregate.rs

use std::collections::BTreeMap;

use super::{BestAttempt, BestAttempts, round_half_up};
use crate::models::leaderboard::AggregatedStanding;

/// Folds best attempts into one unranked standing per user, ordered by user id.
pub fn aggregate(best: &BestAttempts<'_>) -> Vec<AggregatedStanding> {
    let mut by_user: BTreeMap<&str, BTreeMap<&str, &BestAttempt<'_>>> = BTreeMap::new();
    for ((user_id, quiz_id), attempt) in best {
        by_user.entry(*user_id).or_default().insert(*quiz_id, attempt);
    }

    by_user
        .into_iter()
        .map(|(user_id, quizzes)| standing(user_id, &quizzes))
        .collect()
}

fn standing(user_id: &str, quizzes: &BTreeMap<&str, &BestAttempt<'_>>) -> AggregatedStanding {
    let quizzes_completed = quizzes.len() as u32;

    let score_sum: f64 = quizzes.values().map(|a| a.score).sum();
    let accuracy_sum: f64 = quizzes.values().map(|a| f64::from(a.accuracy)).sum();

    let total_accuracy = if quizzes_completed > 0 {
        round_half_up(accuracy_sum / f64::from(quizzes_completed)).clamp(0.0, 100.0) as u32
    } else {
        0
    };

    // Profile comes from the most recent best attempt; equal times keep the
    // lowest quiz id.
    let mut latest: Option<&BestAttempt<'_>> = None;
    for &attempt in quizzes.values() {
        if latest.is_none_or(|l| attempt.taken_at > l.taken_at) {
            latest = Some(attempt);
        }
    }

    let (display_name, avatar_url, provider) = latest
        .map(|a| (a.user.name.clone(), a.user.picture.clone(), a.user.provider.clone()))
        .unwrap_or_default();

    AggregatedStanding {
        user_id: user_id.to_string(),
        display_name,
        avatar_url,
        provider,
        total_score: round_half_up(score_sum) as i64,
        total_accuracy,
        quizzes_completed,
        rank: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaderboard::{select_best, test_support::attempt};

    #[test]
    fn sums_scores_and_averages_accuracy() {
        let attempts = vec![
            attempt("u", "q1", "c", 40.25, 9, 10, 3),
            attempt("u", "q2", "c", 30.5, 2, 3, 2),
            attempt("u", "q3", "c", 10.0, 1, 4, 1),
        ];

        let standings = aggregate(&select_best(&attempts));
        assert_eq!(standings.len(), 1);
        let s = &standings[0];
        // 80.75 -> 81
        assert_eq!(s.total_score, 81);
        // (90 + 67 + 25) / 3 = 60.67 -> 61
        assert_eq!(s.total_accuracy, 61);
        assert_eq!(s.quizzes_completed, 3);
        assert_eq!(s.rank, 0);
    }

    #[test]
    fn only_best_attempt_per_quiz_counts() {
        let attempts = vec![
            attempt("u", "q1", "c", 50.0, 3, 10, 2),
            attempt("u", "q1", "c", 80.0, 9, 10, 1),
            attempt("u", "q1", "c", 20.0, 1, 10, 0),
        ];

        let standings = aggregate(&select_best(&attempts));
        assert_eq!(standings[0].total_score, 80);
        assert_eq!(standings[0].total_accuracy, 90);
        assert_eq!(standings[0].quizzes_completed, 1);
    }

    #[test]
    fn accuracy_is_clamped_for_over_reported_answers() {
        let attempts = vec![
            attempt("u", "q1", "c", 10.0, 15, 10, 2),
            attempt("u", "q2", "c", 10.0, 12, 10, 1),
        ];

        let standings = aggregate(&select_best(&attempts));
        assert_eq!(standings[0].total_accuracy, 100);
    }

    #[test]
    fn zero_question_attempts_average_in_as_zero() {
        let attempts = vec![
            attempt("u", "q1", "c", 10.0, 0, 0, 2),
            attempt("u", "q2", "c", 10.0, 10, 10, 1),
        ];

        let standings = aggregate(&select_best(&attempts));
        assert_eq!(standings[0].total_accuracy, 50);
        assert_eq!(standings[0].quizzes_completed, 2);
    }

    #[test]
    fn profile_comes_from_most_recent_best_attempt() {
        let mut old = attempt("u", "q1", "c", 10.0, 5, 10, 1);
        old.user.name = "Old Name".to_string();
        let mut recent = attempt("u", "q2", "c", 10.0, 5, 10, 9);
        recent.user.name = "New Name".to_string();
        recent.user.picture = None;
        let attempts = vec![old, recent];

        let standings = aggregate(&select_best(&attempts));
        assert_eq!(standings[0].display_name, "New Name");
        assert_eq!(standings[0].avatar_url, None);
        assert_eq!(standings[0].provider.as_deref(), Some("google"));
    }

    #[test]
    fn quiz_counts_never_exceed_distinct_pairs() {
        let attempts = vec![
            attempt("a", "q1", "c", 1.0, 1, 2, 6),
            attempt("a", "q1", "c", 2.0, 1, 2, 5),
            attempt("a", "q2", "c", 3.0, 1, 2, 4),
            attempt("b", "q1", "c", 4.0, 1, 2, 3),
            attempt("b", "q1", "c", 5.0, 2, 2, 2),
            attempt("c", "q3", "c", 6.0, 0, 0, 1),
        ];

        let standings = aggregate(&select_best(&attempts));
        let total: u32 = standings.iter().map(|s| s.quizzes_completed).sum();
        assert_eq!(total, 4);
        let users: Vec<_> = standings.iter().map(|s| s.user_id.as_str()).collect();
        assert_eq!(users, ["a", "b", "c"]);
    }

    #[test]
    fn no_best_attempts_means_no_standings() {
        assert!(aggregate(&BestAttempts::new()).is_empty());
    }
}
