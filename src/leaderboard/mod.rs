// src/leaderboard/mod.rs

//! Leaderboard ranking engine.
//!
//! Turns a snapshot of quiz attempts into a ranked list of standings:
//! category filter, best attempt per (user, quiz), per-user aggregation,
//! then sort and rank. Every stage is a pure function over its input; nothing
//! is cached between calls.

pub mod aggregate;
pub mod filter;
pub mod rank;
pub mod select;

use crate::models::{attempt::QuizAttempt, leaderboard::AggregatedStanding};

pub use aggregate::aggregate;
pub use filter::{CategorySlice, filter_by_category};
pub use rank::rank;
pub use select::{BestAttempt, BestAttempts, select_best};

/// What a leaderboard query was computed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardScope {
    Global,
    Category(String),
}

impl LeaderboardScope {
    pub fn category_id(&self) -> Option<&str> {
        match self {
            LeaderboardScope::Global => None,
            LeaderboardScope::Category(id) => Some(id.as_str()),
        }
    }
}

impl From<Option<String>> for LeaderboardScope {
    fn from(category: Option<String>) -> Self {
        category.map_or(LeaderboardScope::Global, LeaderboardScope::Category)
    }
}

/// Ranked standings together with the scope they were computed for.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub scope: LeaderboardScope,
    pub standings: Vec<AggregatedStanding>,
}

impl Leaderboard {
    /// True when a category filter was applied and no attempt matched it.
    /// An empty global leaderboard is not a "no results" case.
    pub fn has_no_results_for_category(&self) -> bool {
        matches!(self.scope, LeaderboardScope::Category(_)) && self.standings.is_empty()
    }

    pub fn standing_for(&self, user_id: &str) -> Option<&AggregatedStanding> {
        self.standings.iter().find(|s| s.user_id == user_id)
    }
}

/// Runs the full pipeline over one attempt snapshot.
///
/// `attempts` is expected in store order (most recent first), although the
/// result does not depend on it.
pub fn compute(attempts: &[QuizAttempt], scope: &LeaderboardScope) -> Leaderboard {
    let best = match scope {
        LeaderboardScope::Global => select_best(attempts),
        LeaderboardScope::Category(id) => select_best(filter_by_category(attempts, id).attempts),
    };

    let standings = rank(aggregate(&best));

    tracing::debug!(
        attempts = attempts.len(),
        best_attempts = best.len(),
        standings = standings.len(),
        category = scope.category_id(),
        "leaderboard computed"
    );

    Leaderboard {
        scope: scope.clone(),
        standings,
    }
}

/// Rounds to the nearest integer, .5 going toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    // Adding 0.5 first loses precision just below .5 and above 2^52.
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Percentage of correct answers, rounded. Zero when there were no questions.
pub fn accuracy_percent(correct_answers: u32, total_questions: u32) -> u32 {
    if total_questions == 0 {
        return 0;
    }
    let percent = f64::from(correct_answers) * 100.0 / f64::from(total_questions);
    round_half_up(percent) as u32
}


#[cfg(test)]
mod tests {
    use super::test_support::attempt;
    use super::*;

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(2.49), 2.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.51), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497.0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
        assert_eq!(accuracy_percent(1, 8), 13);
    }

    #[test]
    fn score_just_below_half_rounds_down_in_totals() {
        let attempts = vec![attempt("u", "q1", "c", 0.49999999999999994, 1, 2, 1)];

        let board = compute(&attempts, &LeaderboardScope::Global);
        assert_eq!(board.standings[0].total_score, 0);
    }

    #[test]
    fn zero_questions_means_zero_accuracy() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(5, 0), 0);
    }

    #[test]
    fn global_pipeline_ranks_every_user() {
        let attempts = vec![
            attempt("alice", "q1", "rust", 80.0, 9, 10, 30),
            attempt("bob", "q1", "rust", 60.0, 6, 10, 20),
            attempt("alice", "q2", "go", 50.0, 5, 10, 10),
            attempt("carol", "q2", "go", 100.0, 10, 10, 5),
        ];

        let board = compute(&attempts, &LeaderboardScope::Global);
        let order: Vec<_> = board.standings.iter().map(|s| s.user_id.as_str()).collect();
        assert_eq!(order, ["alice", "carol", "bob"]);
        let ranks: Vec<_> = board.standings.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
        assert_eq!(board.standings[0].total_score, 130);
        assert_eq!(board.standings[0].total_accuracy, 70);
        assert_eq!(board.standings[0].quizzes_completed, 2);
        assert!(!board.has_no_results_for_category());
    }

    #[test]
    fn category_pipeline_only_counts_matching_quizzes() {
        let attempts = vec![
            attempt("alice", "q1", "rust", 80.0, 9, 10, 30),
            attempt("alice", "q2", "go", 50.0, 5, 10, 10),
            attempt("carol", "q2", "go", 100.0, 10, 10, 5),
        ];

        let board = compute(&attempts, &LeaderboardScope::Category("rust".to_string()));
        assert_eq!(board.standings.len(), 1);
        assert_eq!(board.standings[0].user_id, "alice");
        assert_eq!(board.standings[0].total_score, 80);
        assert_eq!(board.standings[0].quizzes_completed, 1);
    }

    #[test]
    fn empty_category_is_flagged_but_empty_global_is_not() {
        let attempts = vec![attempt("alice", "q1", "rust", 80.0, 9, 10, 30)];

        let board = compute(&attempts, &LeaderboardScope::Category("history".to_string()));
        assert!(board.standings.is_empty());
        assert!(board.has_no_results_for_category());

        let board = compute(&[], &LeaderboardScope::Global);
        assert!(board.standings.is_empty());
        assert!(!board.has_no_results_for_category());
    }

    #[test]
    fn pipeline_is_idempotent_on_a_fixed_snapshot() {
        let attempts = vec![
            attempt("dave", "q1", "rust", 70.0, 7, 10, 3),
            attempt("erin", "q1", "rust", 70.0, 7, 10, 2),
            attempt("frank", "q2", "rust", 70.0, 7, 10, 1),
        ];

        let first = compute(&attempts, &LeaderboardScope::Global);
        let second = compute(&attempts, &LeaderboardScope::Global);
        assert_eq!(first.standings, second.standings);
    }

    #[test]
    fn invariants_hold_across_a_grid_of_snapshots() {
        let scores = [0.0, 0.5, 2.5, 49.999, 100.0];
        let mut grid = Vec::new();
        for correct in 0..=4 {
            for total in 0..=3 {
                for &score in &scores {
                    grid.push((correct, total, score));
                }
            }
        }

        let scopes = [
            LeaderboardScope::Global,
            LeaderboardScope::Category("c0".to_string()),
        ];

        for start in 0..grid.len() {
            // 8 attempts over 3 users x 2 quizzes, so some pairs repeat.
            let attempts: Vec<_> = (0..8)
                .map(|k| {
                    let (correct, total, score) = grid[(start + k * 7) % grid.len()];
                    let quiz = k % 2;
                    attempt(
                        &format!("u{}", k % 3),
                        &format!("q{quiz}"),
                        &format!("c{quiz}"),
                        score,
                        correct,
                        total,
                        k as i64,
                    )
                })
                .collect();

            for scope in &scopes {
                let board = compute(&attempts, scope);

                let in_scope = attempts
                    .iter()
                    .filter(|a| scope.category_id().is_none_or(|c| a.quiz.category_id == c));
                let pairs: std::collections::HashSet<_> = in_scope
                    .clone()
                    .map(|a| (a.user_id.as_str(), a.quiz_id.as_str()))
                    .collect();
                let users: std::collections::HashSet<_> =
                    in_scope.map(|a| a.user_id.as_str()).collect();

                assert!(board.standings.iter().all(|s| s.total_accuracy <= 100));

                let ranks: Vec<u32> = board.standings.iter().map(|s| s.rank).collect();
                let expected: Vec<u32> = (1..=users.len() as u32).collect();
                assert_eq!(ranks, expected);

                let completed: usize = board
                    .standings
                    .iter()
                    .map(|s| s.quizzes_completed as usize)
                    .sum();
                assert!(completed <= pairs.len());
            }
        }
    }

    #[test]
    fn standing_lookup_by_user() {
        let attempts = vec![attempt("alice", "q1", "rust", 80.0, 9, 10, 30)];
        let board = compute(&attempts, &LeaderboardScope::Global);
        assert_eq!(board.standing_for("alice").map(|s| s.rank), Some(1));
        assert!(board.standing_for("nobody").is_none());
    }
}
