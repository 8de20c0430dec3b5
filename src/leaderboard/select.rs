// src/leaderboard/select.rs

use std::collections::{HashMap, hash_map::Entry};

use chrono::{DateTime, Utc};

use super::accuracy_percent;
use crate::models::attempt::{AttemptUser, QuizAttempt};

/// The attempt that counts for one (user, quiz) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct BestAttempt<'a> {
    pub score: f64,
    pub accuracy: u32,
    pub taken_at: DateTime<Utc>,
    pub user: &'a AttemptUser,
}

/// Best attempt per `(user_id, quiz_id)`.
pub type BestAttempts<'a> = HashMap<(&'a str, &'a str), BestAttempt<'a>>;

impl<'a> From<&'a QuizAttempt> for BestAttempt<'a> {
    fn from(attempt: &'a QuizAttempt) -> Self {
        BestAttempt {
            score: attempt.score,
            accuracy: accuracy_percent(attempt.correct_answers, attempt.total_questions),
            taken_at: attempt.taken_at,
            user: &attempt.user,
        }
    }
}

impl BestAttempt<'_> {
    /// Higher accuracy wins, then higher score, then the more recent attempt.
    /// A full tie keeps `other`.
    pub fn beats(&self, other: &BestAttempt<'_>) -> bool {
        if self.accuracy != other.accuracy {
            return self.accuracy > other.accuracy;
        }
        if self.score != other.score {
            return self.score > other.score;
        }
        self.taken_at > other.taken_at
    }
}

/// Reduces attempts to a single best result per (user, quiz) in one pass.
pub fn select_best<'a, I>(attempts: I) -> BestAttempts<'a>
where
    I: IntoIterator<Item = &'a QuizAttempt>,
{
    attempts.into_iter().fold(HashMap::new(), |mut best, attempt| {
        let candidate = BestAttempt::from(attempt);
        match best.entry((attempt.user_id.as_str(), attempt.quiz_id.as_str())) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
            }
            Entry::Occupied(mut slot) => {
                if candidate.beats(slot.get()) {
                    slot.insert(candidate);
                }
            }
        }
        best
    })
}
