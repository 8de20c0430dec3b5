// src/leaderboard/filter.rs

use crate::models::attempt::QuizAttempt;

/// Attempts restricted to a single category.
///
/// Only produced by `filter_by_category`, so an empty slice always means
/// "filter applied, nothing matched" and never "no filter".
#[derive(Debug, Clone)]
pub struct CategorySlice<'a> {
    pub category_id: String,
    pub attempts: Vec<&'a QuizAttempt>,
}

impl CategorySlice<'_> {
    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }
}

/// Keeps the attempts whose quiz belongs to `category_id`, preserving order.
pub fn filter_by_category<'a>(attempts: &'a [QuizAttempt], category_id: &str) -> CategorySlice<'a> {
    CategorySlice {
        category_id: category_id.to_string(),
        attempts: attempts
            .iter()
            .filter(|a| a.quiz.category_id == category_id)
            .collect(),
    }
}
