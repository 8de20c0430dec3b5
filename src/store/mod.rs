// src/store/mod.rs

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppError,
    leaderboard::LeaderboardScope,
    models::attempt::{NewAttempt, QuizAttempt},
};

pub use memory::InMemoryAttemptStore;
pub use postgres::PgAttemptStore;

/// Optional predicate a store may push down into its query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptFilter {
    pub category_id: Option<String>,
}

impl From<&LeaderboardScope> for AttemptFilter {
    fn from(scope: &LeaderboardScope) -> Self {
        AttemptFilter {
            category_id: scope.category_id().map(str::to_string),
        }
    }
}

/// Source of quiz attempts.
///
/// Implementations return attempts most recent first (`taken_at` descending).
#[async_trait]
pub trait AttemptStore: Send + Sync {
    async fn fetch_attempts(&self, filter: &AttemptFilter) -> Result<Vec<QuizAttempt>, AppError>;

    /// Display name of a category, if it exists.
    async fn category_name(&self, category_id: &str) -> Result<Option<String>, AppError>;

    /// Appends a new attempt stamped with the current time.
    async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt, AppError>;
}

pub type SharedStore = Arc<dyn AttemptStore>;
