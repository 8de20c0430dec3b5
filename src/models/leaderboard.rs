// src/models/leaderboard.rs

use serde::Serialize;

/// A user's totals across all of their best attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedStanding {
    pub user_id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub provider: Option<String>,
    pub total_score: i64,
    /// Average best-attempt accuracy, always within 0..=100.
    pub total_accuracy: u32,
    pub quizzes_completed: u32,
    /// 1-based position; 0 until the standing has been ranked.
    pub rank: u32,
}

/// One leaderboard row as returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub username: String,
    pub picture: Option<String>,
    pub provider: Option<String>,
    pub score: i64,
    pub accuracy: u32,
    pub quizzes_taken: u32,
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl LeaderboardEntry {
    pub fn from_standing(standing: AggregatedStanding, category: Option<String>) -> Self {
        Self {
            id: standing.user_id,
            username: standing.display_name,
            picture: standing.avatar_url,
            provider: standing.provider,
            score: standing.total_score,
            accuracy: standing.total_accuracy,
            quizzes_taken: standing.quizzes_completed,
            rank: standing.rank,
            category,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySummary {
    pub id: String,
    pub name: String,
}

/// Response envelope for the leaderboard endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
    pub category: Option<CategorySummary>,
    /// Set only when a category filter was applied and nothing matched it.
    pub no_results_for_category: bool,
    pub message: Option<String>,
}
