// src/handlers/leaderboard.rs

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::{
    error::AppError,
    leaderboard::{self, Leaderboard, LeaderboardScope},
    models::leaderboard::{CategorySummary, LeaderboardEntry, LeaderboardResponse},
    store::{AttemptFilter, SharedStore},
    utils::jwt::Claims,
};

const NO_RESULTS_MESSAGE: &str = "No results found for this category";

/// Query parameters for leaderboard requests.
#[derive(Debug, Deserialize, Validate)]
pub struct LeaderboardParams {
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
}

/// Fetches the attempt snapshot for `scope` and ranks it.
///
/// Also resolves the category label when the scope is a category.
async fn load_leaderboard(
    store: &SharedStore,
    scope: LeaderboardScope,
) -> Result<(Leaderboard, Option<CategorySummary>), AppError> {
    let attempts = store.fetch_attempts(&AttemptFilter::from(&scope)).await?;
    let board = leaderboard::compute(&attempts, &scope);

    let category = match scope.category_id() {
        Some(id) => {
            let name = store
                .category_name(id)
                .await?
                .unwrap_or_else(|| id.to_string());
            Some(CategorySummary {
                id: id.to_string(),
                name,
            })
        }
        None => None,
    };

    Ok((board, category))
}

/// Returns the ranked leaderboard, globally or for one category.
///
/// An empty category is not an error: the list is empty and
/// `noResultsForCategory` is set.
pub async fn get_leaderboard(
    State(store): State<SharedStore>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let (board, category) = load_leaderboard(&store, params.category.into()).await?;
    let no_results_for_category = board.has_no_results_for_category();
    let label = category.as_ref().map(|c| c.name.clone());

    let leaderboard = board
        .standings
        .into_iter()
        .map(|s| LeaderboardEntry::from_standing(s, label.clone()))
        .collect();

    Ok(Json(LeaderboardResponse {
        leaderboard,
        category,
        no_results_for_category,
        message: no_results_for_category.then(|| NO_RESULTS_MESSAGE.to_string()),
    }))
}

/// Returns the caller's own leaderboard entry.
pub async fn get_my_standing(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let (board, category) = load_leaderboard(&store, params.category.into()).await?;

    let standing = board
        .standing_for(&claims.sub)
        .cloned()
        .ok_or(AppError::NotFound("No attempts recorded".to_string()))?;

    Ok(Json(LeaderboardEntry::from_standing(
        standing,
        category.map(|c| c.name),
    )))
}
