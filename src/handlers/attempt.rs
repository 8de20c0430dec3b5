// src/handlers/attempt.rs

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    error::AppError, models::attempt::SubmitAttemptRequest, store::SharedStore,
    utils::jwt::Claims,
};

/// Records a graded quiz attempt for the authenticated user.
///
/// Attempts are append-only; retakes add a new record and the leaderboard
/// picks the best one per quiz.
pub async fn submit_attempt(
    State(store): State<SharedStore>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.correct_answers > payload.total_questions {
        return Err(AppError::BadRequest(
            "correctAnswers cannot exceed totalQuestions".to_string(),
        ));
    }

    let recorded = store
        .record_attempt(payload.into_new_attempt(claims.sub))
        .await?;

    tracing::info!(
        user_id = %recorded.user_id,
        quiz_id = %recorded.quiz_id,
        "quiz attempt recorded"
    );

    Ok((StatusCode::CREATED, Json(recorded)))
}
