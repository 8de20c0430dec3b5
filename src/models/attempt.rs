// src/models/attempt.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Snapshot of the user who made an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptUser {
    pub id: String,
    pub name: String,
    pub picture: Option<String>,
    /// Identity provider the account signed in with (e.g. "google").
    pub provider: Option<String>,
}

/// The quiz an attempt was made on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptQuiz {
    pub id: String,
    pub title: String,
    pub category_id: String,
}

/// One completed quiz submission. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub user_id: String,
    pub quiz_id: String,
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub taken_at: DateTime<Utc>,
    pub user: AttemptUser,
    pub quiz: AttemptQuiz,
}

/// Raw row as returned by the attempts query.
///
/// Everything the database allows to be NULL is optional here; conversion into
/// `QuizAttempt` is the single place where missing values get their defaults.
#[derive(Debug, Clone, FromRow)]
pub struct AttemptRow {
    pub user_id: String,
    pub quiz_id: String,
    pub score: Option<f64>,
    pub correct_answers: Option<i32>,
    pub total_questions: Option<i32>,
    pub taken_at: DateTime<Utc>,
    pub user_name: Option<String>,
    pub user_picture: Option<String>,
    pub user_provider: Option<String>,
    pub quiz_title: Option<String>,
    pub quiz_category_id: String,
}

impl From<AttemptRow> for QuizAttempt {
    fn from(row: AttemptRow) -> Self {
        QuizAttempt {
            score: row.score.filter(|s| s.is_finite()).unwrap_or(0.0),
            correct_answers: non_negative(row.correct_answers),
            total_questions: non_negative(row.total_questions),
            taken_at: row.taken_at,
            user: AttemptUser {
                id: row.user_id.clone(),
                name: row.user_name.unwrap_or_default(),
                picture: row.user_picture,
                provider: row.user_provider,
            },
            quiz: AttemptQuiz {
                id: row.quiz_id.clone(),
                title: row.quiz_title.unwrap_or_default(),
                category_id: row.quiz_category_id,
            },
            user_id: row.user_id,
            quiz_id: row.quiz_id,
        }
    }
}

fn non_negative(value: Option<i32>) -> u32 {
    value.and_then(|v| u32::try_from(v).ok()).unwrap_or(0)
}

/// An attempt about to be appended to the store.
#[derive(Debug, Clone)]
pub struct NewAttempt {
    pub user_id: String,
    pub quiz_id: String,
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
}

/// DTO for submitting a graded quiz attempt.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttemptRequest {
    #[validate(length(min = 1, max = 64))]
    pub quiz_id: String,
    #[validate(range(min = 0.0))]
    pub score: f64,
    pub correct_answers: u32,
    #[validate(range(min = 1))]
    pub total_questions: u32,
}

impl SubmitAttemptRequest {
    pub fn into_new_attempt(self, user_id: String) -> NewAttempt {
        NewAttempt {
            user_id,
            quiz_id: self.quiz_id,
            score: self.score,
            correct_answers: self.correct_answers,
            total_questions: self.total_questions,
        }
    }
}
