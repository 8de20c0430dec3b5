// src/store/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AttemptFilter, AttemptStore};
use crate::{
    error::AppError,
    models::attempt::{AttemptRow, NewAttempt, QuizAttempt},
};

const ATTEMPT_COLUMNS: &str = r#"
    SELECT
        a.user_id,
        a.quiz_id,
        a.score::FLOAT8 AS score,
        a.correct_answers,
        a.total_questions,
        a.taken_at,
        u.name AS user_name,
        u.picture AS user_picture,
        u.provider AS user_provider,
        q.title AS quiz_title,
        q.category_id AS quiz_category_id
    FROM quiz_attempts a
    JOIN users u ON u.id = a.user_id
    JOIN quizzes q ON q.id = a.quiz_id
"#;

/// Attempt store backed by Postgres.
#[derive(Clone)]
pub struct PgAttemptStore {
    pool: PgPool,
}

impl PgAttemptStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttemptStore for PgAttemptStore {
    async fn fetch_attempts(&self, filter: &AttemptFilter) -> Result<Vec<QuizAttempt>, AppError> {
        let query = format!(
            "{ATTEMPT_COLUMNS} WHERE ($1::TEXT IS NULL OR q.category_id = $1) \
             ORDER BY a.taken_at DESC, a.id DESC"
        );
        let rows = sqlx::query_as::<_, AttemptRow>(&query)
            .bind(filter.category_id.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch quiz attempts: {:?}", e);
                AppError::from(e)
            })?;

        Ok(rows.into_iter().map(QuizAttempt::from).collect())
    }

    async fn category_name(&self, category_id: &str) -> Result<Option<String>, AppError> {
        let name = sqlx::query_scalar::<_, String>("SELECT name FROM categories WHERE id = $1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(name)
    }

    async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt, AppError> {
        let mut tx = self.pool.begin().await?;

        let user_exists = sqlx::query_scalar::<_, String>("SELECT id FROM users WHERE id = $1")
            .bind(&attempt.user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if user_exists.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let quiz_exists = sqlx::query_scalar::<_, String>("SELECT id FROM quizzes WHERE id = $1")
            .bind(&attempt.quiz_id)
            .fetch_optional(&mut *tx)
            .await?;
        if quiz_exists.is_none() {
            return Err(AppError::NotFound("Quiz not found".to_string()));
        }

        let correct_answers = i32::try_from(attempt.correct_answers)
            .map_err(|_| AppError::BadRequest("correctAnswers out of range".to_string()))?;
        let total_questions = i32::try_from(attempt.total_questions)
            .map_err(|_| AppError::BadRequest("totalQuestions out of range".to_string()))?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO quiz_attempts (user_id, quiz_id, score, correct_answers, total_questions)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&attempt.user_id)
        .bind(&attempt.quiz_id)
        .bind(attempt.score)
        .bind(correct_answers)
        .bind(total_questions)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert quiz attempt: {:?}", e);
            AppError::from(e)
        })?;

        let query = format!("{ATTEMPT_COLUMNS} WHERE a.id = $1");
        let row = sqlx::query_as::<_, AttemptRow>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(QuizAttempt::from(row))
    }
}
