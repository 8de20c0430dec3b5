// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{AttemptFilter, AttemptStore};
use crate::{
    error::AppError,
    models::attempt::{AttemptQuiz, AttemptUser, NewAttempt, QuizAttempt},
};

#[derive(Debug, Default)]
struct Inner {
    categories: HashMap<String, String>,
    users: HashMap<String, AttemptUser>,
    quizzes: HashMap<String, AttemptQuiz>,
    attempts: Vec<QuizAttempt>,
}

/// Attempt store held entirely in memory.
///
/// Seeded through the `with_*` builders; used by tests and local demos.
#[derive(Debug, Default)]
pub struct InMemoryAttemptStore {
    inner: RwLock<Inner>,
}

impl InMemoryAttemptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.inner.get_mut().categories.insert(id.into(), name.into());
        self
    }

    pub fn with_user(mut self, user: AttemptUser) -> Self {
        self.inner.get_mut().users.insert(user.id.clone(), user);
        self
    }

    pub fn with_quiz(mut self, quiz: AttemptQuiz) -> Self {
        self.inner.get_mut().quizzes.insert(quiz.id.clone(), quiz);
        self
    }

    /// Seeds a historical attempt as-is, timestamp included.
    pub fn with_attempt(mut self, attempt: QuizAttempt) -> Self {
        self.inner.get_mut().attempts.push(attempt);
        self
    }
}

#[async_trait]
impl AttemptStore for InMemoryAttemptStore {
    async fn fetch_attempts(&self, filter: &AttemptFilter) -> Result<Vec<QuizAttempt>, AppError> {
        let inner = self.inner.read().await;

        // Later insertions come first among equal timestamps.
        let mut attempts: Vec<QuizAttempt> = inner
            .attempts
            .iter()
            .rev()
            .filter(|a| {
                filter
                    .category_id
                    .as_deref()
                    .is_none_or(|id| a.quiz.category_id == id)
            })
            .cloned()
            .collect();
        attempts.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));

        Ok(attempts)
    }

    async fn category_name(&self, category_id: &str) -> Result<Option<String>, AppError> {
        Ok(self.inner.read().await.categories.get(category_id).cloned())
    }

    async fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt, AppError> {
        let mut inner = self.inner.write().await;

        let user = inner
            .users
            .get(&attempt.user_id)
            .cloned()
            .ok_or(AppError::NotFound("User not found".to_string()))?;
        let quiz = inner
            .quizzes
            .get(&attempt.quiz_id)
            .cloned()
            .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

        let recorded = QuizAttempt {
            user_id: attempt.user_id,
            quiz_id: attempt.quiz_id,
            score: attempt.score,
            correct_answers: attempt.correct_answers,
            total_questions: attempt.total_questions,
            taken_at: Utc::now(),
            user,
            quiz,
        };
        inner.attempts.push(recorded.clone());

        Ok(recorded)
    }
}
