use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerLabel, AttemptAnswer, Quiz, QuizAttempt, SubscriptionTier, User},
        dto::{
            request::{AnswerInput, SubmitQuizAttemptInput},
            response::{PagedResponse, QuizAttemptDto},
        },
    },
    repositories::{QuizAttemptRepository, QuizRepository, UserRepository},
};

/// Grades a set of submitted answers against a quiz.
///
/// Every question must be answered exactly once and every answer must
/// reference a question on the quiz.
pub fn grade(quiz: &Quiz, answers: &[AnswerInput]) -> AppResult<(Vec<AttemptAnswer>, i64)> {
    let mut selected: HashMap<&str, AnswerLabel> = HashMap::with_capacity(answers.len());
    for answer in answers {
        if selected
            .insert(answer.question_id.as_str(), answer.selected)
            .is_some()
        {
            return Err(AppError::ValidationError(format!(
                "Question '{}' was answered more than once",
                answer.question_id
            )));
        }
    }

    if selected.len() != quiz.questions.len() {
        return Err(AppError::ValidationError(format!(
            "Expected {} answers, got {}",
            quiz.questions.len(),
            selected.len()
        )));
    }

    // Unknown ids are reported before any missing-answer complaint, so the
    // caller hears about the answer that could never match
    if let Some(answer) = answers
        .iter()
        .find(|a| !quiz.questions.iter().any(|q| q.id == a.question_id))
    {
        return Err(AppError::ValidationError(format!(
            "Question '{}' is not part of this quiz",
            answer.question_id
        )));
    }

    let mut graded = Vec::with_capacity(quiz.questions.len());
    let mut score = 0;

    for question in &quiz.questions {
        let chosen = selected.remove(question.id.as_str()).ok_or_else(|| {
            AppError::ValidationError(format!("Question '{}' was not answered", question.id))
        })?;

        let correct = chosen == question.correct;
        if correct {
            score += 1;
        }

        graded.push(AttemptAnswer {
            question_id: question.id.clone(),
            selected: chosen,
            correct,
        });
    }

    Ok((graded, score))
}

fn start_of_month(now: DateTime<Utc>) -> AppResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalError("Could not compute month start".to_string()))
}

pub struct QuizAttemptService {
    attempts: Arc<dyn QuizAttemptRepository>,
    quizzes: Arc<dyn QuizRepository>,
    users: Arc<dyn UserRepository>,
    free_tier_monthly_attempts: i64,
}

impl QuizAttemptService {
    pub fn new(
        attempts: Arc<dyn QuizAttemptRepository>,
        quizzes: Arc<dyn QuizRepository>,
        users: Arc<dyn UserRepository>,
        free_tier_monthly_attempts: i64,
    ) -> Self {
        Self {
            attempts,
            quizzes,
            users,
            free_tier_monthly_attempts,
        }
    }

    async fn enforce_quota(&self, user: &User, now: DateTime<Utc>) -> AppResult<()> {
        if user.tier == SubscriptionTier::Pro {
            return Ok(());
        }

        let month_start = start_of_month(now)?;
        let taken = self
            .attempts
            .count_for_user_since(&user.username, month_start)
            .await?;

        if taken >= self.free_tier_monthly_attempts {
            return Err(AppError::QuotaExceeded(format!(
                "Free accounts are limited to {} quiz attempts per month. Upgrade to Pro for unlimited attempts.",
                self.free_tier_monthly_attempts
            )));
        }

        Ok(())
    }

    pub async fn submit(
        &self,
        username: &str,
        input: SubmitQuizAttemptInput,
    ) -> AppResult<QuizAttemptDto> {
        input.validate()?;

        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })?;

        let quiz = self
            .quizzes
            .find_by_id(&input.quiz_id)
            .await?
            .filter(|quiz| quiz.published)
            .ok_or_else(|| {
                AppError::NotFound(format!("Quiz with id '{}' not found", input.quiz_id))
            })?;

        let now = Utc::now();
        self.enforce_quota(&user, now).await?;

        let (answers, score) = grade(&quiz, &input.answers)?;
        let total_questions = quiz.questions.len() as i64;

        let attempt_number = self
            .attempts
            .count_for_user_and_quiz(&user.username, &quiz.id)
            .await?
            + 1;

        // Points are only awarded on the first attempt at a quiz
        let points_earned = if attempt_number == 1 {
            score * quiz.points_per_question
        } else {
            0
        };

        let attempt = QuizAttempt {
            id: Uuid::new_v4().to_string(),
            user_id: user.username.clone(),
            quiz_id: quiz.id.clone(),
            answers,
            score,
            total_questions,
            points_earned,
            passed: QuizAttempt::is_passing(score, total_questions),
            attempt_number,
            submitted_at: now,
        };

        let created = self.attempts.create(attempt).await?;

        if points_earned > 0 {
            self.users.add_points(&user.username, points_earned).await?;
        }

        log::info!(
            "{} scored {}/{} on quiz {} (attempt {}, {} points)",
            user.username,
            created.score,
            created.total_questions,
            created.quiz_id,
            created.attempt_number,
            created.points_earned
        );

        Ok(created.into())
    }

    pub async fn get_attempt(&self, id: &str) -> AppResult<QuizAttempt> {
        self.attempts
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Attempt with id '{}' not found", id)))
    }

    pub async fn list_for_user(
        &self,
        username: &str,
        quiz_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<PagedResponse<QuizAttemptDto>> {
        let (attempts, total) = self
            .attempts
            .list_for_user(username, quiz_id, offset, limit)
            .await?;
        let items = attempts.into_iter().map(QuizAttemptDto::from).collect();
        Ok(PagedResponse::new(items, total, offset, limit))
    }
}
