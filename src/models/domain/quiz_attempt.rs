use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz::AnswerLabel;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct AttemptAnswer {
    pub question_id: String,
    pub selected: AnswerLabel,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizAttempt {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub answers: Vec<AttemptAnswer>,
    pub score: i64,
    pub total_questions: i64,
    pub points_earned: i64,
    pub passed: bool,
    pub attempt_number: i64,
    // Stored as a native BSON datetime so range queries compare as dates,
    // not as RFC 3339 strings of varying precision
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub submitted_at: DateTime<Utc>,
}

impl QuizAttempt {
    /// An attempt counts as passed when at least half the answers are correct.
    pub fn is_passing(score: i64, total_questions: i64) -> bool {
        score * 2 >= total_questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_attempt(score: i64, total: i64, points_earned: i64) -> QuizAttempt {
        QuizAttempt {
            id: "attempt-1".to_string(),
            user_id: "student1".to_string(),
            quiz_id: "quiz-1".to_string(),
            answers: vec![AttemptAnswer {
                question_id: "q-1".to_string(),
                selected: AnswerLabel::B,
                correct: score > 0,
            }],
            score,
            total_questions: total,
            points_earned,
            passed: QuizAttempt::is_passing(score, total),
            attempt_number: 1,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn attempt_serialization_preserves_scoring_fields() {
        let attempt = make_attempt(4, 5, 4);

        let doc = mongodb::bson::to_document(&attempt).expect("attempt should serialize");
        let parsed: QuizAttempt =
            mongodb::bson::from_document(doc).expect("attempt should deserialize");

        assert_eq!(parsed.score, 4);
        assert_eq!(parsed.points_earned, 4);
        assert!(parsed.passed);
        assert_eq!(parsed.answers[0].selected, AnswerLabel::B);
    }

    #[test]
    fn submitted_at_is_stored_as_a_bson_datetime() {
        let attempt = make_attempt(2, 4, 0);

        let doc = mongodb::bson::to_document(&attempt).expect("attempt should serialize");

        assert!(matches!(
            doc.get("submitted_at"),
            Some(mongodb::bson::Bson::DateTime(_))
        ));
    }

    #[test]
    fn passing_threshold_is_half_of_questions() {
        assert!(QuizAttempt::is_passing(3, 5));
        assert!(QuizAttempt::is_passing(2, 4));
        assert!(!QuizAttempt::is_passing(1, 5));
        assert!(!QuizAttempt::is_passing(0, 1));
    }
}
