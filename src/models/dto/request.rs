use async_graphql::InputObject;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::quiz::AnswerLabel;
use crate::models::domain::user::{SubscriptionTier, UserRole};

static USERNAME_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 3, max = 50))]
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be alphanumeric with underscores"
    ))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    // Defaults to Reader; Admin cannot be self-assigned
    pub role: Option<UserRole>,

    #[validate(length(min = 1, max = 100))]
    pub school_name: Option<String>,

    #[validate(length(min = 3, max = 50))]
    pub parent_username: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub school_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTierRequest {
    pub tier: SubscriptionTier,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: String,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 100))]
    pub author: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1))]
    pub genre_id: String,

    #[validate(url)]
    pub cover_url: Option<String>,

    #[validate(range(min = 1, max = 10000))]
    pub page_count: i32,

    #[validate(range(min = 0, max = 2100))]
    pub published_year: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBookRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub author: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    pub genre_id: Option<String>,

    #[validate(url)]
    pub cover_url: Option<String>,

    #[validate(range(min = 1, max = 10000))]
    pub page_count: Option<i32>,

    #[validate(range(min = 0, max = 2100))]
    pub published_year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BookListParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,

    pub genre_id: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct QuizQuestionInput {
    #[validate(length(min = 1, max = 500))]
    pub prompt: String,

    // Exactly four option texts, labelled A through D in order
    #[validate(length(min = 4, max = 4, message = "A question needs exactly four options"))]
    pub options: Vec<String>,

    pub correct: AnswerLabel,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateQuizRequest {
    #[validate(length(min = 1))]
    pub book_id: String,

    #[validate(length(min = 1, max = 150))]
    pub title: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub points_per_question: Option<i64>,

    #[validate(nested)]
    pub questions: Vec<QuizQuestionInput>,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(range(min = 1, max = 100))]
    pub points_per_question: Option<i64>,

    #[validate(nested)]
    pub questions: Option<Vec<QuizQuestionInput>>,
}

// Serialize is needed so the length validator on the answers list can
// embed offending values in its error params
#[derive(Debug, Clone, Serialize, Deserialize, Validate, InputObject)]
pub struct AnswerInput {
    pub question_id: String,
    pub selected: AnswerLabel,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitQuizAttemptInput {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    #[validate(length(min = 1, message = "An attempt needs at least one answer"))]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 20000))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBlogPostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 20000))]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddCommentRequest {
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RatePostRequest {
    #[validate(range(min = 1, max = 5))]
    pub stars: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 200))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000))]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePartnerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url)]
    pub website_url: String,

    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePartnerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(url)]
    pub website_url: Option<String>,

    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    pub description: String,

    #[validate(length(min = 1, max = 500))]
    pub prize: String,

    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateChallengeRequest {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 500))]
    pub prize: Option<String>,

    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register_request() -> RegisterRequest {
        RegisterRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            username: "johndoe".to_string(),
            email: "john@example.com".to_string(),
            password: "a secure password".to_string(),
            role: Some(UserRole::Student),
            school_name: None,
            parent_username: None,
        }
    }

    #[test]
    fn test_valid_register_request() {
        assert!(valid_register_request().validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let mut request = valid_register_request();
        request.email = "invalid-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_username_too_short() {
        let mut request = valid_register_request();
        request.username = "ab".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_username_rejects_special_characters() {
        let mut request = valid_register_request();
        request.username = "john doe!".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_password_too_short() {
        let mut request = valid_register_request();
        request.password = "short".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_question_input_requires_four_options() {
        let question = QuizQuestionInput {
            prompt: "Who wrote Matilda?".to_string(),
            options: vec!["Roald Dahl".to_string(), "Enid Blyton".to_string()],
            correct: AnswerLabel::A,
        };
        assert!(question.validate().is_err());
    }

    #[test]
    fn test_attempt_needs_at_least_one_answer() {
        let empty = SubmitQuizAttemptInput {
            quiz_id: "quiz-1".to_string(),
            answers: vec![],
        };
        assert!(empty.validate().is_err());

        let with_answer = SubmitQuizAttemptInput {
            quiz_id: "quiz-1".to_string(),
            answers: vec![AnswerInput {
                question_id: "q-1".to_string(),
                selected: AnswerLabel::B,
            }],
        };
        assert!(with_answer.validate().is_ok());
    }

    #[test]
    fn test_rating_stars_out_of_range() {
        assert!(RatePostRequest { stars: 0 }.validate().is_err());
        assert!(RatePostRequest { stars: 6 }.validate().is_err());
        assert!(RatePostRequest { stars: 5 }.validate().is_ok());
    }

    #[test]
    fn test_pagination_defaults_and_clamp() {
        let params = PaginationParams {
            offset: None,
            limit: Some(500),
        };
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 100);
    }
}
