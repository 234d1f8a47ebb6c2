use async_graphql::{OutputType, SimpleObject};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{
    AttemptAnswer, BlogComment, BlogPost, Quiz, QuizAttempt, QuizOption, SubscriptionTier, User,
    UserRole,
};

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct UserDto {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub tier: SubscriptionTier,
    pub points: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    #[graphql(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            full_name: user.full_name(),
            username: user.username,
            email: user.email,
            role: user.role,
            tier: user.tier,
            points: user.points,
            school_name: user.school_name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, SimpleObject)]
#[graphql(concrete(name = "UserApiResponse", params(UserDto)))]
pub struct ApiResponse<T: OutputType> {
    pub data: T,
    pub message: String,
}

pub type UpdateUserResponse = ApiResponse<UserDto>;

#[derive(Debug, Serialize, SimpleObject)]
pub struct DeleteResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, offset: i64, limit: i64) -> Self {
        Self {
            items,
            total,
            offset,
            limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizSummaryDto {
    pub id: String,
    pub book_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub question_count: i64,
    pub points_per_question: i64,
    pub total_points: i64,
}

impl From<&Quiz> for QuizSummaryDto {
    fn from(quiz: &Quiz) -> Self {
        QuizSummaryDto {
            id: quiz.id.clone(),
            book_id: quiz.book_id.clone(),
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            question_count: quiz.questions.len() as i64,
            points_per_question: quiz.points_per_question,
            total_points: quiz.total_points(),
        }
    }
}

/// A question as shown to a quiz taker: the correct label is stripped.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuestionForTakingDto {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuizOption>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizForTakingDto {
    pub id: String,
    pub book_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub points_per_question: i64,
    pub questions: Vec<QuestionForTakingDto>,
}

impl From<Quiz> for QuizForTakingDto {
    fn from(quiz: Quiz) -> Self {
        QuizForTakingDto {
            id: quiz.id,
            book_id: quiz.book_id,
            title: quiz.title,
            description: quiz.description,
            points_per_question: quiz.points_per_question,
            questions: quiz
                .questions
                .into_iter()
                .map(|q| QuestionForTakingDto {
                    id: q.id,
                    prompt: q.prompt,
                    options: q.options,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct QuizAttemptDto {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: i64,
    pub total_questions: i64,
    pub points_earned: i64,
    pub passed: bool,
    pub attempt_number: i64,
    pub submitted_at: DateTime<Utc>,
    pub answers: Vec<AttemptAnswer>,
}

impl From<QuizAttempt> for QuizAttemptDto {
    fn from(attempt: QuizAttempt) -> Self {
        QuizAttemptDto {
            id: attempt.id,
            quiz_id: attempt.quiz_id,
            user_id: attempt.user_id,
            score: attempt.score,
            total_questions: attempt.total_questions,
            points_earned: attempt.points_earned,
            passed: attempt.passed,
            attempt_number: attempt.attempt_number,
            submitted_at: attempt.submitted_at,
            answers: attempt.answers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BlogPostDto {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_username: String,
    pub comments: Vec<BlogComment>,
    pub rating_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<BlogPost> for BlogPostDto {
    fn from(post: BlogPost) -> Self {
        let average_rating = post.average_rating();
        BlogPostDto {
            id: post.id,
            title: post.title,
            body: post.body,
            author_username: post.author_username,
            comments: post.comments,
            rating_count: post.ratings.len() as i64,
            average_rating,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub username: String,
    pub full_name: String,
    pub points: i64,
}

#[derive(Debug, Serialize)]
pub struct StudentSummary {
    pub username: String,
    pub full_name: String,
    pub points: i64,
    pub attempts_taken: i64,
}

#[derive(Debug, Serialize)]
pub struct StudentDashboard {
    pub username: String,
    pub points: i64,
    pub rank: i64,
    pub attempts_taken: i64,
    pub quizzes_passed_first_try: i64,
    pub recent_attempts: Vec<QuizAttemptDto>,
}

#[derive(Debug, Serialize)]
pub struct FamilyDashboard {
    pub children: Vec<StudentSummary>,
}

#[derive(Debug, Serialize)]
pub struct SchoolDashboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_name: Option<String>,
    pub students: Vec<StudentSummary>,
}

#[derive(Debug, Serialize)]
pub struct AdminDashboard {
    pub total_users: i64,
    pub total_books: i64,
    pub total_quizzes: i64,
    pub total_attempts: i64,
    pub unread_contact_messages: i64,
    pub top_readers: Vec<LeaderboardEntry>,
}

/// Role-specific dashboard payload, tagged so the client can pick the view.
#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Dashboard {
    Student(StudentDashboard),
    Family(FamilyDashboard),
    School(SchoolDashboard),
    Admin(AdminDashboard),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::quiz::{AnswerLabel, QuizQuestion};

    #[test]
    fn test_user_dto_full_name() {
        let user = User::test_user("johndoe", UserRole::Student);
        let dto: UserDto = user.into();

        assert_eq!(dto.full_name, "Test User");
        assert_eq!(dto.username, "johndoe");
        assert_eq!(dto.points, 0);
    }

    #[test]
    fn test_quiz_for_taking_strips_correct_labels() {
        let quiz = Quiz::new(
            "book-1",
            "Chapter quiz",
            "teacher1",
            1,
            vec![QuizQuestion::new(
                "Q1",
                ["a", "b", "c", "d"],
                AnswerLabel::C,
            )],
        );

        let dto = QuizForTakingDto::from(quiz);
        let json = serde_json::to_string(&dto).unwrap();

        assert!(!json.contains("\"correct\""));
        assert_eq!(dto.questions.len(), 1);
        assert_eq!(dto.questions[0].options.len(), 4);
    }

    #[test]
    fn test_dashboard_is_tagged_with_view() {
        let dashboard = Dashboard::Family(FamilyDashboard { children: vec![] });
        let json = serde_json::to_value(&dashboard).unwrap();

        assert_eq!(json["view"], "family");
    }
}
