use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerLabel, Quiz, QuizOption, QuizQuestion},
        dto::{
            request::{CreateQuizRequest, QuizQuestionInput, UpdateQuizRequest},
            response::{DeleteResponse, PagedResponse, QuizForTakingDto, QuizSummaryDto},
        },
    },
    repositories::{BookRepository, QuizRepository},
};

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    books: Arc<dyn BookRepository>,
}

fn build_question(input: &QuizQuestionInput) -> QuizQuestion {
    let options = AnswerLabel::all()
        .into_iter()
        .zip(input.options.iter())
        .map(|(label, text)| QuizOption {
            label,
            text: text.clone(),
        })
        .collect();

    QuizQuestion {
        id: Uuid::new_v4().to_string(),
        prompt: input.prompt.clone(),
        options,
        correct: input.correct,
    }
}

impl QuizService {
    pub fn new(quizzes: Arc<dyn QuizRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self { quizzes, books }
    }

    /// Published quizzes only, optionally restricted to one book.
    pub async fn list_published(
        &self,
        book_id: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> AppResult<PagedResponse<QuizSummaryDto>> {
        let (quizzes, total) = self.quizzes.list_published(book_id, offset, limit).await?;
        let items = quizzes.iter().map(QuizSummaryDto::from).collect();
        Ok(PagedResponse::new(items, total, offset, limit))
    }

    /// The answer-stripped view a student sees while taking a quiz.
    pub async fn get_for_taking(&self, id: &str) -> AppResult<QuizForTakingDto> {
        let quiz = self.get_quiz_record(id).await?;

        if !quiz.published {
            return Err(AppError::NotFound(format!(
                "Quiz with id '{}' not found",
                id
            )));
        }

        Ok(quiz.into())
    }

    pub async fn get_quiz_record(&self, id: &str) -> AppResult<Quiz> {
        self.quizzes
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Quiz with id '{}' not found", id)))
    }

    pub async fn create_quiz(
        &self,
        created_by_username: &str,
        request: CreateQuizRequest,
    ) -> AppResult<Quiz> {
        request.validate()?;

        if self.books.find_by_id(&request.book_id).await?.is_none() {
            return Err(AppError::ValidationError(format!(
                "Book with id '{}' does not exist",
                request.book_id
            )));
        }

        let questions = request.questions.iter().map(build_question).collect();

        let mut quiz = Quiz::new(
            &request.book_id,
            &request.title,
            created_by_username,
            request.points_per_question.unwrap_or(1),
            questions,
        );
        quiz.description = request.description;

        let created = self.quizzes.create(quiz).await?;
        log::info!(
            "Quiz '{}' created for book {} by {}",
            created.title,
            created.book_id,
            created.created_by_username
        );

        Ok(created)
    }

    pub async fn update_quiz(&self, id: &str, request: UpdateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let mut quiz = self.get_quiz_record(id).await?;

        if let Some(title) = request.title {
            quiz.title = title;
        }
        if let Some(description) = request.description {
            quiz.description = Some(description);
        }
        if let Some(points_per_question) = request.points_per_question {
            quiz.points_per_question = points_per_question;
        }
        if let Some(questions) = &request.questions {
            // A published quiz must keep at least one question
            if questions.is_empty() {
                return Err(AppError::BadRequest(
                    "A quiz needs at least one question".to_string(),
                ));
            }
            quiz.questions = questions.iter().map(build_question).collect();
        }
        quiz.modified_at = Some(Utc::now());

        self.quizzes.update(quiz).await
    }

    pub async fn publish_quiz(&self, id: &str) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz_record(id).await?;

        if quiz.questions.is_empty() {
            return Err(AppError::BadRequest(
                "A quiz needs at least one question before it can be published".to_string(),
            ));
        }

        if quiz.published {
            return Ok(quiz);
        }

        quiz.published = true;
        quiz.modified_at = Some(Utc::now());
        let updated = self.quizzes.update(quiz).await?;
        log::info!("Quiz {} published", updated.id);

        Ok(updated)
    }

    pub async fn unpublish_quiz(&self, id: &str) -> AppResult<Quiz> {
        let mut quiz = self.get_quiz_record(id).await?;

        if !quiz.published {
            return Ok(quiz);
        }

        quiz.published = false;
        quiz.modified_at = Some(Utc::now());
        self.quizzes.update(quiz).await
    }

    pub async fn delete_quiz(&self, id: &str) -> AppResult<DeleteResponse> {
        self.quizzes.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Quiz '{}' deleted", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Book;
    use crate::repositories::{
        book_repository::MockBookRepository, quiz_repository::MockQuizRepository,
    };

    fn question_input(prompt: &str) -> QuizQuestionInput {
        QuizQuestionInput {
            prompt: prompt.to_string(),
            options: vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
                "fourth".to_string(),
            ],
            correct: AnswerLabel::B,
        }
    }

    fn create_request(questions: Vec<QuizQuestionInput>) -> CreateQuizRequest {
        CreateQuizRequest {
            book_id: "book-1".to_string(),
            title: "Chapter quiz".to_string(),
            description: None,
            points_per_question: Some(5),
            questions,
        }
    }

    #[tokio::test]
    async fn create_quiz_labels_options_in_order() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_create().returning(Ok);
        let mut books = MockBookRepository::new();
        books
            .expect_find_by_id()
            .returning(|_| Ok(Some(Book::new("Matilda", "Roald Dahl", "genre-1", 240, 1988))));

        let service = QuizService::new(Arc::new(quizzes), Arc::new(books));
        let quiz = service
            .create_quiz("teacher1", create_request(vec![question_input("Q1")]))
            .await
            .unwrap();

        assert!(!quiz.published);
        assert_eq!(quiz.questions.len(), 1);
        let labels: Vec<AnswerLabel> = quiz.questions[0].options.iter().map(|o| o.label).collect();
        assert_eq!(labels, AnswerLabel::all().to_vec());
        assert_eq!(quiz.questions[0].options[1].text, "second");
        assert_eq!(quiz.total_points(), 5);
    }

    #[tokio::test]
    async fn create_quiz_rejects_unknown_book() {
        let quizzes = MockQuizRepository::new();
        let mut books = MockBookRepository::new();
        books.expect_find_by_id().returning(|_| Ok(None));

        let service = QuizService::new(Arc::new(quizzes), Arc::new(books));
        let result = service
            .create_quiz("teacher1", create_request(vec![question_input("Q1")]))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn list_published_passes_the_book_filter_through() {
        let mut quizzes = MockQuizRepository::new();
        quizzes
            .expect_list_published()
            .returning(|book_id, _, _| {
                assert_eq!(book_id, Some("book-1"));
                Ok((vec![], 0))
            });
        let books = MockBookRepository::new();

        let service = QuizService::new(Arc::new(quizzes), Arc::new(books));
        let page = service.list_published(Some("book-1"), 0, 10).await.unwrap();

        assert_eq!(page.total, 0);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn update_cannot_strip_a_quiz_of_its_questions() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| {
            let question = QuizQuestion::new("Q1", ["a", "b", "c", "d"], AnswerLabel::A);
            let mut quiz = Quiz::new("book-1", "Chapter quiz", "teacher1", 1, vec![question]);
            quiz.published = true;
            Ok(Some(quiz))
        });
        quizzes.expect_update().times(0);
        let books = MockBookRepository::new();

        let service = QuizService::new(Arc::new(quizzes), Arc::new(books));
        let request = UpdateQuizRequest {
            title: None,
            description: None,
            points_per_question: None,
            questions: Some(vec![]),
        };
        let result = service.update_quiz("quiz-1", request).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn publish_requires_at_least_one_question() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| {
            Ok(Some(Quiz::new("book-1", "Empty quiz", "teacher1", 1, vec![])))
        });
        let books = MockBookRepository::new();

        let service = QuizService::new(Arc::new(quizzes), Arc::new(books));
        let result = service.publish_quiz("quiz-1").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn unpublished_quiz_is_hidden_from_taking_view() {
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_find_by_id().returning(|_| {
            let question = QuizQuestion::new("Q1", ["a", "b", "c", "d"], AnswerLabel::A);
            Ok(Some(Quiz::new(
                "book-1",
                "Draft quiz",
                "teacher1",
                1,
                vec![question],
            )))
        });
        let books = MockBookRepository::new();

        let service = QuizService::new(Arc::new(quizzes), Arc::new(books));
        let result = service.get_for_taking("quiz-1").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
