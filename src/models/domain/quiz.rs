use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const OPTIONS_PER_QUESTION: usize = 4;

/// One of the four answer slots of a multiple-choice question.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Enum, Copy)]
pub enum AnswerLabel {
    A,
    B,
    C,
    D,
}

impl AnswerLabel {
    pub fn all() -> [AnswerLabel; OPTIONS_PER_QUESTION] {
        [AnswerLabel::A, AnswerLabel::B, AnswerLabel::C, AnswerLabel::D]
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct QuizOption {
    pub label: AnswerLabel,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    pub id: String,
    pub prompt: String,
    pub options: Vec<QuizOption>,
    pub correct: AnswerLabel,
}

impl QuizQuestion {
    pub fn new(prompt: &str, option_texts: [&str; OPTIONS_PER_QUESTION], correct: AnswerLabel) -> Self {
        let options = AnswerLabel::all()
            .into_iter()
            .zip(option_texts)
            .map(|(label, text)| QuizOption {
                label,
                text: text.to_string(),
            })
            .collect();

        QuizQuestion {
            id: Uuid::new_v4().to_string(),
            prompt: prompt.to_string(),
            options,
            correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: String,
    pub book_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<QuizQuestion>,
    pub points_per_question: i64,
    pub published: bool,
    pub created_by_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(
        book_id: &str,
        title: &str,
        created_by_username: &str,
        points_per_question: i64,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.to_string(),
            title: title.to_string(),
            description: None,
            questions,
            points_per_question,
            published: false,
            created_by_username: created_by_username.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn total_points(&self) -> i64 {
        self.questions.len() as i64 * self.points_per_question
    }
}
