use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, SimpleObject)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub genre_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub page_count: i32,
    pub published_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn new(
        title: &str,
        author: &str,
        genre_id: &str,
        page_count: i32,
        published_year: i32,
    ) -> Self {
        Book {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            author: author.to_string(),
            description: None,
            genre_id: genre_id.to_string(),
            cover_url: None,
            page_count,
            published_year,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}
