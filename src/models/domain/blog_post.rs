use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogComment {
    pub id: String,
    pub username: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl BlogComment {
    pub fn new(username: &str, body: &str) -> Self {
        BlogComment {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            body: body.to_string(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogRating {
    pub username: String,
    pub stars: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub author_username: String,
    pub comments: Vec<BlogComment>,
    pub ratings: Vec<BlogRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    pub fn new(title: &str, body: &str, author_username: &str) -> Self {
        BlogPost {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            body: body.to_string(),
            author_username: author_username.to_string(),
            comments: Vec::new(),
            ratings: Vec::new(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    /// Average star rating rounded to two decimals, None when unrated.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }
        let sum: i32 = self.ratings.iter().map(|r| r.stars).sum();
        let avg = sum as f64 / self.ratings.len() as f64;
        Some((avg * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rating_empty() {
        let post = BlogPost::new("Title", "Body", "admin");
        assert_eq!(post.average_rating(), None);
    }

    #[test]
    fn test_average_rating_rounding() {
        let mut post = BlogPost::new("Title", "Body", "admin");
        post.ratings = vec![
            BlogRating {
                username: "a".to_string(),
                stars: 5,
            },
            BlogRating {
                username: "b".to_string(),
                stars: 4,
            },
            BlogRating {
                username: "c".to_string(),
                stars: 4,
            },
        ];

        assert_eq!(post.average_rating(), Some(4.33));
    }
}
