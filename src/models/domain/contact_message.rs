use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, subject: &str, body: &str) -> Self {
        ContactMessage {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            read: false,
            created_at: Utc::now(),
        }
    }
}
