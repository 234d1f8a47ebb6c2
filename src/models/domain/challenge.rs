use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A time-boxed reading promotion with a prize, managed by admins.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub prize: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Challenge {
    pub fn new(
        title: &str,
        description: &str,
        prize: &str,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Challenge {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            prize: prize.to_string(),
            starts_at,
            ends_at,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.starts_at <= now && now < self.ends_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_is_active_within_window() {
        let now = Utc::now();
        let challenge = Challenge::new(
            "Summer reading",
            "Read five books",
            "Book voucher",
            now - Duration::days(1),
            now + Duration::days(1),
        );

        assert!(challenge.is_active(now));
        assert!(!challenge.is_active(now + Duration::days(2)));
        assert!(!challenge.is_active(now - Duration::days(2)));
    }

    #[test]
    fn test_end_boundary_is_exclusive() {
        let now = Utc::now();
        let challenge = Challenge::new(
            "Sprint",
            "Read one book",
            "Sticker",
            now - Duration::days(1),
            now,
        );

        assert!(!challenge.is_active(now));
    }
}
