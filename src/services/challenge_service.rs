use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Challenge,
        dto::{
            request::{CreateChallengeRequest, UpdateChallengeRequest},
            response::{DeleteResponse, PagedResponse},
        },
    },
    repositories::ChallengeRepository,
};

pub struct ChallengeService {
    repository: Arc<dyn ChallengeRepository>,
}

impl ChallengeService {
    pub fn new(repository: Arc<dyn ChallengeRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self, offset: i64, limit: i64) -> AppResult<PagedResponse<Challenge>> {
        let (challenges, total) = self.repository.list_all(offset, limit).await?;
        Ok(PagedResponse::new(challenges, total, offset, limit))
    }

    pub async fn list_active(&self) -> AppResult<Vec<Challenge>> {
        self.repository.list_active(Utc::now()).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Challenge> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Challenge with id '{}' not found", id)))
    }

    pub async fn create(&self, request: CreateChallengeRequest) -> AppResult<Challenge> {
        request.validate()?;

        if request.starts_at >= request.ends_at {
            return Err(AppError::ValidationError(
                "A challenge must start before it ends".to_string(),
            ));
        }

        let challenge = Challenge::new(
            &request.title,
            &request.description,
            &request.prize,
            request.starts_at,
            request.ends_at,
        );
        let created = self.repository.create(challenge).await?;
        log::info!(
            "Challenge '{}' scheduled from {} to {}",
            created.title,
            created.starts_at,
            created.ends_at
        );

        Ok(created)
    }

    pub async fn update(&self, id: &str, request: UpdateChallengeRequest) -> AppResult<Challenge> {
        request.validate()?;

        let mut challenge = self.get(id).await?;

        if let Some(title) = request.title {
            challenge.title = title;
        }
        if let Some(description) = request.description {
            challenge.description = description;
        }
        if let Some(prize) = request.prize {
            challenge.prize = prize;
        }
        if let Some(starts_at) = request.starts_at {
            challenge.starts_at = starts_at;
        }
        if let Some(ends_at) = request.ends_at {
            challenge.ends_at = ends_at;
        }

        if challenge.starts_at >= challenge.ends_at {
            return Err(AppError::ValidationError(
                "A challenge must start before it ends".to_string(),
            ));
        }

        challenge.modified_at = Some(Utc::now());
        self.repository.update(challenge).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteResponse> {
        self.repository.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Challenge '{}' deleted", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::challenge_repository::MockChallengeRepository;
    use chrono::Duration;

    fn create_request(days_from_now: i64, days_long: i64) -> CreateChallengeRequest {
        let starts_at = Utc::now() + Duration::days(days_from_now);
        CreateChallengeRequest {
            title: "Summer reading".to_string(),
            description: "Read five books over the holidays".to_string(),
            prize: "Book voucher".to_string(),
            starts_at,
            ends_at: starts_at + Duration::days(days_long),
        }
    }

    #[tokio::test]
    async fn create_rejects_inverted_window() {
        let repo = MockChallengeRepository::new();
        let service = ChallengeService::new(Arc::new(repo));

        let result = service.create(create_request(3, -1)).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn create_accepts_a_valid_window() {
        let mut repo = MockChallengeRepository::new();
        repo.expect_create().returning(Ok);

        let service = ChallengeService::new(Arc::new(repo));
        let challenge = service.create(create_request(-1, 30)).await.unwrap();

        assert!(challenge.is_active(Utc::now()));
    }

    #[tokio::test]
    async fn update_cannot_invert_the_window() {
        let mut repo = MockChallengeRepository::new();
        repo.expect_find_by_id().returning(|_| {
            let now = Utc::now();
            Ok(Some(Challenge::new(
                "Sprint",
                "Read one book",
                "Sticker",
                now,
                now + Duration::days(7),
            )))
        });

        let service = ChallengeService::new(Arc::new(repo));
        let result = service
            .update(
                "challenge-1",
                UpdateChallengeRequest {
                    title: None,
                    description: None,
                    prize: None,
                    starts_at: None,
                    ends_at: Some(Utc::now() - Duration::days(30)),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
