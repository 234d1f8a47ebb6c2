use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::AppResult,
    models::{
        domain::ContactMessage,
        dto::{request::ContactRequest, response::PagedResponse},
    },
    repositories::ContactRepository,
};

pub struct ContactService {
    repository: Arc<dyn ContactRepository>,
}

impl ContactService {
    pub fn new(repository: Arc<dyn ContactRepository>) -> Self {
        Self { repository }
    }

    pub async fn submit(&self, request: ContactRequest) -> AppResult<ContactMessage> {
        request.validate()?;

        let message = ContactMessage::new(
            &request.name,
            &request.email,
            &request.subject,
            &request.body,
        );
        let created = self.repository.create(message).await?;
        log::info!("Contact message received from {}", created.email);

        Ok(created)
    }

    pub async fn list(&self, offset: i64, limit: i64) -> AppResult<PagedResponse<ContactMessage>> {
        let (messages, total) = self.repository.list(offset, limit).await?;
        Ok(PagedResponse::new(messages, total, offset, limit))
    }

    pub async fn mark_read(&self, id: &str) -> AppResult<ContactMessage> {
        self.repository.mark_read(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::repositories::contact_repository::MockContactRepository;

    fn contact_request(email: &str) -> ContactRequest {
        ContactRequest {
            name: "Jane Reader".to_string(),
            email: email.to_string(),
            subject: "School accounts".to_string(),
            body: "How do I register my class?".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_stores_the_message_unread() {
        let mut repo = MockContactRepository::new();
        repo.expect_create().returning(Ok);

        let service = ContactService::new(Arc::new(repo));
        let message = service.submit(contact_request("jane@example.com")).await.unwrap();

        assert!(!message.read);
        assert_eq!(message.subject, "School accounts");
    }

    #[tokio::test]
    async fn submit_rejects_invalid_email() {
        let repo = MockContactRepository::new();
        let service = ContactService::new(Arc::new(repo));

        let result = service.submit(contact_request("not-an-email")).await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
