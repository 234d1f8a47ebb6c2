use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Partner,
        dto::{
            request::{CreatePartnerRequest, UpdatePartnerRequest},
            response::DeleteResponse,
        },
    },
    repositories::PartnerRepository,
};

pub struct PartnerService {
    repository: Arc<dyn PartnerRepository>,
}

impl PartnerService {
    pub fn new(repository: Arc<dyn PartnerRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Partner>> {
        self.repository.find_all().await
    }

    pub async fn get(&self, id: &str) -> AppResult<Partner> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Partner with id '{}' not found", id)))
    }

    pub async fn create(&self, request: CreatePartnerRequest) -> AppResult<Partner> {
        request.validate()?;

        if self.repository.find_by_name(&request.name).await?.is_some() {
            return Err(AppError::AlreadyExists(format!(
                "Partner '{}' already exists",
                request.name
            )));
        }

        let mut partner = Partner::new(&request.name, &request.website_url);
        partner.description = request.description;
        partner.logo_url = request.logo_url;

        self.repository.create(partner).await
    }

    pub async fn update(&self, id: &str, request: UpdatePartnerRequest) -> AppResult<Partner> {
        request.validate()?;

        let mut partner = self.get(id).await?;

        if let Some(name) = &request.name {
            if let Some(existing) = self.repository.find_by_name(name).await? {
                if existing.id != partner.id {
                    return Err(AppError::AlreadyExists(format!(
                        "Partner '{}' already exists",
                        name
                    )));
                }
            }
            partner.name = name.clone();
        }
        if let Some(description) = request.description {
            partner.description = Some(description);
        }
        if let Some(website_url) = request.website_url {
            partner.website_url = website_url;
        }
        if let Some(logo_url) = request.logo_url {
            partner.logo_url = Some(logo_url);
        }

        self.repository.update(partner).await
    }

    pub async fn delete(&self, id: &str) -> AppResult<DeleteResponse> {
        self.repository.delete(id).await?;
        Ok(DeleteResponse {
            message: format!("Partner '{}' deleted", id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::partner_repository::MockPartnerRepository;

    #[tokio::test]
    async fn duplicate_partner_name_is_rejected() {
        let mut repo = MockPartnerRepository::new();
        repo.expect_find_by_name()
            .returning(|name| Ok(Some(Partner::new(name, "https://example.org"))));

        let service = PartnerService::new(Arc::new(repo));
        let result = service
            .create(CreatePartnerRequest {
                name: "City Library".to_string(),
                description: None,
                website_url: "https://citylibrary.example.org".to_string(),
                logo_url: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let partner = Partner::new("City Library", "https://citylibrary.example.org");
        let id = partner.id.clone();

        let mut repo = MockPartnerRepository::new();
        let for_find = partner.clone();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(for_find.clone())));
        let for_name = partner.clone();
        repo.expect_find_by_name()
            .returning(move |_| Ok(Some(for_name.clone())));
        repo.expect_update().returning(Ok);

        let service = PartnerService::new(Arc::new(repo));
        let updated = service
            .update(
                &id,
                UpdatePartnerRequest {
                    name: Some("City Library".to_string()),
                    description: Some("Our local library".to_string()),
                    website_url: None,
                    logo_url: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.description.as_deref(), Some("Our local library"));
    }
}
