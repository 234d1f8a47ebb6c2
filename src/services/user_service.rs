use std::sync::Arc;

use mongodb::bson::doc;
use validator::Validate;

use crate::{
    auth::password,
    errors::{AppError, AppResult},
    models::{
        domain::{SubscriptionTier, User, UserRole},
        dto::{
            request::{RegisterRequest, UpdateUserRequest},
            response::{
                DeleteResponse, LeaderboardEntry, PagedResponse, UpdateUserResponse, UserDto,
            },
        },
    },
    repositories::UserRepository,
};

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let role = request.role.unwrap_or(UserRole::Reader);
        if role == UserRole::Admin {
            return Err(AppError::ValidationError(
                "Admin accounts cannot be self-registered".to_string(),
            ));
        }

        if self
            .repository
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "User with username '{}' already exists",
                request.username
            )));
        }

        let password_hash = password::hash_password(&request.password)?;

        let mut user = User::new(
            &request.first_name,
            &request.last_name,
            &request.username,
            &request.email,
            &password_hash,
            role,
        );
        user.school_name = request.school_name;
        user.parent_username = request.parent_username;

        let created = self.repository.create(user).await?;
        log::info!("Registered new {:?} account: {}", role, created.username);

        Ok(created)
    }

    pub async fn authenticate(&self, username: &str, password_input: &str) -> AppResult<User> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        let hash = user
            .password_hash
            .as_deref()
            .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        if !password::verify_password(password_input, hash)? {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn get_user(&self, username: &str) -> AppResult<UserDto> {
        let user = self.get_user_record(username).await?;
        Ok(user.into())
    }

    pub async fn get_user_record(&self, username: &str) -> AppResult<User> {
        self.repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })
    }

    pub async fn get_all_users_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> AppResult<PagedResponse<UserDto>> {
        let (users, total) = self.repository.find_all_paginated(offset, limit).await?;
        let items = users.into_iter().map(UserDto::from).collect();
        Ok(PagedResponse::new(items, total, offset, limit))
    }

    pub async fn update_user(
        &self,
        username: &str,
        request: UpdateUserRequest,
    ) -> AppResult<UpdateUserResponse> {
        request.validate()?;

        let mut set_doc = doc! {};
        if let Some(first_name) = request.first_name {
            set_doc.insert("first_name", first_name);
        }
        if let Some(last_name) = request.last_name {
            set_doc.insert("last_name", last_name);
        }
        if let Some(email) = request.email {
            set_doc.insert("email", email);
        }
        if let Some(school_name) = request.school_name {
            set_doc.insert("school_name", school_name);
        }

        if set_doc.is_empty() {
            return Err(AppError::BadRequest(
                "No fields provided to update".to_string(),
            ));
        }

        let user = self
            .repository
            .update(username, doc! { "$set": set_doc })
            .await?;

        Ok(UpdateUserResponse {
            data: user.into(),
            message: "User updated".to_string(),
        })
    }

    pub async fn update_tier(
        &self,
        username: &str,
        tier: SubscriptionTier,
    ) -> AppResult<UpdateUserResponse> {
        let tier_bson = mongodb::bson::to_bson(&tier)?;
        let user = self
            .repository
            .update(username, doc! { "$set": { "tier": tier_bson } })
            .await?;

        log::info!("Subscription tier for {} set to {:?}", username, tier);

        Ok(UpdateUserResponse {
            data: user.into(),
            message: "Subscription tier updated".to_string(),
        })
    }

    pub async fn delete_user(&self, username: &str) -> AppResult<DeleteResponse> {
        self.repository.delete(username).await?;
        Ok(DeleteResponse {
            message: format!("User '{}' deleted", username),
        })
    }

    pub async fn leaderboard(&self, limit: i64) -> AppResult<Vec<LeaderboardEntry>> {
        let users = self.repository.top_by_points(limit.clamp(1, 100)).await?;

        let entries = users
            .into_iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                rank: i as i64 + 1,
                full_name: user.full_name(),
                username: user.username,
                points: user.points,
            })
            .collect();

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use mockall::predicate::eq;

    fn register_request(username: &str, role: Option<UserRole>) -> RegisterRequest {
        RegisterRequest {
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password: "a secure password".to_string(),
            role,
            school_name: None,
            parent_username: None,
        }
    }

    #[tokio::test]
    async fn register_rejects_admin_role() {
        let repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(repo));

        let result = service
            .register(register_request("wannabe_admin", Some(UserRole::Admin)))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("taken"))
            .returning(|_| Ok(Some(User::test_user("taken", UserRole::Reader))));

        let service = UserService::new(Arc::new(repo));
        let result = service.register(register_request("taken", None)).await;

        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn register_defaults_to_reader_and_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_create().returning(Ok);

        let service = UserService::new(Arc::new(repo));
        let user = service
            .register(register_request("newuser", None))
            .await
            .unwrap();

        assert_eq!(user.role, UserRole::Reader);
        let hash = user.password_hash.as_deref().unwrap();
        assert_ne!(hash, "a secure password");
        assert!(hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn authenticate_rejects_wrong_password() {
        let password_hash = crate::auth::password::hash_password("right password").unwrap();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(move |_| {
            let mut user = User::test_user("johndoe", UserRole::Student);
            user.password_hash = Some(password_hash.clone());
            Ok(Some(user))
        });

        let service = UserService::new(Arc::new(repo));

        let ok = service.authenticate("johndoe", "right password").await;
        assert!(ok.is_ok());

        let err = service.authenticate("johndoe", "wrong password").await;
        assert!(matches!(err, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn update_user_requires_at_least_one_field() {
        let repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(repo));

        let result = service
            .update_user(
                "johndoe",
                UpdateUserRequest {
                    first_name: None,
                    last_name: None,
                    email: None,
                    school_name: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn leaderboard_assigns_ranks_in_order() {
        let mut repo = MockUserRepository::new();
        repo.expect_top_by_points().returning(|_| {
            let mut first = User::test_user("first", UserRole::Student);
            first.points = 100;
            let mut second = User::test_user("second", UserRole::Student);
            second.points = 50;
            Ok(vec![first, second])
        });

        let service = UserService::new(Arc::new(repo));
        let entries = service.leaderboard(10).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[0].username, "first");
        assert_eq!(entries[1].rank, 2);
        assert_eq!(entries[1].points, 50);
    }
}
