use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        BookRepository, GenreRepository, MongoBlogRepository, MongoBookRepository,
        MongoChallengeRepository, MongoContactRepository, MongoGenreRepository,
        MongoPartnerRepository, MongoQuizAttemptRepository, MongoQuizRepository,
        MongoRefreshTokenRepository, MongoUserRepository, PartnerRepository,
        QuizAttemptRepository, QuizRepository, RefreshTokenRepository, UserRepository,
    },
    services::{
        BlogService, CatalogService, ChallengeService, ContactService, DashboardService,
        PartnerService, QuizAttemptService, QuizService, UserService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub catalog_service: Arc<CatalogService>,
    pub quiz_service: Arc<QuizService>,
    pub quiz_attempt_service: Arc<QuizAttemptService>,
    pub dashboard_service: Arc<DashboardService>,
    pub blog_service: Arc<BlogService>,
    pub contact_service: Arc<ContactService>,
    pub partner_service: Arc<PartnerService>,
    pub challenge_service: Arc<ChallengeService>,
    pub refresh_token_repository: Arc<dyn RefreshTokenRepository>,
    pub jwt_service: Arc<JwtService>,
    pub db: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let genre_repository = Arc::new(MongoGenreRepository::new(&db));
        genre_repository.ensure_indexes().await?;

        let book_repository = Arc::new(MongoBookRepository::new(&db));
        book_repository.ensure_indexes().await?;

        let quiz_repository = Arc::new(MongoQuizRepository::new(&db));
        quiz_repository.ensure_indexes().await?;

        let attempt_repository = Arc::new(MongoQuizAttemptRepository::new(&db));
        attempt_repository.ensure_indexes().await?;

        let partner_repository = Arc::new(MongoPartnerRepository::new(&db));
        partner_repository.ensure_indexes().await?;

        let refresh_token_repository = Arc::new(MongoRefreshTokenRepository::new(&db));
        refresh_token_repository.ensure_indexes().await?;

        let blog_repository = Arc::new(MongoBlogRepository::new(&db));
        let contact_repository = Arc::new(MongoContactRepository::new(&db));
        let challenge_repository = Arc::new(MongoChallengeRepository::new(&db));

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let catalog_service = Arc::new(CatalogService::new(
            book_repository.clone(),
            genre_repository.clone(),
        ));
        let quiz_service = Arc::new(QuizService::new(
            quiz_repository.clone(),
            book_repository.clone(),
        ));
        let quiz_attempt_service = Arc::new(QuizAttemptService::new(
            attempt_repository.clone(),
            quiz_repository.clone(),
            user_repository.clone(),
            config.free_tier_monthly_attempts,
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            user_repository,
            attempt_repository,
            book_repository,
            quiz_repository,
            contact_repository.clone(),
        ));
        let blog_service = Arc::new(BlogService::new(blog_repository));
        let contact_service = Arc::new(ContactService::new(contact_repository));
        let partner_service = Arc::new(PartnerService::new(partner_repository));
        let challenge_service = Arc::new(ChallengeService::new(challenge_repository));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        ));

        Ok(Self {
            user_service,
            catalog_service,
            quiz_service,
            quiz_attempt_service,
            dashboard_service,
            blog_service,
            contact_service,
            partner_service,
            challenge_service,
            refresh_token_repository,
            jwt_service,
            db: Arc::new(db),
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
