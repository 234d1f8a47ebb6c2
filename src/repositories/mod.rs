pub mod blog_repository;
pub mod book_repository;
pub mod challenge_repository;
pub mod contact_repository;
pub mod genre_repository;
pub mod partner_repository;
pub mod quiz_attempt_repository;
pub mod quiz_repository;
pub mod refresh_token_repository;
pub mod user_repository;

pub use blog_repository::{BlogRepository, MongoBlogRepository};
pub use book_repository::{BookRepository, MongoBookRepository};
pub use challenge_repository::{ChallengeRepository, MongoChallengeRepository};
pub use contact_repository::{ContactRepository, MongoContactRepository};
pub use genre_repository::{GenreRepository, MongoGenreRepository};
pub use partner_repository::{MongoPartnerRepository, PartnerRepository};
pub use quiz_attempt_repository::{MongoQuizAttemptRepository, QuizAttemptRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use refresh_token_repository::{MongoRefreshTokenRepository, RefreshTokenRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
