pub mod blog_service;
pub mod catalog_service;
pub mod challenge_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod partner_service;
pub mod quiz_attempt_service;
pub mod quiz_service;
pub mod user_service;

pub use blog_service::BlogService;
pub use catalog_service::CatalogService;
pub use challenge_service::ChallengeService;
pub use contact_service::ContactService;
pub use dashboard_service::DashboardService;
pub use partner_service::PartnerService;
pub use quiz_attempt_service::QuizAttemptService;
pub use quiz_service::QuizService;
pub use user_service::UserService;
