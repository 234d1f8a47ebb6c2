pub mod blog_post;
pub mod book;
pub mod challenge;
pub mod contact_message;
pub mod genre;
pub mod partner;
pub mod quiz;
pub mod quiz_attempt;
pub mod refresh_token;
pub mod user;

pub use blog_post::{BlogComment, BlogPost, BlogRating};
pub use book::Book;
pub use challenge::Challenge;
pub use contact_message::ContactMessage;
pub use genre::Genre;
pub use partner::Partner;
pub use quiz::{AnswerLabel, Quiz, QuizOption, QuizQuestion};
pub use quiz_attempt::{AttemptAnswer, QuizAttempt};
pub use refresh_token::RefreshToken;
pub use user::{SubscriptionTier, User, UserRole};
