use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{User, UserRole},
        dto::response::{
            AdminDashboard, Dashboard, FamilyDashboard, LeaderboardEntry, QuizAttemptDto,
            SchoolDashboard, StudentDashboard, StudentSummary,
        },
    },
    repositories::{
        BookRepository, ContactRepository, QuizAttemptRepository, QuizRepository, UserRepository,
    },
};

const RECENT_ATTEMPTS_SHOWN: i64 = 5;
const TOP_READERS_SHOWN: i64 = 10;

pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    attempts: Arc<dyn QuizAttemptRepository>,
    books: Arc<dyn BookRepository>,
    quizzes: Arc<dyn QuizRepository>,
    contacts: Arc<dyn ContactRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        attempts: Arc<dyn QuizAttemptRepository>,
        books: Arc<dyn BookRepository>,
        quizzes: Arc<dyn QuizRepository>,
        contacts: Arc<dyn ContactRepository>,
    ) -> Self {
        Self {
            users,
            attempts,
            books,
            quizzes,
            contacts,
        }
    }

    /// Builds the dashboard matching the user's role.
    pub async fn for_user(&self, username: &str) -> AppResult<Dashboard> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("User with username '{}' not found", username))
            })?;

        match user.role {
            UserRole::Student | UserRole::Reader => {
                Ok(Dashboard::Student(self.student_dashboard(&user).await?))
            }
            UserRole::Parent => Ok(Dashboard::Family(self.family_dashboard(&user).await?)),
            UserRole::Teacher | UserRole::School => {
                Ok(Dashboard::School(self.school_dashboard(&user).await?))
            }
            UserRole::Admin => Ok(Dashboard::Admin(self.admin_dashboard().await?)),
        }
    }

    async fn student_dashboard(&self, user: &User) -> AppResult<StudentDashboard> {
        let rank = self.users.count_with_more_points(user.points).await? + 1;
        let attempts_taken = self.attempts.count_for_user(&user.username).await?;
        let quizzes_passed_first_try = self
            .attempts
            .count_passed_first_tries(&user.username)
            .await?;
        let (recent, _) = self
            .attempts
            .list_for_user(&user.username, None, 0, RECENT_ATTEMPTS_SHOWN)
            .await?;

        Ok(StudentDashboard {
            username: user.username.clone(),
            points: user.points,
            rank,
            attempts_taken,
            quizzes_passed_first_try,
            recent_attempts: recent.into_iter().map(QuizAttemptDto::from).collect(),
        })
    }

    async fn family_dashboard(&self, user: &User) -> AppResult<FamilyDashboard> {
        let children = self.users.find_children(&user.username).await?;
        let children = self.summarize(children).await?;
        Ok(FamilyDashboard { children })
    }

    async fn school_dashboard(&self, user: &User) -> AppResult<SchoolDashboard> {
        let students = match &user.school_name {
            Some(school_name) => {
                let students = self.users.find_by_school(school_name).await?;
                self.summarize(students).await?
            }
            None => Vec::new(),
        };

        Ok(SchoolDashboard {
            school_name: user.school_name.clone(),
            students,
        })
    }

    async fn admin_dashboard(&self) -> AppResult<AdminDashboard> {
        let top_readers = self
            .users
            .top_by_points(TOP_READERS_SHOWN)
            .await?
            .into_iter()
            .enumerate()
            .map(|(i, user)| LeaderboardEntry {
                rank: i as i64 + 1,
                full_name: user.full_name(),
                username: user.username,
                points: user.points,
            })
            .collect();

        Ok(AdminDashboard {
            total_users: self.users.count().await?,
            total_books: self.books.count().await?,
            total_quizzes: self.quizzes.count().await?,
            total_attempts: self.attempts.count().await?,
            unread_contact_messages: self.contacts.count_unread().await?,
            top_readers,
        })
    }

    async fn summarize(&self, students: Vec<User>) -> AppResult<Vec<StudentSummary>> {
        let mut summaries = Vec::with_capacity(students.len());
        for student in students {
            let attempts_taken = self.attempts.count_for_user(&student.username).await?;
            summaries.push(StudentSummary {
                full_name: student.full_name(),
                username: student.username,
                points: student.points,
                attempts_taken,
            });
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        book_repository::MockBookRepository, contact_repository::MockContactRepository,
        quiz_attempt_repository::MockQuizAttemptRepository, quiz_repository::MockQuizRepository,
        user_repository::MockUserRepository,
    };

    fn service_with(
        users: MockUserRepository,
        attempts: MockQuizAttemptRepository,
    ) -> DashboardService {
        DashboardService::new(
            Arc::new(users),
            Arc::new(attempts),
            Arc::new(MockBookRepository::new()),
            Arc::new(MockQuizRepository::new()),
            Arc::new(MockContactRepository::new()),
        )
    }

    #[tokio::test]
    async fn student_dashboard_reports_rank_after_higher_scorers() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| {
            let mut user = User::test_user("student1", UserRole::Student);
            user.points = 40;
            Ok(Some(user))
        });
        users.expect_count_with_more_points().returning(|_| Ok(2));

        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_count_for_user().returning(|_| Ok(6));
        attempts.expect_count_passed_first_tries().returning(|_| Ok(4));
        attempts
            .expect_list_for_user()
            .returning(|_, _, _, _| Ok((vec![], 6)));

        let service = service_with(users, attempts);
        let dashboard = service.for_user("student1").await.unwrap();

        match dashboard {
            Dashboard::Student(student) => {
                assert_eq!(student.rank, 3);
                assert_eq!(student.points, 40);
                assert_eq!(student.attempts_taken, 6);
                assert_eq!(student.quizzes_passed_first_try, 4);
            }
            other => panic!("expected a student dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn parent_sees_their_children() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(User::test_user("parent1", UserRole::Parent))));
        users.expect_find_children().returning(|_| {
            let mut child = User::test_user("kid1", UserRole::Student);
            child.points = 15;
            Ok(vec![child])
        });

        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_count_for_user().returning(|_| Ok(3));

        let service = service_with(users, attempts);
        let dashboard = service.for_user("parent1").await.unwrap();

        match dashboard {
            Dashboard::Family(family) => {
                assert_eq!(family.children.len(), 1);
                assert_eq!(family.children[0].username, "kid1");
                assert_eq!(family.children[0].attempts_taken, 3);
            }
            other => panic!("expected a family dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn school_roster_is_summarized_per_student() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().returning(|_| {
            let mut teacher = User::test_user("teacher1", UserRole::Teacher);
            teacher.school_name = Some("Hillcrest Primary".to_string());
            Ok(Some(teacher))
        });
        users
            .expect_find_by_school()
            .returning(|school| Ok(crate::test_utils::fixtures::school_roster(school)));

        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_count_for_user().returning(|_| Ok(2));

        let service = service_with(users, attempts);
        let dashboard = service.for_user("teacher1").await.unwrap();

        match dashboard {
            Dashboard::School(school) => {
                assert_eq!(school.school_name.as_deref(), Some("Hillcrest Primary"));
                assert_eq!(school.students.len(), 3);
                assert!(school.students.iter().all(|s| s.attempts_taken == 2));
            }
            other => panic!("expected a school dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn teacher_without_school_gets_empty_roster() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(User::test_user("teacher1", UserRole::Teacher))));

        let attempts = MockQuizAttemptRepository::new();

        let service = service_with(users, attempts);
        let dashboard = service.for_user("teacher1").await.unwrap();

        match dashboard {
            Dashboard::School(school) => {
                assert!(school.school_name.is_none());
                assert!(school.students.is_empty());
            }
            other => panic!("expected a school dashboard, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn admin_dashboard_aggregates_counts() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .returning(|_| Ok(Some(User::test_user("admin1", UserRole::Admin))));
        users.expect_count().returning(|| Ok(120));
        users.expect_top_by_points().returning(|_| {
            let mut top = User::test_user("star_reader", UserRole::Student);
            top.points = 300;
            Ok(vec![top])
        });

        let mut attempts = MockQuizAttemptRepository::new();
        attempts.expect_count().returning(|| Ok(456));

        let mut books = MockBookRepository::new();
        books.expect_count().returning(|| Ok(42));
        let mut quizzes = MockQuizRepository::new();
        quizzes.expect_count().returning(|| Ok(33));
        let mut contacts = MockContactRepository::new();
        contacts.expect_count_unread().returning(|| Ok(7));

        let service = DashboardService::new(
            Arc::new(users),
            Arc::new(attempts),
            Arc::new(books),
            Arc::new(quizzes),
            Arc::new(contacts),
        );
        let dashboard = service.for_user("admin1").await.unwrap();

        match dashboard {
            Dashboard::Admin(admin) => {
                assert_eq!(admin.total_users, 120);
                assert_eq!(admin.total_books, 42);
                assert_eq!(admin.total_quizzes, 33);
                assert_eq!(admin.total_attempts, 456);
                assert_eq!(admin.unread_contact_messages, 7);
                assert_eq!(admin.top_readers[0].rank, 1);
                assert_eq!(admin.top_readers[0].username, "star_reader");
            }
            other => panic!("expected an admin dashboard, got {:?}", other),
        }
    }
}
