use crate::models::domain::{AnswerLabel, Quiz, QuizQuestion, User, UserRole};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test student
    pub fn test_student() -> User {
        User::test_user("student1", UserRole::Student)
    }

    /// Creates a test user with custom username and role
    pub fn test_user_with_role(username: &str, role: UserRole) -> User {
        User::test_user(username, role)
    }

    /// Creates a published two-question quiz with known answers (A, C)
    pub fn published_quiz() -> Quiz {
        let mut quiz = Quiz::new(
            "book-1",
            "Chapter quiz",
            "teacher1",
            5,
            vec![
                QuizQuestion::new(
                    "Who wrote Matilda?",
                    ["Roald Dahl", "Enid Blyton", "J. K. Rowling", "Dr. Seuss"],
                    AnswerLabel::A,
                ),
                QuizQuestion::new(
                    "What is Matilda's surname?",
                    ["Trunchbull", "Honey", "Wormwood", "Phelps"],
                    AnswerLabel::C,
                ),
            ],
        );
        quiz.published = true;
        quiz
    }

    /// Creates a small roster of students at one school
    pub fn school_roster(school_name: &str) -> Vec<User> {
        ["amelia", "bruno", "carla"]
            .iter()
            .map(|username| {
                let mut user = User::test_user(username, UserRole::Student);
                user.school_name = Some(school_name.to_string());
                user
            })
            .collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::UserRole;

    #[test]
    fn test_fixtures_test_student() {
        let user = test_student();
        assert_eq!(user.username, "student1");
        assert_eq!(user.role, UserRole::Student);
    }

    #[test]
    fn test_fixtures_published_quiz() {
        let quiz = published_quiz();
        assert!(quiz.published);
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.total_points(), 10);
    }

    #[test]
    fn test_fixtures_school_roster() {
        let roster = school_roster("Hillcrest Primary");
        assert_eq!(roster.len(), 3);
        assert!(roster
            .iter()
            .all(|u| u.school_name.as_deref() == Some("Hillcrest Primary")));
    }
}
