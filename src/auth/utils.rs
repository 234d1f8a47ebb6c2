use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::user::UserRole,
};

pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Admins always pass; anyone else must hold one of the listed roles.
pub fn require_role(claims: &Claims, allowed: &[UserRole]) -> AppResult<()> {
    if claims.role == UserRole::Admin || allowed.contains(&claims.role) {
        return Ok(());
    }
    Err(AppError::Forbidden(
        "Your role does not permit this action".to_string(),
    ))
}

pub fn require_owner_or_admin(claims: &Claims, resource_owner: &str) -> AppResult<()> {
    if claims.role != UserRole::Admin && claims.sub != resource_owner {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::user::SubscriptionTier;

    fn create_test_claims(username: &str, role: UserRole) -> Claims {
        Claims {
            sub: username.to_string(),
            email: format!("{}@example.com", username),
            role,
            tier: SubscriptionTier::Free,
            iat: 0,
            exp: 9999999999,
        }
    }

    #[test]
    fn test_require_admin_success() {
        let claims = create_test_claims("admin", UserRole::Admin);
        assert!(require_admin(&claims).is_ok());
    }

    #[test]
    fn test_require_admin_failure() {
        let claims = create_test_claims("user", UserRole::Student);
        assert!(require_admin(&claims).is_err());
    }

    #[test]
    fn test_require_role_allows_listed_roles() {
        let claims = create_test_claims("teacher", UserRole::Teacher);
        assert!(require_role(&claims, &[UserRole::Teacher, UserRole::School]).is_ok());
    }

    #[test]
    fn test_require_role_admin_always_passes() {
        let claims = create_test_claims("admin", UserRole::Admin);
        assert!(require_role(&claims, &[UserRole::Teacher]).is_ok());
    }

    #[test]
    fn test_require_role_rejects_other_roles() {
        let claims = create_test_claims("student", UserRole::Student);
        assert!(require_role(&claims, &[UserRole::Teacher]).is_err());
    }

    #[test]
    fn test_require_owner_or_admin_as_owner() {
        let claims = create_test_claims("john", UserRole::Reader);
        assert!(require_owner_or_admin(&claims, "john").is_ok());
    }

    #[test]
    fn test_require_owner_or_admin_as_admin() {
        let claims = create_test_claims("admin", UserRole::Admin);
        assert!(require_owner_or_admin(&claims, "other_user").is_ok());
    }

    #[test]
    fn test_require_owner_or_admin_failure() {
        let claims = create_test_claims("john", UserRole::Reader);
        assert!(require_owner_or_admin(&claims, "jane").is_err());
    }
}
