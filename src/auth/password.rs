use argon2::{Config, Variant};
use once_cell::sync::Lazy;
use rand::{distributions::Alphanumeric, thread_rng, Rng};

use crate::errors::{AppError, AppResult};

static ARGON_CONFIG: Lazy<Config<'static>> = Lazy::new(|| Config {
    variant: Variant::Argon2id,
    ..Config::default()
});

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    argon2::hash_encoded(password.as_bytes(), salt.as_bytes(), &ARGON_CONFIG)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, encoded_hash: &str) -> AppResult<bool> {
    argon2::verify_encoded(encoded_hash, password.as_bytes())
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();

        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("same password").unwrap();
        let hash2 = hash_password("same password").unwrap();

        assert_ne!(hash1, hash2);
    }
}
