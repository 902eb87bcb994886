use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// A sentinel stored for the stdio tool server's synthetic user. It is not a
/// valid bcrypt digest, so `verify` can never succeed against it and the
/// account is unusable for interactive login.
pub const UNUSABLE_PASSWORD_HASH: &str = "system_user_no_password";

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hashing_and_verification() {
        let password = "correct horse battery staple";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("wrong password", &hashed).unwrap());
    }

    #[test]
    fn test_unusable_sentinel_never_verifies() {
        // bcrypt rejects the sentinel as malformed or reports no match; either
        // way the synthetic account cannot authenticate.
        match verify_password("anything", UNUSABLE_PASSWORD_HASH) {
            Ok(matched) => assert!(!matched),
            Err(AppError::InternalServerError(msg)) => {
                assert!(msg.contains("Failed to verify password"))
            }
            Err(e) => panic!("Unexpected error: {:?}", e),
        }
    }
}
