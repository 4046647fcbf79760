//! Password hashing helpers

use anyhow::Result;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};

/// Hash a plaintext password with Argon2 and a fresh salt
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(hash)
}

/// Verify a plaintext password against a stored Argon2 hash
pub fn verify_password(plain: &str, stored_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow::anyhow!("Failed to parse password hash: {}", e))?;

    let argon2 = Argon2::default();
    let result = argon2.verify_password(plain.as_bytes(), &parsed_hash);

    Ok(result.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let hash = hash_password("rahasia1").expect("hashing failed");
        assert_ne!(hash, "rahasia1");
        assert!(verify_password("rahasia1", &hash).expect("verify errored"));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = hash_password("rahasia1").expect("hashing failed");
        assert!(!verify_password("salah", &hash).expect("verify errored"));
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        assert!(verify_password("rahasia1", "not-a-hash").is_err());
    }
}
