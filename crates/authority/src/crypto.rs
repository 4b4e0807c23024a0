//! Password hashing for the development user directory
//!
//! Stored format is `hex(salt):hex(sha256(password || salt))`, verified
//! with a constant-time comparison.

use sha2::{Digest, Sha256};

use crate::error::AuthorityError;

const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthorityError> {
    let mut salt = [0u8; SALT_LEN];
    getrandom::getrandom(&mut salt)
        .map_err(|e| AuthorityError::Internal(format!("Failed to generate salt: {}", e)))?;

    Ok(format!(
        "{}:{}",
        hex::encode(salt),
        hex::encode(digest(password, &salt))
    ))
}

/// Verify a password against a stored hash.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    let Some((salt_hex, hash_hex)) = stored_hash.split_once(':') else {
        return false;
    };

    let (Ok(salt), Ok(hash)) = (hex::decode(salt_hex), hex::decode(hash_hex)) else {
        return false;
    };

    let candidate_hash = digest(candidate, &salt);

    if hash.len() != candidate_hash.len() {
        return false;
    }

    let mut result = 0u8;
    for (a, b) in hash.iter().zip(candidate_hash.iter()) {
        result |= a ^ b;
    }
    result == 0
}

fn digest(password: &str, salt: &[u8]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt);
    hasher.finalize().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify() {
        let stored = hash_password("correct horse").unwrap();
        assert!(verify_password("correct horse", &stored));
        assert!(!verify_password("correct horse ", &stored));
        assert!(!verify_password("", &stored));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn test_known_vector() {
        let salt = b"test_salt_value_";
        let stored = format!(
            "{}:{}",
            hex::encode(salt),
            hex::encode(digest("test_key", salt))
        );
        assert!(verify_password("test_key", &stored));
        assert!(!verify_password("wrong_key", &stored));
    }

    #[test]
    fn test_malformed_stored_hash() {
        assert!(!verify_password("pw", ""));
        assert!(!verify_password("pw", "no-colon"));
        assert!(!verify_password("pw", "zz:zz"));
        assert!(!verify_password("pw", "abcd:abcd"));
    }
}
