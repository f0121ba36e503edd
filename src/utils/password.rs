//! Admin password hashing.
//!
//! Digests are SHA-512 over the UTF-8 bytes of the password, rendered as
//! 128 lowercase hex characters. There is no salt and no iteration count, so
//! equal passwords produce equal digests across aliases. The format is kept so
//! that digests written by existing deployments still verify.

use sha2::{Digest, Sha512};

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 128;

/// Hashes a plaintext admin password.
pub fn hash_password(plaintext: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(plaintext.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a plaintext password against a stored digest.
///
/// The comparison runs over the full length regardless of where the first
/// mismatch is.
pub fn verify_password(plaintext: &str, stored_digest: &str) -> bool {
    let computed = hash_password(plaintext);
    let (a, b) = (computed.as_bytes(), stored_digest.as_bytes());

    if a.len() != b.len() {
        return false;
    }

    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password("hunter2"), hash_password("hunter2"));
    }

    #[test]
    fn test_hash_length_and_charset() {
        let digest = hash_password("pw");
        assert_eq!(digest.len(), DIGEST_HEX_LEN);
        assert!(
            digest
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        );
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            hash_password("abc"),
            "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a\
             2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
        );
    }

    #[test]
    fn test_different_passwords_differ() {
        assert_ne!(hash_password("a"), hash_password("b"));
    }

    #[test]
    fn test_verify_password() {
        let digest = hash_password("secret");
        assert!(verify_password("secret", &digest));
        assert!(!verify_password("Secret", &digest));
        assert!(!verify_password("secret", "short"));
        assert!(!verify_password("secret", &digest.to_uppercase()));
    }
}
