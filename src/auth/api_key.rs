//! API key validation for proxy clients.

use std::sync::Arc;

use sha2::{Digest, Sha256};

/// Validates the single configured proxy API key.
///
/// Only the SHA-256 digest of the key is kept in memory.
#[derive(Clone)]
pub struct ApiKeyValidator {
    key_hash: Arc<str>,
}

impl ApiKeyValidator {
    /// Create a validator for the configured key.
    pub fn new(api_key: &str) -> Self {
        Self {
            key_hash: Self::hash_key(api_key).into(),
        }
    }

    /// Hash an API key for comparison.
    pub fn hash_key(key: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Whether `key` matches the configured key.
    pub fn validate(&self, key: &str) -> bool {
        Self::hash_key(key) == *self.key_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        let validator = ApiKeyValidator::new("sk-proxy-key-12345");

        assert!(validator.validate("sk-proxy-key-12345"));
        assert!(!validator.validate("wrong-key"));
        assert!(!validator.validate(""));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = ApiKeyValidator::hash_key("abc");
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
