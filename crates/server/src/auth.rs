//! Delete-key authorization.

use sha2::{Digest, Sha256};

/// Compare a presented API key against the configured secret.
///
/// Both values are hashed and the fixed-size digests compared, so the
/// comparison does not leak how long a matching prefix was.
pub fn api_key_matches(presented: &str, configured: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let configured = Sha256::digest(configured.as_bytes());
    presented == configured
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        assert!(api_key_matches("secret", "secret"));
        assert!(!api_key_matches("secret ", "secret"));
        assert!(!api_key_matches("Secret", "secret"));
        assert!(!api_key_matches("", "secret"));
    }
}
