//! Shared-secret authentication for webhook writes.
//!
//! The secret check sits behind a trait so it can be swapped for an HMAC
//! signature or rotating tokens later without touching the store or the
//! handlers.

/// Verifies the credentials presented by a webhook caller.
pub trait Authenticator: Send + Sync {
    /// Returns true when `credentials` authorize a write.
    fn verify(&self, credentials: &str) -> bool;
}

/// Authenticator backed by a single static shared secret.
///
/// Stores only a SHA-256 digest of the configured secret and compares
/// digests, so the comparison always runs over fixed-length data.
pub struct SharedSecretAuthenticator {
    secret_hash: String,
}

impl SharedSecretAuthenticator {
    /// Creates an authenticator for the given secret.
    pub fn new(secret: &str) -> Self {
        Self { secret_hash: sha256::digest(secret.as_bytes()) }
    }
}

impl Authenticator for SharedSecretAuthenticator {
    fn verify(&self, credentials: &str) -> bool {
        sha256::digest(credentials.as_bytes()) == self.secret_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_configured_secret() {
        let auth = SharedSecretAuthenticator::new("TwojSuperTajnyKlucz123");
        assert!(auth.verify("TwojSuperTajnyKlucz123"));
    }

    #[test]
    fn rejects_a_different_secret() {
        let auth = SharedSecretAuthenticator::new("TwojSuperTajnyKlucz123");
        assert!(!auth.verify("zly-klucz"));
    }

    #[test]
    fn rejects_an_empty_credential() {
        let auth = SharedSecretAuthenticator::new("TwojSuperTajnyKlucz123");
        assert!(!auth.verify(""));
    }

    #[test]
    fn rejects_a_prefix_of_the_secret() {
        let auth = SharedSecretAuthenticator::new("TwojSuperTajnyKlucz123");
        assert!(!auth.verify("TwojSuperTajnyKlucz"));
    }
}
