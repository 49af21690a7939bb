use thiserror::Error;
use tracing::warn;

/// bcrypt work factor used for user passwords.
pub const DEFAULT_COST: u32 = 5;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Salted bcrypt hashing for stored user passwords.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// Returns `false` for a wrong candidate and for a digest bcrypt cannot parse.
    pub fn verify(&self, digest: &str, candidate: &str) -> bool {
        match bcrypt::verify(candidate, digest) {
            Ok(matches) => matches,
            Err(e) => {
                warn!(error = %e, "stored password digest could not be verified");
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_against_the_plaintext() {
        let hasher = PasswordHasher::default();
        let digest = hasher.hash("s3cret-pass").unwrap();

        assert_ne!(digest, "s3cret-pass");
        assert!(digest.starts_with("$2"));
        assert!(hasher.verify(&digest, "s3cret-pass"));
        assert!(!hasher.verify(&digest, "wrong-pass"));
    }

    #[test]
    fn same_password_hashes_to_distinct_digests() {
        let hasher = PasswordHasher::default();
        let first = hasher.hash("repeat").unwrap();
        let second = hasher.hash("repeat").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify(&first, "repeat"));
        assert!(hasher.verify(&second, "repeat"));
    }

    #[test]
    fn malformed_digest_never_verifies() {
        let hasher = PasswordHasher::default();
        assert!(!hasher.verify("not-a-bcrypt-digest", "anything"));
    }

    #[test]
    fn digest_records_the_configured_cost() {
        let hasher = PasswordHasher::new(6);
        let digest = hasher.hash("cost-check").unwrap();

        assert_eq!(hasher.cost(), 6);
        assert!(digest.starts_with("$2b$06$"));
    }
}
