use sha2::{Digest, Sha256};

/// Deterministic, salted password hasher.
///
/// Hashing the same plaintext under the same configured salt always yields
/// the same credential, which lets sign-in match users by
/// `(email, credential)` equality in a single query instead of a per-row
/// verify step.
///
/// Operational constraint: because matching is equality-based, rotating
/// `PASSWORD_SALT` invalidates every stored credential. A stronger scheme
/// would store a per-user salt and verify with a constant-time compare; the
/// current contract requires the deterministic form.
#[derive(Clone)]
pub struct PasswordHasher {
    salt: String,
}

impl PasswordHasher {
    pub fn new(salt: impl Into<String>) -> Self {
        Self { salt: salt.into() }
    }

    /// Hashes a plaintext password into a fixed-size opaque credential.
    ///
    /// Infallible for any string input; the digest covers the salt followed
    /// by the password bytes.
    pub fn hash(&self, password: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update(password.as_bytes());
        hasher.finalize().to_vec()
    }
}
