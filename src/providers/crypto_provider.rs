use std::sync::Arc;

use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher,
    PasswordVerifier, Version,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

use crate::config::SecretManager;
use crate::errors::internal::CredentialError;
use crate::errors::InternalError;

type HmacSha256 = Hmac<Sha256>;

const SESSION_TOKEN_BYTES: usize = 32;

/// Cryptographic operations provider
///
/// Password hashing (argon2id keyed with the password pepper), session token
/// generation and the keyed digest under which session tokens are stored.
pub struct CryptoProvider {
    secret_manager: Arc<SecretManager>,
}

impl CryptoProvider {
    pub fn new(secret_manager: Arc<SecretManager>) -> Self {
        Self { secret_manager }
    }

    fn argon2(pepper: &[u8]) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(pepper, Algorithm::Argon2id, Version::V0x13, Params::default())
            .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a plaintext password into a PHC string
    ///
    /// Runs on the blocking pool; argon2 is deliberately slow.
    pub async fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let pepper = self.secret_manager.password_pepper().to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut rand_core::OsRng);
            Self::argon2(pepper.as_bytes())?
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| InternalError::from(CredentialError::PasswordHashingFailed(e.to_string())))
        })
        .await
        .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?
    }

    /// Check a plaintext password against a stored PHC string
    ///
    /// A malformed stored hash counts as a mismatch.
    pub async fn verify_password(&self, password_hash: &str, password: &str) -> Result<bool, InternalError> {
        let pepper = self.secret_manager.password_pepper().to_string();
        let password_hash = password_hash.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed = match PasswordHash::new(&password_hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Stored password hash is malformed: {}", e);
                    return Ok(false);
                }
            };
            Ok(Self::argon2(pepper.as_bytes())?
                .verify_password(password.as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .map_err(|e| InternalError::crypto("verify_password", e.to_string()))?
    }

    /// Fresh opaque session token for the cookie
    pub fn generate_session_token(&self) -> String {
        let bytes: [u8; SESSION_TOKEN_BYTES] = rand::rng().random();
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Digest under which a session token is persisted
    pub fn session_token_hash(&self, token: &str) -> Result<String, InternalError> {
        hmac_sha256_token(self.secret_manager.session_secret(), token)
    }

    /// Generate a cryptographically secure random password
    ///
    /// 20 characters drawn from upper and lower case letters, digits and symbols.
    pub fn generate_secure_password(&self) -> String {
        const PASSWORD_LENGTH: usize = 20;
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789\
                                 !@#$%^&*()_+-=[]{}|;:,.<>?";

        let mut rng = rand::rng();
        (0..PASSWORD_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}

/// Compute HMAC-SHA256 of a token and return it as lowercase hex
pub fn hmac_sha256_token(key: &str, token: &str) -> Result<String, InternalError> {
    let mut mac = HmacSha256::new_from_slice(key.as_bytes())
        .map_err(|e| InternalError::crypto("hmac_init", e.to_string()))?;
    mac.update(token.as_bytes());
    Ok(format!("{:x}", mac.finalize().into_bytes()))
}
