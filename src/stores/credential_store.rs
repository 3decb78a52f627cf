use std::sync::Arc;

use tokio::sync::OnceCell;

use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set, SqlErr};

use crate::errors::internal::CredentialError;
use crate::errors::InternalError;
use crate::providers::CryptoProvider;
use crate::types::db::user;
use crate::types::internal::Role;

/// Input for the stand-in hash verified when a username is unknown
const DUMMY_PASSWORD: &str = "ticketdesk-unknown-user";

/// Users and their hashed passwords
pub struct CredentialStore {
    crypto_provider: Arc<CryptoProvider>,
    dummy_hash: OnceCell<String>,
}

impl CredentialStore {
    pub fn new(crypto_provider: Arc<CryptoProvider>) -> Self {
        Self {
            crypto_provider,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Hash with the live argon2 parameters, built on first use
    async fn dummy_hash(&self) -> Result<&str, InternalError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.crypto_provider.hash_password(DUMMY_PASSWORD))
            .await?;
        Ok(hash.as_str())
    }

    /// Add a new user with the given role
    ///
    /// Uniqueness is checked up front; the unique index catches a racing
    /// insert and maps to the same `DuplicateUsername` error.
    pub async fn add_user(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
        password: &str,
        role: Role,
        created_at: i64,
    ) -> Result<user::Model, InternalError> {
        let existing = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("check_username", e))?;

        if existing.is_some() {
            return Err(CredentialError::DuplicateUsername(username.to_string()).into());
        }

        let password_hash = self.crypto_provider.hash_password(password).await?;

        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            role: Set(role.as_str().to_string()),
            created_at: Set(created_at),
        };

        new_user.insert(conn).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                CredentialError::DuplicateUsername(username.to_string()).into()
            } else {
                InternalError::database("insert_user", e)
            }
        })
    }

    /// Verify a username/password pair and return the user row
    ///
    /// Unknown user and wrong password are indistinguishable to the caller,
    /// including in timing: an unknown name still pays for one verification.
    pub async fn verify_credentials(
        &self,
        conn: &impl ConnectionTrait,
        username: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| InternalError::database("find_user_for_login", e))?;

        let Some(user) = user else {
            let dummy_hash = self.dummy_hash().await?;
            self.crypto_provider.verify_password(dummy_hash, password).await?;
            tracing::debug!("Login failed: unknown username '{}'", username);
            return Err(CredentialError::InvalidCredentials.into());
        };

        if !self.crypto_provider.verify_password(&user.password_hash, password).await? {
            tracing::debug!("Login failed: wrong password for user {}", user.id);
            return Err(CredentialError::InvalidCredentials.into());
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{setup_test_db, test_crypto_provider};

    fn store() -> CredentialStore {
        CredentialStore::new(test_crypto_provider())
    }

    #[tokio::test]
    async fn test_add_user_hashes_password() {
        let db = setup_test_db().await;
        let user = store().add_user(&db, "alice", "pw", Role::Standard, 100).await.unwrap();

        assert_eq!(user.username, "alice");
        assert_eq!(user.role, "standard");
        assert_eq!(user.created_at, 100);
        assert_ne!(user.password_hash, "pw");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = setup_test_db().await;
        let store = store();
        store.add_user(&db, "alice", "pw", Role::Standard, 0).await.unwrap();

        let result = store.add_user(&db, "alice", "other", Role::Standard, 0).await;
        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::DuplicateUsername(_)))
        ));
    }

    #[tokio::test]
    async fn test_verify_credentials() {
        let db = setup_test_db().await;
        let store = store();
        let alice = store.add_user(&db, "alice", "secret", Role::Standard, 0).await.unwrap();

        let verified = store.verify_credentials(&db, "alice", "secret").await.unwrap();
        assert_eq!(verified.id, alice.id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let db = setup_test_db().await;
        let store = store();
        store.add_user(&db, "alice", "secret", Role::Standard, 0).await.unwrap();

        let wrong_password = store.verify_credentials(&db, "alice", "nope").await;
        let unknown_user = store.verify_credentials(&db, "mallory", "secret").await;

        for result in [wrong_password, unknown_user] {
            assert!(matches!(
                result,
                Err(InternalError::Credential(CredentialError::InvalidCredentials))
            ));
        }
    }

    #[tokio::test]
    async fn test_unknown_user_still_runs_a_verification() {
        let db = setup_test_db().await;
        let store = store();
        assert!(!store.dummy_hash.initialized());

        let result = store.verify_credentials(&db, "mallory", "secret").await;

        assert!(matches!(
            result,
            Err(InternalError::Credential(CredentialError::InvalidCredentials))
        ));
        let dummy_hash = store.dummy_hash.get().expect("dummy hash built for unknown user");
        assert!(dummy_hash.starts_with("$argon2id$"));
    }
}
