use crate::auth::{
    AuthError, AuthService, Identity, IdentityStore, PasswordHasher, StoreError,
};
use crate::metrics::{SIGNIN_FAILED, SIGNIN_SUCCEEDED, SIGNUP_REJECTED, SIGNUP_SUCCEEDED};
use async_trait::async_trait;
use credentials_common::IdentityId;
use metrics::counter;
use zeroize::Zeroizing;

/// Authentication service over an [`IdentityStore`].
///
/// Holds no mutable state; scrypt work runs on the blocking pool.
pub struct DefaultAuth<S> {
    store: S,
    hasher: PasswordHasher,
}

impl<S: IdentityStore> DefaultAuth<S> {
    pub fn new(store: S, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let hasher = self.hasher;
        let password = Zeroizing::new(password.to_owned());
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
        Ok(hash)
    }

    async fn verify(&self, password: &str, encoded: &str) -> Result<bool, AuthError> {
        let hasher = self.hasher;
        let password = Zeroizing::new(password.to_owned());
        let encoded = encoded.to_owned();
        let ok = tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded)).await?;
        Ok(ok)
    }
}

#[async_trait]
impl<S: IdentityStore + 'static> AuthService for DefaultAuth<S> {
    #[tracing::instrument(skip(self, password))]
    async fn signup(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        if !self.store.find(email).await?.is_empty() {
            counter!(SIGNUP_REJECTED).increment(1);
            tracing::info!("signup rejected, email in use");
            return Err(AuthError::DuplicateIdentity {
                email: email.to_string(),
            });
        }

        let password_hash = self.hash(password).await?;

        let identity = match self.store.create(email, &password_hash).await {
            Ok(identity) => identity,
            // another signup for the same email won the race
            Err(StoreError::DuplicateEmail(email)) => {
                counter!(SIGNUP_REJECTED).increment(1);
                tracing::info!("signup rejected by store uniqueness constraint");
                return Err(AuthError::DuplicateIdentity { email });
            },
            Err(e) => return Err(e.into()),
        };

        counter!(SIGNUP_SUCCEEDED).increment(1);
        tracing::info!(id = %identity.id, "identity created");
        Ok(identity)
    }

    #[tracing::instrument(skip(self, password))]
    async fn signin(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let Some(identity) = self.store.find(email).await?.into_iter().next() else {
            counter!(SIGNIN_FAILED).increment(1);
            tracing::info!("signin for unknown email");
            return Err(AuthError::IdentityNotFound {
                email: email.to_string(),
            });
        };

        if !self.verify(password, &identity.password_hash).await? {
            counter!(SIGNIN_FAILED).increment(1);
            tracing::info!(id = %identity.id, "signin with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        counter!(SIGNIN_SUCCEEDED).increment(1);
        tracing::debug!(id = %identity.id, "signin succeeded");
        Ok(identity)
    }

    async fn identity(&self, id: IdentityId) -> Result<Option<Identity>, AuthError> {
        Ok(self.store.find_one(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{HashParams, InMemoryIdentityStore};
    use chrono::Utc;
    use std::sync::Arc;
    use uuid::Uuid;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(HashParams { log_n: 4, r: 8, p: 1 }).unwrap()
    }

    fn service() -> DefaultAuth<InMemoryIdentityStore> {
        DefaultAuth::new(InMemoryIdentityStore::new(), hasher())
    }

    /// Store whose `find` never sees anything, as if every lookup lost a race
    struct BlindStore(InMemoryIdentityStore);

    #[async_trait]
    impl IdentityStore for BlindStore {
        async fn find(&self, _email: &str) -> Result<Vec<Identity>, StoreError> {
            Ok(Vec::new())
        }

        async fn find_one(&self, id: IdentityId) -> Result<Option<Identity>, StoreError> {
            self.0.find_one(id).await
        }

        async fn create(&self, email: &str, password_hash: &str) -> Result<Identity, StoreError> {
            self.0.create(email, password_hash).await
        }
    }

    struct DownStore;

    #[async_trait]
    impl IdentityStore for DownStore {
        async fn find(&self, _email: &str) -> Result<Vec<Identity>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn find_one(&self, _id: IdentityId) -> Result<Option<Identity>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn create(&self, _email: &str, _hash: &str) -> Result<Identity, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_signup_stores_salted_hash() {
        let auth = service();
        let identity = auth.signup("adasd@mail.com", "asf").await.unwrap();

        assert_eq!(identity.email, "adasd@mail.com");
        assert_ne!(identity.password_hash, "asf");
        let (salt, hash) = identity.password_hash.split_once('.').unwrap();
        assert!(!salt.is_empty());
        assert!(!hash.is_empty());
    }

    #[tokio::test]
    async fn test_signup_with_email_in_use() {
        let auth = service();
        auth.signup("asdf@asdf.com", "asdf").await.unwrap();

        let err = auth.signup("asdf@asdf.com", "asdf").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity { ref email } if email == "asdf@asdf.com"));
        assert_eq!(auth.store().len(), 1);
    }

    #[tokio::test]
    async fn test_email_is_not_normalized() {
        let auth = service();
        auth.signup("asdf@asdf.com", "asdf").await.unwrap();
        auth.signup("ASDF@asdf.com", "asdf").await.unwrap();

        assert_eq!(auth.store().len(), 2);
    }

    #[tokio::test]
    async fn test_signin_with_unused_email() {
        let auth = service();
        let err = auth.signin("asdfg@asdf.com", "asdf").await.unwrap_err();
        assert!(matches!(err, AuthError::IdentityNotFound { .. }));
    }

    #[tokio::test]
    async fn test_signin_with_wrong_password() {
        let auth = service();
        auth.signup("ladsalsd@askda.com", "password1").await.unwrap();

        let err = auth.signin("ladsalsd@askda.com", "password").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_signin_with_correct_password() {
        let auth = service();
        let created = auth.signup("a@b.com", "secret").await.unwrap();
        let signed_in = auth.signin("a@b.com", "secret").await.unwrap();

        assert_eq!(created.id, signed_in.id);
        assert_eq!(signed_in.email, "a@b.com");
        assert_ne!(signed_in.password_hash, "secret");
    }

    #[tokio::test]
    async fn test_signin_uses_first_match() {
        let h = hasher();
        let first = Identity {
            id: Uuid::new_v4(),
            email: "dup@example.com".to_string(),
            password_hash: h.hash("first").unwrap(),
            created_at: Utc::now(),
        };
        let second = Identity {
            id: Uuid::new_v4(),
            password_hash: h.hash("second").unwrap(),
            ..first.clone()
        };
        let store = InMemoryIdentityStore::with_identities(vec![first.clone(), second]);
        let auth = DefaultAuth::new(store, h);

        assert_eq!(auth.signin("dup@example.com", "first").await.unwrap().id, first.id);
        assert!(matches!(
            auth.signin("dup@example.com", "second").await.unwrap_err(),
            AuthError::InvalidCredentials
        ));
    }

    #[tokio::test]
    async fn test_store_uniqueness_violation_is_duplicate_identity() {
        let inner = InMemoryIdentityStore::new();
        let auth = DefaultAuth::new(BlindStore(inner.clone()), hasher());
        auth.signup("race@example.com", "pw").await.unwrap();

        let err = auth.signup("race@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, AuthError::DuplicateIdentity { .. }));
        assert_eq!(inner.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_signups_create_one_identity() {
        let store = InMemoryIdentityStore::new();
        let auth = Arc::new(DefaultAuth::new(store.clone(), hasher()));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let auth = auth.clone();
                tokio::spawn(async move { auth.signup("same@example.com", "pw").await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => created += 1,
                Err(AuthError::DuplicateIdentity { .. }) => {},
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_infrastructure() {
        let auth = DefaultAuth::new(DownStore, hasher());

        assert!(matches!(
            auth.signup("a@b.com", "pw").await.unwrap_err(),
            AuthError::Infrastructure(_)
        ));
        assert!(matches!(
            auth.signin("a@b.com", "pw").await.unwrap_err(),
            AuthError::Infrastructure(_)
        ));
        assert!(auth.identity(Uuid::new_v4()).await.is_err());
    }

    #[tokio::test]
    async fn test_identity_lookup() {
        let auth = service();
        let created = auth.signup("who@example.com", "pw").await.unwrap();

        assert_eq!(auth.identity(created.id).await.unwrap(), Some(created));
        assert_eq!(auth.identity(Uuid::new_v4()).await.unwrap(), None);
    }
}
