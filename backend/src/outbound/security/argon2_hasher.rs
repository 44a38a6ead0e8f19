//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashes are stored in PHC string format so parameters and salt travel with
//! the hash and older hashes stay verifiable after a parameter change. Each
//! hash or verification runs on Tokio's blocking pool so a login never stalls
//! the worker serving other requests.

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use password_hash::rand_core::OsRng;
use password_hash::{
    Error as PhcError, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _,
    SaltString,
};
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id password hasher.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    params: Params,
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

impl Argon2PasswordHasher {
    /// Hasher using the recommended Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hasher using explicit cost parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }
}

fn argon2(params: Params) -> Argon2<'static> {
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
}

fn hash_blocking(params: Params, password: &str) -> Result<PasswordHash, PasswordHasherError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = argon2(params)
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHasherError::hash(err.to_string()))?
        .to_string();
    PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hash(err.to_string()))
}

fn verify_blocking(
    params: Params,
    password: &str,
    encoded: &str,
) -> Result<bool, PasswordHasherError> {
    let parsed = PhcHash::new(encoded)
        .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
    match argon2(params).verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(err) => Err(PasswordHasherError::hash(err.to_string())),
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHasherError>
where
    F: FnOnce() -> Result<T, PasswordHasherError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| PasswordHasherError::hash(format!("hashing task failed: {err}")))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.to_owned());
        run_blocking(move || hash_blocking(params, &password)).await
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let params = self.params.clone();
        let password = Zeroizing::new(password.to_owned());
        let encoded = hash.as_ref().to_owned();
        run_blocking(move || verify_blocking(params, &password, &encoded)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2PasswordHasher {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).expect("valid test params");
        Argon2PasswordHasher::with_params(params)
    }

    #[rstest]
    #[tokio::test]
    async fn hash_round_trips(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").await.expect("hash");
        assert!(hash.as_ref().starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_password_is_a_mismatch_not_an_error(hasher: Argon2PasswordHasher) {
        let hash = hasher.hash("correct horse").await.expect("hash");
        assert!(!hasher.verify("battery staple", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes(hasher: Argon2PasswordHasher) {
        let first = hasher.hash("same").await.expect("hash");
        let second = hasher.hash("same").await.expect("hash");
        assert_ne!(first.as_ref(), second.as_ref());
    }

    #[rstest]
    #[tokio::test]
    async fn unparseable_hash_is_reported(hasher: Argon2PasswordHasher) {
        let bogus = PasswordHash::new("not-a-phc-string").expect("non-empty");
        let err = hasher
            .verify("anything", &bogus)
            .await
            .expect_err("malformed hash must fail");
        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_from_other_parameters_still_verify(hasher: Argon2PasswordHasher) {
        let stronger = Argon2PasswordHasher::with_params(
            Params::new(Params::MIN_M_COST * 2, 2, 1, None).expect("valid params"),
        );
        let hash = stronger.hash("rotate me").await.expect("hash");
        assert!(hasher.verify("rotate me", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test(flavor = "current_thread")]
    async fn hashing_work_runs_off_the_calling_thread() {
        let caller = std::thread::current().id();

        let worker = run_blocking(|| Ok(std::thread::current().id()))
            .await
            .expect("blocking task completes");

        assert_ne!(worker, caller);
    }
}
