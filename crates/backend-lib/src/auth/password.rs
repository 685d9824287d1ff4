// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are stored as `hex(salt).hex(digest)`, where the digest is a
//! 32-byte scrypt output over the password and an 8-byte random salt.
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Salt length in bytes
pub const SALT_LEN: usize = 8;

/// Derived key length in bytes
pub const KEY_LEN: usize = 32;

/// Separator between the salt and digest components
pub const SEPARATOR: char = '.';

/// Errors raised while hashing
#[derive(Error, Debug)]
pub enum HashError {
    #[error("invalid scrypt parameters: {0}")]
    InvalidParams(String),

    #[error("key derivation failed: {0}")]
    Derivation(String),
}

/// Scrypt cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct HashParams {
    /// log2 of the CPU/memory cost `N`
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelization
    pub p: u32,
}

impl Default for HashParams {
    fn default() -> Self {
        // N = 16384, r = 8, p = 1
        Self {
            log_n: 14,
            r: 8,
            p: 1,
        }
    }
}

impl HashParams {
    fn to_scrypt(self) -> Result<scrypt::Params, HashError> {
        scrypt::Params::new(self.log_n, self.r, self.p, KEY_LEN)
            .map_err(|e| HashError::InvalidParams(e.to_string()))
    }

    /// Check that scrypt accepts these parameters
    pub fn validate(&self) -> Result<(), HashError> {
        self.to_scrypt().map(|_| ())
    }
}

/// Salted, deliberately slow password hasher.
///
/// Holds only its cost parameters, so it is cheap to clone into
/// blocking tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordHasher {
    params: HashParams,
}

impl PasswordHasher {
    pub fn new(params: HashParams) -> Result<Self, HashError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, HashError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let digest = self.derive(plain, &salt)?;
        Ok(format!("{}{SEPARATOR}{}", hex::encode(salt), hex::encode(digest)))
    }

    /// Verify a password against an encoded `salt.digest` string.
    ///
    /// Malformed input verifies as `false`.
    pub fn verify(&self, plain: &str, encoded: &str) -> bool {
        let Some((salt_hex, digest_hex)) = encoded.split_once(SEPARATOR) else {
            return false;
        };
        let (Ok(salt), Ok(stored)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };
        if salt.is_empty() || stored.len() != KEY_LEN {
            return false;
        }

        match self.derive(plain, &salt) {
            Ok(candidate) => candidate.as_slice().ct_eq(stored.as_slice()).into(),
            Err(_) => false,
        }
    }

    fn derive(&self, plain: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], HashError> {
        let params = self.params.to_scrypt()?;
        let mut out = [0u8; KEY_LEN];
        scrypt::scrypt(plain.as_bytes(), salt, &params, &mut out)
            .map_err(|e| HashError::Derivation(e.to_string()))?;
        Ok(out)
    }
}
