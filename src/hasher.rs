//! Salted one-way hashing primitives behind a two-method capability trait.

use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::config::LocalConfig;
use crate::error::HashError;
use crate::model::{Algorithm, HashedPassword};

/// Work factors the app hashes and verifies with. bcrypt itself goes up to 31,
/// but anything above 16 stalls the UI thread for minutes or more.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 16;
pub const DEFAULT_COST: u32 = 10;

/// Largest Argon2 memory (KiB) and iteration counts accepted from a token.
pub const ARGON2_MAX_M_COST: u32 = 256 * 1024;
pub const ARGON2_MAX_T_COST: u32 = 16;

const BCRYPT_PREFIXES: [&str; 4] = ["$2a$", "$2b$", "$2x$", "$2y$"];

/// Any compliant salted hashing primitive.
///
/// `hash` draws a fresh salt on every call. `compare` re-derives the digest
/// with the salt and cost embedded in `token`; a token the primitive cannot
/// parse is reported as [`HashError::MalformedToken`].
pub trait SaltedHasher: Send + Sync {
    fn algorithm(&self) -> Algorithm;
    fn hash(&self, plain: &str) -> Result<HashedPassword, HashError>;
    fn compare(&self, plain: &str, token: &str) -> Result<bool, HashError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl SaltedHasher for BcryptHasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Bcrypt
    }

    fn hash(&self, plain: &str) -> Result<HashedPassword, HashError> {
        bcrypt::hash(plain, self.cost)
            .map(HashedPassword::new)
            .map_err(|e| HashError::Crypto(e.to_string()))
    }

    fn compare(&self, plain: &str, token: &str) -> Result<bool, HashError> {
        // The cost comes from the token, not from `self`.
        if let Some(cost) = token.get(4..6).and_then(|c| c.parse::<u32>().ok()) {
            if cost > MAX_COST {
                return Err(HashError::CostTooHigh(format!("bcrypt cost {cost}")));
            }
        }
        bcrypt::verify(plain, token).map_err(bcrypt_reason)
    }
}

/// Fixed messages only: several `BcryptError` variants embed the whole token.
fn bcrypt_reason(e: bcrypt::BcryptError) -> HashError {
    use bcrypt::BcryptError;

    let reason = match e {
        BcryptError::InvalidPrefix(_) => "unknown bcrypt version".to_string(),
        BcryptError::InvalidCost(_) => "unreadable cost".to_string(),
        BcryptError::CostNotAllowed(cost) => format!("cost {cost} not allowed"),
        BcryptError::InvalidHash(_) => "wrong length or layout".to_string(),
        BcryptError::InvalidBase64(_) => "invalid base64 in salt or digest".to_string(),
        _ => "unreadable bcrypt hash".to_string(),
    };
    HashError::MalformedToken(reason)
}

/// Argon2id with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl SaltedHasher for Argon2Hasher {
    fn algorithm(&self) -> Algorithm {
        Algorithm::Argon2
    }

    fn hash(&self, plain: &str) -> Result<HashedPassword, HashError> {
        // Generate a cryptographically secure random salt.
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| HashError::Crypto(e.to_string()))?
            .to_string();

        Ok(HashedPassword::new(hash))
    }

    fn compare(&self, plain: &str, token: &str) -> Result<bool, HashError> {
        let parsed =
            PasswordHash::new(token).map_err(|e| HashError::MalformedToken(e.to_string()))?;
        if parsed.salt.is_none() || parsed.hash.is_none() {
            return Err(HashError::MalformedToken("missing salt or digest".into()));
        }
        let m = parsed.params.get_decimal("m").unwrap_or(0);
        let t = parsed.params.get_decimal("t").unwrap_or(0);
        if m > ARGON2_MAX_M_COST || t > ARGON2_MAX_T_COST {
            return Err(HashError::CostTooHigh(format!("argon2 m={m}, t={t}")));
        }

        match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(HashError::MalformedToken(e.to_string())),
        }
    }
}

/// Tells the hash family from the token prefix.
pub fn algorithm_of(token: &str) -> Option<Algorithm> {
    if BCRYPT_PREFIXES.iter().any(|p| token.starts_with(p)) {
        Some(Algorithm::Bcrypt)
    } else if token.starts_with("$argon2") {
        Some(Algorithm::Argon2)
    } else {
        None
    }
}

/// A primitive able to check tokens of `algorithm`. The cost is irrelevant
/// for checking since it is read from the token.
pub fn verifier_for(algorithm: Algorithm) -> Box<dyn SaltedHasher> {
    match algorithm {
        Algorithm::Bcrypt => Box::new(BcryptHasher::new(DEFAULT_COST)),
        Algorithm::Argon2 => Box::new(Argon2Hasher),
    }
}

/// Builds the primitive selected in the configuration.
pub fn hasher_for(cfg: &LocalConfig) -> Box<dyn SaltedHasher> {
    match cfg.algorithm {
        Algorithm::Bcrypt => Box::new(BcryptHasher::new(cfg.cost)),
        Algorithm::Argon2 => Box::new(Argon2Hasher),
    }
}
