//! The two operations the forms run: hash a password, verify one against a token.

use std::time::Instant;

use crate::error::HashError;
use crate::hasher::{algorithm_of, verifier_for, SaltedHasher};
use crate::model::{HashedPassword, Verdict};

/// Hashes `plain` with a fresh salt. Primitive faults are returned as-is.
pub fn hash_password(
    hasher: &dyn SaltedHasher,
    plain: &str,
) -> Result<HashedPassword, HashError> {
    let started = Instant::now();
    let res = hasher.hash(plain);
    let elapsed_ms = started.elapsed().as_millis() as u64;
    match &res {
        Ok(_) => tracing::info!(
            algorithm = %hasher.algorithm(),
            elapsed_ms,
            "password hashed"
        ),
        Err(e) => tracing::error!(algorithm = %hasher.algorithm(), "hash failed: {e}"),
    }
    res
}

/// Checks `plain` against `token`. The token's prefix picks the primitive;
/// `hasher` is used when it already matches. A token no primitive can parse
/// is not valid, and the parse error is kept as a diagnostic.
pub fn verify_password(hasher: &dyn SaltedHasher, plain: &str, token: &str) -> Verdict {
    let token = token.trim();
    let Some(algorithm) = algorithm_of(token) else {
        tracing::debug!(token_len = token.len(), "malformed hash: unknown format");
        return Verdict::Malformed("unrecognised hash format".into());
    };

    let other;
    let verifier = if algorithm == hasher.algorithm() {
        hasher
    } else {
        other = verifier_for(algorithm);
        other.as_ref()
    };

    let verdict = match verifier.compare(plain, token) {
        Ok(true) => Verdict::Match,
        Ok(false) => Verdict::Mismatch,
        Err(HashError::MalformedToken(reason)) => Verdict::Malformed(reason),
        Err(e) => Verdict::Malformed(e.to_string()),
    };
    // The reason stays out of the log; only the outcome and sizes go in.
    match &verdict {
        Verdict::Malformed(_) => {
            tracing::debug!(%algorithm, token_len = token.len(), "malformed hash")
        }
        v => tracing::info!(%algorithm, valid = v.is_valid(), "password verified"),
    }
    verdict
}
