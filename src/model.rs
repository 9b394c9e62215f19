use serde::{Deserialize, Serialize};
use std::fmt;

/// Which salted hashing primitive backs the forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bcrypt,
    Argon2,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Bcrypt, Algorithm::Argon2];

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Bcrypt => "bcrypt",
            Algorithm::Argon2 => "Argon2id",
        }
    }

    /// Parses the value of `PWHASH_ALGORITHM`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "bcrypt" => Some(Algorithm::Bcrypt),
            "argon2" | "argon2id" => Some(Algorithm::Argon2),
            _ => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Self-describing hash token (algorithm, cost, salt and digest in one string).
/// Opaque to the app; only the primitive parses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of checking a password against a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
    /// The token could not be parsed by the primitive. Counts as not valid.
    Malformed(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Match)
    }

    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Verdict::Malformed(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names() {
        assert_eq!(Algorithm::from_name("bcrypt"), Some(Algorithm::Bcrypt));
        assert_eq!(Algorithm::from_name(" Argon2 "), Some(Algorithm::Argon2));
        assert_eq!(Algorithm::from_name("argon2id"), Some(Algorithm::Argon2));
        assert_eq!(Algorithm::from_name("md5"), None);
    }

    #[test]
    fn algorithm_serde_is_lowercase() {
        let s = serde_json::to_string(&Algorithm::Argon2).unwrap();
        assert_eq!(s, "\"argon2\"");
        let a: Algorithm = serde_json::from_str("\"bcrypt\"").unwrap();
        assert_eq!(a, Algorithm::Bcrypt);
    }

    #[test]
    fn only_match_is_valid() {
        assert!(Verdict::Match.is_valid());
        assert!(!Verdict::Mismatch.is_valid());
        let m = Verdict::Malformed("bad prefix".into());
        assert!(!m.is_valid());
        assert_eq!(m.diagnostic(), Some("bad prefix"));
        assert_eq!(Verdict::Mismatch.diagnostic(), None);
    }
}
