//! Token type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HMAC sign method carried in the token's `alg` header field.
///
/// Each variant selects the hash function used inside HMAC. New variants need
/// a matching entry in the algorithm registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum SignMethod {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
}

impl SignMethod {
    /// Header `alg` value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SignMethod::HS256 => "HS256",
            SignMethod::HS384 => "HS384",
            SignMethod::HS512 => "HS512",
        }
    }

    /// Recommended minimum secret length in bytes (the hash output size)
    #[must_use]
    pub const fn recommended_key_len(self) -> usize {
        match self {
            SignMethod::HS256 => 32,
            SignMethod::HS384 => 48,
            SignMethod::HS512 => 64,
        }
    }
}

impl fmt::Display for SignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignMethod {
    type Err = crate::JwtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HS256" => Ok(SignMethod::HS256),
            "HS384" => Ok(SignMethod::HS384),
            "HS512" => Ok(SignMethod::HS512),
            _ => Err(crate::JwtError::InvalidSignMethod),
        }
    }
}

/// Encoded token: `b64(header).b64(payload).b64(signature)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub(crate) fn new(encoded: String) -> Self {
        Self(encoded)
    }

    /// Token text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token bytes, ready for a transport
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Consume the token into its bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0.into_bytes()
    }
}

impl AsRef<[u8]> for Token {
    fn as_ref(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
