//! Token error types

use thiserror::Error;

/// Token operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Token error kinds.
///
/// Every failure of the encode and decode pipelines maps onto exactly one of
/// these kinds. Validation is a pure decision procedure, so none of them are
/// retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// The sign method is unset or has no registered hash function
    #[error("invalid sign method")]
    InvalidSignMethod,

    /// Signature bytes are malformed or do not match
    #[error("signature invalid")]
    SignatureInvalid,

    /// The expiry claim has passed
    #[error("token expired")]
    TokenExpired,

    /// The token was signed with a different algorithm than the one configured
    #[error("sign method mismatched")]
    SignMethodMismatched,

    /// Conflicting or stale expiry configuration
    #[error("configuration malformed")]
    ConfigurationMalformed,

    /// Structural or format violation
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Unexpected collaborator failure
    #[error("internal error: {0}")]
    Internal(String),
}

impl JwtError {
    /// Create an invalid token error
    #[inline]
    #[must_use]
    pub fn invalid_token(msg: &str) -> Self {
        JwtError::InvalidToken(msg.to_string())
    }

    /// Create an internal error
    #[inline]
    #[must_use]
    pub fn internal(msg: &str) -> Self {
        JwtError::Internal(msg.to_string())
    }

    /// Whether this error was caused by the token rather than the local setup.
    ///
    /// Useful for transports that map caller mistakes and server
    /// misconfiguration to different responses.
    #[must_use]
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            JwtError::SignatureInvalid
                | JwtError::TokenExpired
                | JwtError::SignMethodMismatched
                | JwtError::InvalidToken(_)
        )
    }
}
