//! Token configuration assembled from an ordered list of options.
//!
//! A [`Config`] is built fresh for every encode or decode call by applying
//! [`JwtOption`]s in order, then validated once. Later options overwrite
//! earlier ones that touch the same field.

use crate::clock::Clock;
use crate::error::{JwtError, JwtResult};
use crate::types::SignMethod;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use zeroize::Zeroizing;

/// A single configuration setting.
#[derive(Clone)]
pub enum JwtOption {
    /// Hash algorithm used inside HMAC
    SignMethod(SignMethod),
    /// HMAC secret
    Key(Zeroizing<Vec<u8>>),
    /// Absolute expiry
    ExpiresAt(DateTime<Utc>),
    /// Expiry relative to encode time
    Ttl(Duration),
}

impl JwtOption {
    /// Set the sign method
    #[must_use]
    pub fn sign_method(method: SignMethod) -> Self {
        JwtOption::SignMethod(method)
    }

    /// Set the HMAC secret
    #[must_use]
    pub fn key(key: impl AsRef<[u8]>) -> Self {
        JwtOption::Key(Zeroizing::new(key.as_ref().to_vec()))
    }

    /// Expire tokens at an absolute instant
    #[must_use]
    pub fn expires_at(at: DateTime<Utc>) -> Self {
        JwtOption::ExpiresAt(at)
    }

    /// Expire tokens `ttl` after they are encoded
    #[must_use]
    pub fn ttl(ttl: Duration) -> Self {
        JwtOption::Ttl(ttl)
    }

    fn apply(self, config: &mut Config) {
        match self {
            JwtOption::SignMethod(method) => config.sign_method = Some(method),
            JwtOption::Key(key) => config.key = key,
            JwtOption::ExpiresAt(at) => config.expires_at = Some(at),
            JwtOption::Ttl(ttl) => config.ttl = Some(ttl),
        }
    }
}

impl fmt::Debug for JwtOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JwtOption::SignMethod(method) => f.debug_tuple("SignMethod").field(method).finish(),
            JwtOption::Key(_) => f.write_str("Key(<redacted>)"),
            JwtOption::ExpiresAt(at) => f.debug_tuple("ExpiresAt").field(at).finish(),
            JwtOption::Ttl(ttl) => f.debug_tuple("Ttl").field(ttl).finish(),
        }
    }
}

/// Assembled token configuration.
///
/// An unset sign method is allowed here and only rejected when a signature
/// is computed. An unset key is the empty key.
#[derive(Clone, Default)]
pub struct Config {
    sign_method: Option<SignMethod>,
    key: Zeroizing<Vec<u8>>,
    expires_at: Option<DateTime<Utc>>,
    ttl: Option<Duration>,
}

impl Config {
    /// Apply `options` in order to an empty configuration.
    #[must_use]
    pub fn from_options<I>(options: I) -> Self
    where
        I: IntoIterator<Item = JwtOption>,
    {
        let mut config = Config::default();
        for option in options {
            option.apply(&mut config);
        }
        config
    }

    /// Configured sign method
    #[must_use]
    pub fn sign_method(&self) -> Option<SignMethod> {
        self.sign_method
    }

    /// HMAC secret
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Check the expiry settings.
    ///
    /// # Errors
    /// Returns `JwtError::ConfigurationMalformed` if both an absolute expiry
    /// and a TTL are set, or if the absolute expiry is not strictly after the
    /// clock's current time.
    pub fn validate<C: Clock + ?Sized>(&self, clock: &C) -> JwtResult<()> {
        if let Some(expires_at) = self.expires_at {
            if self.ttl.is_some() || expires_at <= clock.now() {
                return Err(JwtError::ConfigurationMalformed);
            }
        }
        Ok(())
    }

    /// Unix-seconds expiry claim for a token encoded now; `0` means no expiry.
    ///
    /// # Errors
    /// - `JwtError::ConfigurationMalformed` if a configured expiry lands on
    ///   the Unix epoch, which the claim cannot tell apart from no expiry
    /// - `JwtError::Internal` if `now + ttl` overflows the representable time
    ///   range
    pub fn expiration<C: Clock + ?Sized>(&self, clock: &C) -> JwtResult<i64> {
        let exp_time = match (self.expires_at, self.ttl) {
            (Some(expires_at), _) => expires_at.timestamp(),
            (None, Some(ttl)) => clock
                .now()
                .checked_add_signed(ttl)
                .map(|at| at.timestamp())
                .ok_or_else(|| JwtError::internal("expiry out of range"))?,
            (None, None) => return Ok(0),
        };
        if exp_time == 0 {
            return Err(JwtError::ConfigurationMalformed);
        }
        Ok(exp_time)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sign_method", &self.sign_method)
            .field("key", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("ttl", &self.ttl)
            .finish()
    }
}
