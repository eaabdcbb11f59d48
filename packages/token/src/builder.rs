//! Token builder API - entry point and chained configuration.
//!
//! The builder records options in the order they are set and assembles a
//! fresh [`Config`] for every `encode`/`decode` call, so one builder can be
//! kept around and shared between threads.

use crate::clock::{Clock, SystemClock};
use crate::config::{Config, JwtOption};
use crate::decode;
use crate::encode;
use crate::error::JwtResult;
use crate::types::{SignMethod, Token};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Entry point for token operations
pub struct Jwt;

impl Jwt {
    /// Empty builder reading the wall clock
    #[inline]
    #[must_use]
    pub fn builder() -> JwtBuilder {
        JwtBuilder::new()
    }

    /// Builder preset to HS256
    #[inline]
    #[must_use]
    pub fn hs256() -> JwtBuilder {
        JwtBuilder::new().with_sign_method(SignMethod::HS256)
    }

    /// Builder preset to HS512
    #[inline]
    #[must_use]
    pub fn hs512() -> JwtBuilder {
        JwtBuilder::new().with_sign_method(SignMethod::HS512)
    }
}

/// Chained token configuration with an injectable clock.
#[derive(Debug, Clone)]
pub struct JwtBuilder<C = SystemClock> {
    options: Vec<JwtOption>,
    clock: C,
}

impl JwtBuilder {
    /// Create an empty builder reading the wall clock
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            clock: SystemClock,
        }
    }
}

impl Default for JwtBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> JwtBuilder<C> {
    /// Set the sign method
    #[inline]
    #[must_use]
    pub fn with_sign_method(self, method: SignMethod) -> Self {
        self.with_option(JwtOption::sign_method(method))
    }

    /// Set the HMAC secret
    #[inline]
    #[must_use]
    pub fn with_secret(self, secret: impl AsRef<[u8]>) -> Self {
        self.with_option(JwtOption::key(secret))
    }

    /// Expire encoded tokens at an absolute instant
    #[inline]
    #[must_use]
    pub fn with_expires_at(self, at: DateTime<Utc>) -> Self {
        self.with_option(JwtOption::expires_at(at))
    }

    /// Expire encoded tokens `ttl` after encoding
    #[inline]
    #[must_use]
    pub fn with_ttl(self, ttl: Duration) -> Self {
        self.with_option(JwtOption::ttl(ttl))
    }

    /// Append a raw option
    #[inline]
    #[must_use]
    pub fn with_option(mut self, option: JwtOption) -> Self {
        self.options.push(option);
        self
    }

    /// Replace the time source
    #[inline]
    #[must_use]
    pub fn with_clock<K: Clock>(self, clock: K) -> JwtBuilder<K> {
        JwtBuilder {
            options: self.options,
            clock,
        }
    }

    /// Assemble the configuration the next call would use
    #[must_use]
    pub fn config(&self) -> Config {
        Config::from_options(self.options.iter().cloned())
    }

    /// Encode `data` into a signed token.
    ///
    /// # Errors
    /// See [`encode::encode`].
    pub fn encode<T: Serialize + ?Sized>(&self, data: &T) -> JwtResult<Token> {
        encode::encode(data, &self.config(), &self.clock)
    }

    /// Decode and validate `token`.
    ///
    /// # Errors
    /// See [`decode::decode`].
    pub fn decode<T: DeserializeOwned>(&self, token: impl AsRef<[u8]>) -> JwtResult<T> {
        decode::decode(token.as_ref(), &self.config(), &self.clock)
    }

    /// Decode `token` into `destination`, leaving it untouched on failure.
    ///
    /// # Errors
    /// See [`decode::decode`].
    pub fn decode_into<T: DeserializeOwned>(
        &self,
        token: impl AsRef<[u8]>,
        destination: &mut T,
    ) -> JwtResult<()> {
        decode::decode_into(token.as_ref(), destination, &self.config(), &self.clock)
    }
}
