//! Encode pipeline: `(config, data) -> b64(header).b64(payload).b64(signature)`

use crate::algorithms::{self, utils::base64_url_encode};
use crate::claims::{Header, Payload};
use crate::clock::Clock;
use crate::config::{Config, JwtOption};
use crate::error::{JwtError, JwtResult};
use crate::types::Token;
use serde::Serialize;

/// Encode `data` into a signed token.
///
/// The expiry claim is `expires_at` when configured, `now + ttl` when a TTL is
/// configured, and absent otherwise.
///
/// # Errors
/// - `JwtError::ConfigurationMalformed` if the expiry settings conflict, the
///   absolute expiry is not in the future, or the expiry lands on the epoch
/// - `JwtError::InvalidSignMethod` if no registered sign method is configured
/// - `JwtError::Internal` if `data` cannot be serialized
pub fn encode<T, C>(data: &T, config: &Config, clock: &C) -> JwtResult<Token>
where
    T: Serialize + ?Sized,
    C: Clock + ?Sized,
{
    config.validate(clock)?;
    let exp_time = config.expiration(clock)?;

    let method = config.sign_method().ok_or(JwtError::InvalidSignMethod)?;
    algorithms::warn_if_weak_key(method, config.key());

    let mut token = b64_json(&Header::new(method))?;
    token.push('.');
    token.push_str(&b64_json(&Payload { data, exp_time })?);

    let signature = algorithms::sign(Some(method), config.key(), token.as_bytes())?;
    token.push('.');
    token.push_str(&base64_url_encode(&signature));

    tracing::debug!(
        alg = %method,
        exp = exp_time,
        len = token.len(),
        "token encoded"
    );
    Ok(Token::new(token))
}

/// Assemble a configuration from `options` and encode `data` with it.
///
/// # Errors
/// See [`encode`].
pub fn encode_with_options<T, I, C>(data: &T, options: I, clock: &C) -> JwtResult<Token>
where
    T: Serialize + ?Sized,
    I: IntoIterator<Item = JwtOption>,
    C: Clock + ?Sized,
{
    encode(data, &Config::from_options(options), clock)
}

fn b64_json<T: Serialize + ?Sized>(value: &T) -> JwtResult<String> {
    let json = serde_json::to_vec(value).map_err(|e| JwtError::Internal(e.to_string()))?;
    Ok(base64_url_encode(&json))
}
