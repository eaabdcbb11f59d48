//! Decode pipeline: token bytes -> validated, deserialized data.
//!
//! Stages run in a fixed order and the first failure is terminal:
//!
//! 1. split into exactly three segments
//! 2. base64url/JSON-decode header and payload, base64url-decode the signature
//! 3. header checks: `typ`, configured algorithm, registered algorithm
//! 4. signature verification over the original `segment0.segment1` bytes
//! 5. expiry
//! 6. deserialization of the payload data into the caller's type
//!
//! The expiry claim is attacker controlled until the signature has been
//! verified, so stage 5 never runs before stage 4.

use crate::algorithms::{self, utils::base64_url_decode};
use crate::claims::{DecodedParts, RawHeader, RawPayload, TOKEN_TYPE, from_json_object};
use crate::clock::Clock;
use crate::config::{Config, JwtOption};
use crate::error::{JwtError, JwtResult};
use crate::types::SignMethod;
use serde::de::DeserializeOwned;

/// Decode and validate `token`, returning its payload data.
///
/// # Errors
/// - `JwtError::InvalidToken` for a wrong segment count, bad base64 in the
///   header or payload, a header or payload that is not a JSON object, a `typ`
///   other than `"JWT"`, or payload data that does not deserialize into `T`
/// - `JwtError::SignatureInvalid` if the signature segment is malformed or
///   does not match
/// - `JwtError::SignMethodMismatched` if the token's algorithm differs from
///   the configured one
/// - `JwtError::InvalidSignMethod` if the configured algorithm is unregistered
/// - `JwtError::TokenExpired` if the expiry claim has passed
pub fn decode<T, C>(token: &[u8], config: &Config, clock: &C) -> JwtResult<T>
where
    T: DeserializeOwned,
    C: Clock + ?Sized,
{
    let parts = split(token)?;
    let method = check_header(&parts.header, config)?;
    verify_signature(&parts, method, config.key())?;
    check_expiry(parts.payload.exp_time, clock)?;

    let data = serde_json::from_str(parts.payload.data_json())
        .map_err(|e| JwtError::InvalidToken(format!("payload data: {e}")))?;

    tracing::debug!(alg = %method, exp = parts.payload.exp_time, "token decoded");
    Ok(data)
}

/// Decode `token` into `destination`.
///
/// `destination` is only written when every stage succeeds.
///
/// # Errors
/// See [`decode`].
pub fn decode_into<T, C>(
    token: &[u8],
    destination: &mut T,
    config: &Config,
    clock: &C,
) -> JwtResult<()>
where
    T: DeserializeOwned,
    C: Clock + ?Sized,
{
    *destination = decode(token, config, clock)?;
    Ok(())
}

/// Assemble a configuration from `options` and decode `token` with it.
///
/// # Errors
/// See [`decode`].
pub fn decode_with_options<T, I, C>(token: &[u8], options: I, clock: &C) -> JwtResult<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = JwtOption>,
    C: Clock + ?Sized,
{
    decode(token, &Config::from_options(options), clock)
}

fn split(token: &[u8]) -> JwtResult<DecodedParts<'_>> {
    let mut segments = token.split(|b| *b == b'.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(JwtError::invalid_token("expected three segments"));
    };
    tracing::trace!("token split into segments");

    let header_json = base64_url_decode(header_b64)
        .map_err(|_| JwtError::invalid_token("header encoding"))?;
    let header: RawHeader =
        from_json_object(&header_json).ok_or_else(|| JwtError::invalid_token("header JSON"))?;

    let payload_json = base64_url_decode(payload_b64)
        .map_err(|_| JwtError::invalid_token("payload encoding"))?;
    let payload: RawPayload =
        from_json_object(&payload_json).ok_or_else(|| JwtError::invalid_token("payload JSON"))?;

    let signature = base64_url_decode(signature_b64).map_err(|_| JwtError::SignatureInvalid)?;

    Ok(DecodedParts {
        header,
        payload,
        signature,
        signing_input: &token[..header_b64.len() + 1 + payload_b64.len()],
    })
}

fn check_header(header: &RawHeader, config: &Config) -> JwtResult<SignMethod> {
    if header.typ != TOKEN_TYPE {
        return Err(JwtError::invalid_token("unexpected typ"));
    }
    let expected = config.sign_method().map_or("", SignMethod::as_str);
    if header.alg != expected {
        return Err(JwtError::SignMethodMismatched);
    }
    config
        .sign_method()
        .filter(|method| algorithms::is_registered(*method))
        .ok_or(JwtError::InvalidSignMethod)
}

fn verify_signature(parts: &DecodedParts<'_>, method: SignMethod, key: &[u8]) -> JwtResult<()> {
    if algorithms::verify(Some(method), key, parts.signing_input, &parts.signature)? {
        tracing::trace!(alg = %method, "signature verified");
        Ok(())
    } else {
        Err(JwtError::SignatureInvalid)
    }
}

fn check_expiry<C: Clock + ?Sized>(exp_time: i64, clock: &C) -> JwtResult<()> {
    if exp_time != 0 && clock.now().timestamp() > exp_time {
        return Err(JwtError::TokenExpired);
    }
    Ok(())
}
