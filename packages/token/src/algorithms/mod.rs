//! Signature engine shared by the encode and decode pipelines.
//!
//! Signatures are `HMAC(hash(method), key, message)`. The hash function is
//! picked from a fixed registry keyed by [`SignMethod`]; a method without a
//! registry entry cannot sign or verify.

mod hmac;
pub(crate) mod utils;

use crate::error::{JwtError, JwtResult};
use crate::types::SignMethod;

pub(crate) use self::hmac::warn_if_weak_key;

type HmacFn = fn(&[u8], &[u8]) -> JwtResult<Vec<u8>>;

/// Hash-function registry. Extend alongside [`SignMethod`].
const REGISTRY: &[(SignMethod, HmacFn)] = &[
    (SignMethod::HS256, hmac::sign_hs256),
    (SignMethod::HS384, hmac::sign_hs384),
    (SignMethod::HS512, hmac::sign_hs512),
];

fn lookup(method: Option<SignMethod>) -> JwtResult<HmacFn> {
    let method = method.ok_or(JwtError::InvalidSignMethod)?;
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == method)
        .map(|(_, sign)| *sign)
        .ok_or(JwtError::InvalidSignMethod)
}

/// Whether `method` has a registered hash function
#[must_use]
pub fn is_registered(method: SignMethod) -> bool {
    lookup(Some(method)).is_ok()
}

/// Compute the HMAC signature of `message`.
///
/// # Errors
/// Returns `JwtError::InvalidSignMethod` if `method` is unset or unregistered.
pub fn sign(method: Option<SignMethod>, key: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    let sign = lookup(method)?;
    sign(key, message)
}

/// Recompute the signature of `message` and compare it to `expected` in
/// constant time.
///
/// # Errors
/// Returns `JwtError::InvalidSignMethod` if `method` is unset or unregistered.
pub fn verify(
    method: Option<SignMethod>,
    key: &[u8],
    message: &[u8],
    expected: &[u8],
) -> JwtResult<bool> {
    let computed = sign(method, key, message)?;
    Ok(utils::constant_time_eq(&computed, expected))
}
