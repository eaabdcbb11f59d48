//! HMAC-SHA2 signing primitives (HS256, HS384, HS512)

use crate::error::{JwtError, JwtResult};
use crate::types::SignMethod;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Sign with HMAC-SHA256 (HS256)
#[inline]
pub(crate) fn sign_hs256(key: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| JwtError::internal("HMAC-SHA256 key setup failed"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Sign with HMAC-SHA384 (HS384)
#[inline]
pub(crate) fn sign_hs384(key: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha384::new_from_slice(key)
        .map_err(|_| JwtError::internal("HMAC-SHA384 key setup failed"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Sign with HMAC-SHA512 (HS512)
#[inline]
pub(crate) fn sign_hs512(key: &[u8], message: &[u8]) -> JwtResult<Vec<u8>> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|_| JwtError::internal("HMAC-SHA512 key setup failed"))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Whether `key` is shorter than the hash output of `method`
pub(crate) fn is_weak_key(method: SignMethod, key: &[u8]) -> bool {
    key.len() < method.recommended_key_len()
}

/// Emit a warning when `key` is shorter than the hash output of `method`.
///
/// Short keys still work, HMAC accepts any length.
pub(crate) fn warn_if_weak_key(method: SignMethod, key: &[u8]) {
    if is_weak_key(method, key) {
        tracing::warn!(
            alg = %method,
            key_len = key.len(),
            recommended = method.recommended_key_len(),
            "HMAC key is shorter than the recommended length"
        );
    }
}
