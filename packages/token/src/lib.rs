//! Compact HMAC-signed tokens
//!
//! Arbitrary serializable data is encoded as
//! `b64url(header).b64url(payload).b64url(signature)`:
//! - header `{"alg":"HS256","typ":"JWT"}`
//! - payload `{"d":<data>,"exp":<unix seconds>}`, `exp` omitted for tokens
//!   that never expire
//! - signature `HMAC(alg, key, b64url(header) + "." + b64url(payload))`
//!
//! ```no_run
//! use chrono::Duration;
//! use cryypt_token::Jwt;
//!
//! # fn main() -> cryypt_token::JwtResult<()> {
//! let tokens = Jwt::hs256().with_secret(b"secret").with_ttl(Duration::hours(1));
//! let token = tokens.encode(&serde_json::json!({"user": "alice"}))?;
//! let data: serde_json::Value = tokens.decode(&token)?;
//! # Ok(())
//! # }
//! ```
//!
//! Time is read through a [`Clock`]; swap in a [`FixedClock`] for
//! deterministic expiry.

pub mod algorithms;
pub mod builder;
pub(crate) mod claims;
pub mod clock;
pub mod config;
pub mod decode;
pub mod encode;
mod error;
mod types;

pub use builder::{Jwt, JwtBuilder};
pub use claims::TOKEN_TYPE;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, JwtOption};
pub use decode::{decode, decode_into, decode_with_options};
pub use encode::{encode, encode_with_options};
pub use error::*;
pub use types::*;
