//! Wire shapes of the header and payload segments.

use crate::types::SignMethod;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Constant `typ` header value
pub const TOKEN_TYPE: &str = "JWT";

/// Header as written by the encoder: `{"alg":"HS256","typ":"JWT"}`
#[derive(Debug, Serialize)]
pub(crate) struct Header {
    pub alg: SignMethod,
    pub typ: &'static str,
}

impl Header {
    pub(crate) fn new(alg: SignMethod) -> Self {
        Self {
            alg,
            typ: TOKEN_TYPE,
        }
    }
}

/// Header as read by the decoder.
///
/// `alg` stays a string so an unknown algorithm is classified by the header
/// checks rather than failing JSON decoding.
#[derive(Debug, Deserialize)]
pub(crate) struct RawHeader {
    pub alg: String,
    pub typ: String,
}

/// Payload as written by the encoder: `{"d":<data>,"exp":<unix secs>}`
#[derive(Debug, Serialize)]
pub(crate) struct Payload<'a, T: ?Sized> {
    #[serde(rename = "d")]
    pub data: &'a T,
    #[serde(rename = "exp", skip_serializing_if = "is_zero")]
    pub exp_time: i64,
}

/// Payload as read by the decoder, with `d` kept as unparsed JSON until the
/// destination type is known.
#[derive(Debug, Deserialize)]
pub(crate) struct RawPayload {
    #[serde(rename = "d", default)]
    pub data: Option<Box<RawValue>>,
    #[serde(rename = "exp", default)]
    pub exp_time: i64,
}

impl RawPayload {
    /// Serialized `d` field, `null` when absent
    pub(crate) fn data_json(&self) -> &str {
        self.data.as_deref().map_or("null", RawValue::get)
    }
}

/// Scratch structure holding a token's decoded segments during validation.
#[derive(Debug)]
pub(crate) struct DecodedParts<'a> {
    pub header: RawHeader,
    pub payload: RawPayload,
    pub signature: Vec<u8>,
    /// Exact bytes `segment0.segment1` the signature covers
    pub signing_input: &'a [u8],
}

/// Parse a segment that must be a JSON object.
///
/// Derived `Deserialize` also reads structs from arrays by position, which
/// the wire format does not allow.
pub(crate) fn from_json_object<T: DeserializeOwned>(json: &[u8]) -> Option<T> {
    let first = json.iter().find(|b| !b.is_ascii_whitespace())?;
    if *first != b'{' {
        return None;
    }
    serde_json::from_slice(json).ok()
}

fn is_zero(value: &i64) -> bool {
    *value == 0
}
