//! Decoder rejection paths and the order in which they are checked

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Duration;
use cryypt_token::{FixedClock, Jwt, JwtBuilder, JwtError, SignMethod, algorithms};

const T: i64 = 1_700_000_000;
const KEY: &[u8] = b"0123456789abcdef0123456789abcdef";

fn at(offset: i64) -> FixedClock {
    FixedClock::at_timestamp(T + offset).unwrap()
}

fn hs256() -> JwtBuilder<FixedClock> {
    Jwt::hs256().with_secret(KEY).with_clock(at(0))
}

fn b64(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Sign raw header and payload JSON exactly as given.
fn forge(method: SignMethod, header: &str, payload: &str) -> String {
    let signing_input = format!("{}.{}", b64(header.as_bytes()), b64(payload.as_bytes()));
    let signature = algorithms::sign(Some(method), KEY, signing_input.as_bytes()).unwrap();
    format!("{signing_input}.{}", b64(&signature))
}

fn segments(token: &str) -> Vec<String> {
    token.split('.').map(str::to_string).collect()
}

fn decode_value(tokens: &JwtBuilder<FixedClock>, token: &str) -> Result<serde_json::Value, JwtError> {
    tokens.decode(token)
}

#[test]
fn test_wrong_segment_count() {
    let tokens = hs256();
    let token = tokens.encode("x").unwrap();
    let parts = segments(token.as_str());

    for candidate in [
        String::new(),
        parts[0].clone(),
        format!("{}.{}", parts[0], parts[1]),
        format!("{}.x", token.as_str()),
        format!("{}.", token.as_str()),
    ] {
        assert!(
            matches!(decode_value(&tokens, &candidate), Err(JwtError::InvalidToken(_))),
            "accepted {candidate:?}"
        );
    }
}

#[test]
fn test_bad_header_or_payload_encoding() {
    let tokens = hs256();
    let parts = segments(tokens.encode("x").unwrap().as_str());

    let bad_header = format!("!!!.{}.{}", parts[1], parts[2]);
    let bad_payload = format!("{}.!!!.{}", parts[0], parts[2]);
    let padded_header = format!("{}=.{}.{}", parts[0], parts[1], parts[2]);
    let not_json = format!("{}.{}.{}", b64(b"not json"), parts[1], parts[2]);

    for candidate in [bad_header, bad_payload, padded_header, not_json] {
        assert!(
            matches!(decode_value(&tokens, &candidate), Err(JwtError::InvalidToken(_))),
            "accepted {candidate:?}"
        );
    }
}

#[test]
fn test_signed_array_segments_are_invalid() {
    let tokens = hs256();
    let array_header = forge(SignMethod::HS256, r#"["HS256","JWT"]"#, r#"{"d":"bob"}"#);
    let array_payload = forge(
        SignMethod::HS256,
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"["alice", 5]"#,
    );
    let object_form = forge(
        SignMethod::HS256,
        r#"{"alg":"HS256","typ":"JWT"}"#,
        r#"{"d":"bob"}"#,
    );

    assert!(matches!(
        decode_value(&tokens, &array_header),
        Err(JwtError::InvalidToken(_))
    ));
    assert!(matches!(
        decode_value(&tokens, &array_payload),
        Err(JwtError::InvalidToken(_))
    ));
    assert_eq!(decode_value(&tokens, &object_form), Ok(serde_json::json!("bob")));
}

#[test]
fn test_bad_signature_encoding() {
    let tokens = hs256();
    let parts = segments(tokens.encode("x").unwrap().as_str());
    let token = format!("{}.{}.!!!", parts[0], parts[1]);
    assert_eq!(decode_value(&tokens, &token), Err(JwtError::SignatureInvalid));
}

#[test]
fn test_every_signature_bit_flip_is_rejected() {
    let tokens = hs256();
    let parts = segments(tokens.encode(&serde_json::json!({"user": "alice"})).unwrap().as_str());
    let signature = URL_SAFE_NO_PAD.decode(&parts[2]).unwrap();

    for bit in 0..signature.len() * 8 {
        let mut flipped = signature.clone();
        flipped[bit / 8] ^= 1 << (bit % 8);
        let token = format!("{}.{}.{}", parts[0], parts[1], b64(&flipped));
        assert_eq!(
            decode_value(&tokens, &token),
            Err(JwtError::SignatureInvalid),
            "bit {bit} flip accepted"
        );
    }
}

#[test]
fn test_truncated_signature() {
    let tokens = hs256();
    let parts = segments(tokens.encode("x").unwrap().as_str());
    let signature = URL_SAFE_NO_PAD.decode(&parts[2]).unwrap();
    let token = format!("{}.{}.{}", parts[0], parts[1], b64(&signature[..16]));
    assert_eq!(decode_value(&tokens, &token), Err(JwtError::SignatureInvalid));
}

#[test]
fn test_wrong_key() {
    let token = hs256().encode("x").unwrap();
    let other = Jwt::hs256().with_secret("another secret").with_clock(at(0));
    assert_eq!(other.decode::<String>(&token), Err(JwtError::SignatureInvalid));
}

#[test]
fn test_sign_method_mismatch() {
    let hs256_token = hs256().encode("x").unwrap();
    let hs512 = Jwt::hs512().with_secret(KEY).with_clock(at(0));
    assert_eq!(
        hs512.decode::<String>(&hs256_token),
        Err(JwtError::SignMethodMismatched)
    );

    let hs512_token = hs512.encode("x").unwrap();
    assert_eq!(
        hs256().decode::<String>(&hs512_token),
        Err(JwtError::SignMethodMismatched)
    );
}

#[test]
fn test_unknown_algorithm_is_mismatched() {
    let token = forge(SignMethod::HS256, r#"{"alg":"none","typ":"JWT"}"#, r#"{"d":1}"#);
    assert_eq!(decode_value(&hs256(), &token), Err(JwtError::SignMethodMismatched));
}

#[test]
fn test_unset_sign_method_cannot_decode() {
    let token = forge(SignMethod::HS256, r#"{"alg":"","typ":"JWT"}"#, r#"{"d":1}"#);
    let unconfigured = Jwt::builder().with_secret(KEY).with_clock(at(0));
    assert_eq!(
        unconfigured.decode::<u8>(&token),
        Err(JwtError::InvalidSignMethod)
    );

    let real = hs256().encode(&1u8).unwrap();
    assert_eq!(
        unconfigured.decode::<u8>(&real),
        Err(JwtError::SignMethodMismatched)
    );
}

#[test]
fn test_wrong_type_is_invalid_even_when_signed() {
    let token = forge(SignMethod::HS256, r#"{"alg":"HS256","typ":"JWS"}"#, r#"{"d":1}"#);
    assert!(matches!(
        decode_value(&hs256(), &token),
        Err(JwtError::InvalidToken(_))
    ));
}

#[test]
fn test_signature_covers_original_bytes() {
    // Reordered fields and whitespace are accepted as signed
    let token = forge(
        SignMethod::HS256,
        r#"{ "typ": "JWT", "alg": "HS256" }"#,
        r#"{ "exp": 0, "d": {"user": "alice"} }"#,
    );
    assert_eq!(
        decode_value(&hs256(), &token),
        Ok(serde_json::json!({"user": "alice"}))
    );
}

#[test]
fn test_forged_expiry_fails_signature_before_expiry() {
    let tokens = Jwt::hs256()
        .with_secret(KEY)
        .with_ttl(Duration::seconds(60))
        .with_clock(at(0));
    let parts = segments(tokens.encode("x").unwrap().as_str());

    // Push the expiry out without re-signing, then decode after the real expiry
    let extended = b64(format!(r#"{{"d":"x","exp":{}}}"#, T + 3600).as_bytes());
    let token = format!("{}.{extended}.{}", parts[0], parts[2]);
    let later = tokens.clone().with_clock(at(120));
    assert_eq!(later.decode::<String>(&token), Err(JwtError::SignatureInvalid));

    // A correctly signed but expired token reports expiry
    let original = format!("{}.{}.{}", parts[0], parts[1], parts[2]);
    assert_eq!(later.decode::<String>(&original), Err(JwtError::TokenExpired));
}

#[test]
fn test_payload_type_mismatch() {
    let tokens = hs256();
    let token = tokens.encode(&serde_json::json!({"user": "alice"})).unwrap();
    assert!(matches!(
        tokens.decode::<Vec<u32>>(&token),
        Err(JwtError::InvalidToken(_))
    ));
}

#[test]
fn test_missing_data_decodes_as_null() {
    let token = forge(SignMethod::HS256, r#"{"alg":"HS256","typ":"JWT"}"#, "{}");
    assert_eq!(hs256().decode::<Option<String>>(&token), Ok(None));
    assert!(matches!(
        hs256().decode::<String>(&token),
        Err(JwtError::InvalidToken(_))
    ));
}

#[test]
fn test_failed_decode_leaves_destination_untouched() {
    let tokens = hs256();
    let token = tokens.encode(&serde_json::json!({"user": "alice"})).unwrap();
    let other = Jwt::hs256().with_secret("another secret").with_clock(at(0));

    let mut destination = vec![9u32, 9, 9];
    assert_eq!(
        other.decode_into(&token, &mut destination),
        Err(JwtError::SignatureInvalid)
    );
    assert!(tokens.decode_into(&token, &mut destination).is_err());
    assert_eq!(destination, vec![9, 9, 9]);
}

#[test]
fn test_error_classification() {
    assert!(JwtError::TokenExpired.is_token_rejection());
    assert!(JwtError::invalid_token("x").is_token_rejection());
    assert!(!JwtError::ConfigurationMalformed.is_token_rejection());
    assert!(!JwtError::InvalidSignMethod.is_token_rejection());
}
