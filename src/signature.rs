//! Webhook payload signing and verification.
//!
//! The service signs each webhook delivery with HMAC-SHA1 and sends the
//! Base64 digest in the `X-Pearl-API-Signature` header. The HMAC key is
//! not the shared secret itself but a value derived from it, so the raw
//! secret is never handed to the signing primitive. SHA-1 is mandated by
//! the service protocol.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::{PearlError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Derives the HMAC key from the shared secret.
///
/// SHA-256 over `"{secret}:reference_token"`, rendered as uppercase hex.
/// The hex text itself (UTF-8) is the key, not the digest bytes.
fn derive_hmac_key(secret: &str) -> String {
    let digest = Sha256::digest(format!("{secret}:reference_token").as_bytes());
    hex::encode_upper(digest)
}

fn signing_mac(secret: &str) -> Result<HmacSha1> {
    if secret.is_empty() {
        return Err(PearlError::InvalidArgument(
            "webhook secret cannot be empty".to_owned(),
        ));
    }
    let key = derive_hmac_key(secret);
    match HmacSha1::new_from_slice(key.as_bytes()) {
        Ok(mac) => Ok(mac),
        Err(_) => unreachable!("HMAC key can be of any size, as per crate documentation"),
    }
}

/// Computes the Base64-encoded HMAC-SHA1 signature for a payload.
///
/// The output is always 28 characters: a 20-byte digest in padded
/// standard Base64. Fails with [`PearlError::InvalidArgument`] when the
/// secret is empty.
pub fn compute_signature(secret: &str, payload: &str) -> Result<String> {
    let mut mac = signing_mac(secret)?;
    mac.update(payload.as_bytes());
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Verifies a received webhook signature against the raw payload.
///
/// Fails with [`PearlError::InvalidArgument`] when any argument is empty.
/// Malformed Base64 in `received` or a digest length mismatch resolves to
/// `Ok(false)`, never an error: tampered or garbage input reads as
/// invalid rather than crashing the receiver. The digest comparison runs
/// in constant time.
pub fn verify_signature(received: &str, payload: &str, secret: &str) -> Result<bool> {
    if received.is_empty() || payload.is_empty() || secret.is_empty() {
        return Err(PearlError::InvalidArgument(
            "missing required parameters for webhook signature verification".to_owned(),
        ));
    }

    let Ok(received_bytes) = BASE64.decode(received) else {
        return Ok(false);
    };

    let mut mac = signing_mac(secret)?;
    mac.update(payload.as_bytes());
    Ok(mac.verify_slice(&received_bytes).is_ok())
}

#[cfg(test)]
mod tests {
    use super::{compute_signature, derive_hmac_key, verify_signature};
    use crate::PearlError;

    const SECRET: &str = "testsecret123456789012345678901234567890-1";
    const PAYLOAD: &str = r#"{"id":"test1234","message":"hello"}"#;

    #[test]
    fn signature_is_28_char_base64() {
        let signature = compute_signature(SECRET, PAYLOAD).expect("must sign");
        assert_eq!(signature.len(), 28);
        assert!(signature.ends_with('='));
    }

    #[test]
    fn computed_signature_verifies() {
        let signature = compute_signature(SECRET, PAYLOAD).expect("must sign");
        let valid = verify_signature(&signature, PAYLOAD, SECRET).expect("must verify");
        assert!(valid);
    }

    #[test]
    fn tampered_payload_fails_verification() {
        let signature = compute_signature(SECRET, PAYLOAD).expect("must sign");
        let tampered = r#"{"id":"test1234","message":"hello_tampered"}"#;
        let valid = verify_signature(&signature, tampered, SECRET).expect("must verify");
        assert!(!valid);
    }

    #[test]
    fn signatures_are_deterministic() {
        let first = compute_signature(SECRET, PAYLOAD).expect("must sign");
        let second = compute_signature(SECRET, PAYLOAD).expect("must sign");
        assert_eq!(first, second);
    }

    #[test]
    fn different_secrets_produce_different_signatures() {
        let first = compute_signature("secret1", PAYLOAD).expect("must sign");
        let second = compute_signature("secret2", PAYLOAD).expect("must sign");
        assert_ne!(first, second);
    }

    #[test]
    fn single_byte_payload_change_changes_signature() {
        let first = compute_signature(SECRET, "payload-a").expect("must sign");
        let second = compute_signature(SECRET, "payload-b").expect("must sign");
        assert_ne!(first, second);
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = compute_signature("", PAYLOAD).expect_err("must fail");
        assert!(matches!(err, PearlError::InvalidArgument(_)));
    }

    #[test]
    fn verification_rejects_empty_arguments() {
        for (received, payload, secret) in [
            ("", PAYLOAD, SECRET),
            ("any-sig", "", SECRET),
            ("any-sig", PAYLOAD, ""),
        ] {
            let err = verify_signature(received, payload, secret).expect_err("must fail");
            assert!(matches!(err, PearlError::InvalidArgument(_)));
        }
    }

    #[test]
    fn malformed_base64_is_invalid_not_an_error() {
        let valid = verify_signature("not-valid-base64!", PAYLOAD, SECRET).expect("must verify");
        assert!(!valid);
    }

    #[test]
    fn wrong_digest_length_is_invalid_not_an_error() {
        // "AQID" decodes to 3 bytes, not the 20 of a SHA-1 digest.
        let valid = verify_signature("AQID", PAYLOAD, SECRET).expect("must verify");
        assert!(!valid);
    }

    #[test]
    fn derived_key_is_uppercase_hex_of_sha256() {
        let key = derive_hmac_key("abc");
        assert_eq!(key.len(), 64);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
        assert_ne!(key, derive_hmac_key("abd"));
    }
}
