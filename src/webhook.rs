//! Webhook signature verification.
//!
//! The server signs every webhook delivery with HMAC-SHA256 over the raw
//! payload body and places `sha256=<hex digest>` in the
//! [`SIGNATURE_HEADER`] header. Verify before trusting the payload; parsing
//! the payload itself is the caller's responsibility.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook payload signature.
pub const SIGNATURE_HEADER: &str = "X-Idswyft-Signature";

/// Prefix the server places before the hex digest.
pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Verify a webhook payload signature.
///
/// Strips an optional `sha256=` prefix, computes the hex HMAC-SHA256 digest
/// of `payload` keyed by `secret`, and compares in constant time. Fails
/// closed: returns `false` for any empty input or internal failure, never
/// panics.
///
/// Pure function; no client instance or network access required.
pub fn verify_signature(payload: &str, signature: &str, secret: &str) -> bool {
    if payload.is_empty() || signature.is_empty() || secret.is_empty() {
        return false;
    }

    let signature = signature.strip_prefix(SIGNATURE_PREFIX).unwrap_or(signature);

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(payload.as_bytes());
    let expected = hex::encode(mac.finalize().into_bytes());

    constant_time_compare(&expected, signature)
}

/// Sign a payload the way the server does, producing `sha256=<hex digest>`.
///
/// Useful for test doubles and local webhook tooling.
pub fn sign_payload(payload: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take any size key");
    mac.update(payload.as_bytes());
    format!("{SIGNATURE_PREFIX}{}", hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
