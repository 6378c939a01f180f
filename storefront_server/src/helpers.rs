//! Payment signature helpers.
//!
//! Razorpay signs its checkout callbacks with `HMAC_SHA256(key_secret, "<order_id>|<payment_id>")`, encoded as a
//! lowercase hex string. Verification recomputes the MAC and compares in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Computes the hex-encoded payment signature for the given order and payment ids.
pub fn calculate_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Checks a signature against the expected MAC for the order and payment ids.
///
/// The comparison runs in constant time. A signature that is not valid hex fails outright.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, signature: &str) -> bool {
    let Ok(sig_bytes) = hex::decode(signature) else {
        return false;
    };
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    mac.verify_slice(&sig_bytes).is_ok()
}
