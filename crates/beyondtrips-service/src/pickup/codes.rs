//! QR token and verification code generation.
//!
//! Both codes are issued exactly once, at the `requested -> approved`
//! transition.

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Generate a QR token for an approved pickup (time plus random suffix).
pub fn generate_qr_token() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("BT-PICKUP-{}-{}", Utc::now().timestamp_millis(), suffix)
}

/// Generate a 6-digit verification code, zero-padded.
pub fn generate_verification_code() -> String {
    let code: u32 = rand::rng().random_range(0..1_000_000);
    format!("{code:06}")
}
