//! Composite submission key for duplicate review detection.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// SHA-256 key identifying one rider's review of one magazine copy.
///
/// The key hashes the magazine barcode together with the best available
/// client identifier, in order of preference: device fingerprint, then
/// lowercased email, then phone, then lowercased rater name. Two
/// submissions collide only when they agree on both the barcode and the
/// strongest identifier they carry, which is what the storage-layer
/// unique constraint on `(driver_id, magazine_barcode, submission_key)`
/// enforces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionKey(String);

impl SubmissionKey {
    /// Derive the key from a submission's barcode and rater identity.
    ///
    /// Blank identifiers are treated as absent so an empty fingerprint
    /// field falls through to the next identifier.
    pub fn derive(
        barcode: &str,
        device_fingerprint: Option<&str>,
        rater_email: Option<&str>,
        rater_phone: Option<&str>,
        rater_name: &str,
    ) -> Self {
        let identity = non_blank(device_fingerprint)
            .map(str::to_owned)
            .or_else(|| non_blank(rater_email).map(|e| e.to_lowercase()))
            .or_else(|| non_blank(rater_phone).map(str::to_owned))
            .unwrap_or_else(|| rater_name.trim().to_lowercase());

        let mut hasher = Sha256::new();
        hasher.update(barcode.trim().as_bytes());
        hasher.update(b"\x1f");
        hasher.update(identity.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Return the key as a hex string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key and return the hex string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubmissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
