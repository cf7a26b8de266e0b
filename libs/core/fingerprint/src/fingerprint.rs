//! Stable listing fingerprints (§3, §4.1).

use sentinel_domain_models::Platform;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// A 128-bit digest identifying a listing across scans.
///
/// Truncated to the first 16 bytes of a SHA-256 digest — within the
/// spec's allowed 64- to 128-bit range, and reusing the one hashing
/// primitive already in the dependency stack rather than adding a
/// second hash for a narrower output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(#[serde(with = "hex_bytes")] [u8; 16]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 16], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 16], D::Error> {
        let text = String::deserialize(d)?;
        let decoded = hex::decode(&text).map_err(serde::de::Error::custom)?;
        decoded
            .try_into()
            .map_err(|_| serde::de::Error::custom("fingerprint must decode to 16 bytes"))
    }
}

/// Compute the fingerprint for a listing that has a canonical URL.
///
/// When the URL is absent (rare — §3), callers should use
/// [`fingerprint_from_fallback`] instead.
pub fn fingerprint(canonical_url: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(canonical_url.as_bytes());
    digest_to_fingerprint(hasher)
}

/// Fallback digest over `(platform, lower(trim(title)), price)` for
/// the rare listing with no usable URL (§4.1).
pub fn fingerprint_from_fallback(platform: Platform, title: &str, normalized_price_numeric: Option<f64>) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(platform.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(title.trim().to_lowercase().as_bytes());
    hasher.update(b"|");
    match normalized_price_numeric {
        Some(amount) => hasher.update(format!("{amount:.2}").as_bytes()),
        None => hasher.update(b"none"),
    }
    digest_to_fingerprint(hasher)
}

fn digest_to_fingerprint(hasher: Sha256) -> Fingerprint {
    let full = hasher.finalize();
    let mut truncated = [0u8; 16];
    truncated.copy_from_slice(&full[..16]);
    Fingerprint(truncated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_canonical_urls_produce_equal_fingerprints() {
        assert_eq!(fingerprint("https://x.test/p"), fingerprint("https://x.test/p"));
    }

    #[test]
    fn different_urls_produce_different_fingerprints() {
        assert_ne!(fingerprint("https://x.test/p"), fingerprint("https://x.test/q"));
    }

    #[test]
    fn hex_round_trips_through_serde() {
        let fp = fingerprint("https://x.test/p");
        let json = serde_json::to_string(&fp).unwrap();
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(fp, back);
    }

    #[test]
    fn fallback_is_deterministic_given_same_inputs() {
        let a = fingerprint_from_fallback(Platform::Ebay, "  Ivory Carving  ", Some(42.0));
        let b = fingerprint_from_fallback(Platform::Ebay, "ivory carving", Some(42.0));
        assert_eq!(a, b);
    }
}
