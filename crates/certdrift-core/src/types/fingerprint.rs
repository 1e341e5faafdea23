//! Content fingerprints and the drift verdict.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of a SHA-256 digest in bytes.
pub const FINGERPRINT_LEN: usize = 32;

/// SHA-256 digest over the exact bytes of an artifact.
///
/// Equality is byte-exact. Displays and serializes as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; FINGERPRINT_LEN]);

impl Fingerprint {
    /// Wrap a raw digest.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; FINGERPRINT_LEN]) -> Self {
        Self(bytes)
    }

    /// Lowercase hex encoding.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex digest.
    pub fn from_hex(s: &str) -> Option<Self> {
        let mut bytes = [0u8; FINGERPRINT_LEN];
        hex::decode_to_slice(s, &mut bytes).ok()?;
        Some(Self(bytes))
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid SHA-256 hex digest: {s}")))
    }
}

/// Outcome of comparing the results artifact against the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Inventory is byte-identical to the baseline
    Match,
    /// Inventory differs from the baseline
    Drift,
}

impl Verdict {
    /// Derive the verdict from two fingerprints.
    #[must_use]
    pub fn from_fingerprints(results: &Fingerprint, baseline: &Fingerprint) -> Self {
        if results == baseline {
            Self::Match
        } else {
            Self::Drift
        }
    }

    /// Returns true for [`Verdict::Drift`]
    #[must_use]
    pub const fn is_drift(self) -> bool {
        matches!(self, Self::Drift)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "MATCH"),
            Self::Drift => write!(f, "DRIFT"),
        }
    }
}

/// Both fingerprints and the verdict derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Fingerprint of the freshly written results artifact
    pub results: Fingerprint,
    /// Fingerprint of the operator-approved baseline
    pub baseline: Fingerprint,
    /// Match or drift
    pub verdict: Verdict,
}

impl Comparison {
    /// Build a comparison from the two fingerprints.
    #[must_use]
    pub fn new(results: Fingerprint, baseline: Fingerprint) -> Self {
        Self {
            results,
            baseline,
            verdict: Verdict::from_fingerprints(&results, &baseline),
        }
    }
}
