//! The 64-bit simhash fingerprint.
//!
//! Bit `i` of a fingerprint is read as `(value >> i) & 1`. The accumulator
//! stage and the fractioned index both rely on this convention.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of every fingerprint in bits.
pub const FINGERPRINT_BITS: u32 = u64::BITS;

/// A document fingerprint. Two documents with equal fingerprints are
/// indistinguishable to the deduplication layer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    pub const ZERO: Fingerprint = Fingerprint(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u64 {
        self.0
    }

    /// Bit `i`, `i` in `[0, 64)`.
    pub const fn bit(self, i: u32) -> bool {
        (self.0 >> i) & 1 == 1
    }

    /// Number of differing bit positions.
    pub const fn hamming(self, other: Fingerprint) -> u32 {
        hamming(self.0, other.0)
    }

    /// Binary rendering, most significant bit first, without leading zeros.
    pub fn to_binary_string(self) -> String {
        format!("{:b}", self.0)
    }
}

/// Hamming distance between two raw 64-bit values (popcount of XOR).
#[inline]
pub const fn hamming(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::Binary for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Binary::fmt(&self.0, f)
    }
}

impl fmt::LowerHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
