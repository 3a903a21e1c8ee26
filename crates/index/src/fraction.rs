//! Slicing fingerprints into equal-width fractions.
//!
//! Fraction `g` covers bits `[g * width, (g + 1) * width)`. Keys are the
//! sliced integer value; [`FractionLayout::split`] renders the same slices as
//! fixed-length bit strings, low bit first.

use simhash::{Fingerprint, FINGERPRINT_BITS};

use crate::IndexError;

/// How a 64-bit fingerprint is divided into index keys.
///
/// Only [`FractionLayout::new`] can build one, so `fraction_bits * fraction_count`
/// is always 64 and every shift in [`key`](Self::key) stays in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FractionLayout {
    fraction_count: usize,
    fraction_bits: u32,
    mask: u64,
}

impl FractionLayout {
    /// `fraction_count` must be a positive divisor of 64.
    pub fn new(fraction_count: usize) -> Result<Self, IndexError> {
        let bits = FINGERPRINT_BITS as usize;
        if fraction_count == 0 || bits % fraction_count != 0 {
            return Err(IndexError::InvalidFractionCount { fraction_count });
        }
        let fraction_bits = (bits / fraction_count) as u32;
        let mask = if fraction_bits == FINGERPRINT_BITS {
            u64::MAX
        } else {
            (1u64 << fraction_bits) - 1
        };
        Ok(Self {
            fraction_count,
            fraction_bits,
            mask,
        })
    }

    pub fn fraction_count(&self) -> usize {
        self.fraction_count
    }

    /// Bits per fraction (`64 / fraction_count`).
    pub fn fraction_bits(&self) -> u32 {
        self.fraction_bits
    }

    /// Integer key of fraction `index`.
    #[inline]
    pub fn key(&self, fp: Fingerprint, index: usize) -> u64 {
        let shift = index as u32 * self.fraction_bits;
        (fp.value() >> shift) & self.mask
    }

    /// Integer keys of every fraction, in fraction order.
    pub fn keys(&self, fp: Fingerprint) -> impl Iterator<Item = u64> + '_ {
        (0..self.fraction_count).map(move |i| self.key(fp, i))
    }

    /// Fractions rendered as `fraction_bits`-long strings of `'0'`/`'1'`.
    ///
    /// Character `j` of fraction `g` is bit `g * fraction_bits + j`, so the
    /// concatenation lists bits 0 through 63 in ascending order.
    pub fn split(&self, fp: Fingerprint) -> Vec<String> {
        self.keys(fp)
            .map(|key| {
                (0..self.fraction_bits)
                    .map(|j| if (key >> j) & 1 == 1 { '1' } else { '0' })
                    .collect()
            })
            .collect()
    }
}
