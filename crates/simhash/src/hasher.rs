//! Token hashers for simhash fingerprinting.
//!
//! Every hasher is a pure function of `(bytes, seed)`: no per-process salt,
//! so fingerprints computed in different runs stay comparable.

use std::fmt;

use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Seed used by [`Murmur3Hasher::default`].
pub const MURMUR3_DEFAULT_SEED: u64 = 104_729;

const C1: u64 = 0x87c3_7b91_1142_53d5;
const C2: u64 = 0x4cf5_ad43_2745_937f;
const R1: u32 = 31;
const R2: u32 = 27;
const M: u64 = 5;
const N1: u64 = 0x52dc_e729;

/// Deterministic 64-bit hash of a token's bytes.
pub trait FingerprintHasher: Send + Sync + fmt::Debug {
    fn hash64(&self, bytes: &[u8]) -> u64;

    fn hash_str(&self, token: &str) -> u64 {
        self.hash64(token.as_bytes())
    }
}

/// MurmurHash3 with 64-bit output.
///
/// Mixes little-endian 8-byte blocks with the x64 constants, folds the tail,
/// xors in the input length and finishes with `fmix64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Murmur3Hasher {
    seed: u64,
}

impl Murmur3Hasher {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for Murmur3Hasher {
    fn default() -> Self {
        Self::new(MURMUR3_DEFAULT_SEED)
    }
}

impl FingerprintHasher for Murmur3Hasher {
    fn hash64(&self, bytes: &[u8]) -> u64 {
        murmur3_64(bytes, self.seed)
    }
}

/// xxh3-64 with a fixed seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Xxh3Hasher {
    seed: u64,
}

impl Xxh3Hasher {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl FingerprintHasher for Xxh3Hasher {
    fn hash64(&self, bytes: &[u8]) -> u64 {
        xxh3_64_with_seed(bytes, self.seed)
    }
}

/// MurmurHash3 64-bit over `data`.
pub fn murmur3_64(data: &[u8], seed: u64) -> u64 {
    let mut hash = seed;

    let mut blocks = data.chunks_exact(8);
    for block in &mut blocks {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(block);
        let k = mix_k(u64::from_le_bytes(buf));
        hash ^= k;
        hash = hash
            .rotate_left(R2)
            .wrapping_mul(M)
            .wrapping_add(N1);
    }

    let tail = blocks.remainder();
    if !tail.is_empty() {
        let mut k1 = 0u64;
        for (i, &byte) in tail.iter().enumerate() {
            k1 ^= u64::from(byte) << (8 * i);
        }
        hash ^= mix_k(k1);
    }

    hash ^= data.len() as u64;
    fmix64(hash)
}

#[inline]
fn mix_k(k: u64) -> u64 {
    k.wrapping_mul(C1).rotate_left(R1).wrapping_mul(C2)
}

#[inline]
fn fmix64(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xff51_afd7_ed55_8ccd);
    h ^= h >> 33;
    h = h.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    h ^ (h >> 33)
}
