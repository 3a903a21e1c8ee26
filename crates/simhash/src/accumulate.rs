//! Weighted bit accumulation.
//!
//! Each token hash votes +1 or -1 on every bit position. The final bit is set
//! only for a strictly positive tally; a zero tally resolves to 0.

use rayon::prelude::*;

use crate::fingerprint::{Fingerprint, FINGERPRINT_BITS};
use crate::hasher::FingerprintHasher;

const WIDTH: usize = FINGERPRINT_BITS as usize;

type Weights = [i64; WIDTH];

/// Compute a fingerprint sequentially.
pub fn fingerprint_tokens<S, H>(tokens: &[S], hasher: &H) -> Fingerprint
where
    S: AsRef<str>,
    H: FingerprintHasher + ?Sized,
{
    let mut weights: Weights = [0; WIDTH];
    for token in tokens {
        vote(&mut weights, hasher.hash_str(token.as_ref()));
    }
    resolve(&weights)
}

/// Compute a fingerprint, splitting the token slice across the rayon pool.
///
/// Addition is commutative, so the result equals [`fingerprint_tokens`].
pub fn fingerprint_tokens_parallel<S, H>(tokens: &[S], hasher: &H) -> Fingerprint
where
    S: AsRef<str> + Sync,
    H: FingerprintHasher + ?Sized,
{
    let weights = tokens
        .par_iter()
        .fold(
            || [0i64; WIDTH],
            |mut acc, token| {
                vote(&mut acc, hasher.hash_str(token.as_ref()));
                acc
            },
        )
        .reduce(
            || [0i64; WIDTH],
            |mut left, right| {
                for (l, r) in left.iter_mut().zip(right.iter()) {
                    *l += *r;
                }
                left
            },
        );
    resolve(&weights)
}

#[inline]
fn vote(weights: &mut Weights, hash: u64) {
    for (i, w) in weights.iter_mut().enumerate() {
        if (hash >> i) & 1 == 1 {
            *w += 1;
        } else {
            *w -= 1;
        }
    }
}

#[inline]
fn resolve(weights: &Weights) -> Fingerprint {
    let mut out = 0u64;
    for (i, &w) in weights.iter().enumerate() {
        if w > 0 {
            out |= 1u64 << i;
        }
    }
    Fingerprint::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the token's bytes as a little-endian integer so bit patterns
    /// can be chosen by hand.
    #[derive(Debug)]
    struct LiteralHasher;

    impl FingerprintHasher for LiteralHasher {
        fn hash64(&self, bytes: &[u8]) -> u64 {
            let text = std::str::from_utf8(bytes).unwrap_or("0");
            u64::from_str_radix(text, 2).unwrap_or(0)
        }
    }

    #[test]
    fn single_token_reproduces_its_hash() {
        let fp = fingerprint_tokens(&["1011"], &LiteralHasher);
        assert_eq!(fp.value(), 0b1011);
    }

    #[test]
    fn majority_vote_per_bit() {
        // bit0: +1 +1 -1 => 1; bit1: -1 +1 +1 => 1; bit2: -1 -1 -1 => 0
        let fp = fingerprint_tokens(&["01", "11", "10"], &LiteralHasher);
        assert_eq!(fp.value(), 0b11);
    }

    #[test]
    fn ties_resolve_to_zero() {
        let fp = fingerprint_tokens(&["1", "0"], &LiteralHasher);
        assert_eq!(fp.value(), 0);
    }

    #[test]
    fn empty_input_is_zero() {
        let tokens: [&str; 0] = [];
        assert_eq!(fingerprint_tokens(&tokens, &LiteralHasher), Fingerprint::ZERO);
        assert_eq!(
            fingerprint_tokens_parallel(&tokens, &LiteralHasher),
            Fingerprint::ZERO
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let tokens: Vec<String> = (0..1000).map(|i| format!("{:b}", i * 7919)).collect();
        assert_eq!(
            fingerprint_tokens(&tokens, &LiteralHasher),
            fingerprint_tokens_parallel(&tokens, &LiteralHasher)
        );
    }
}
