//! MinHash signatures over whitespace tokens.
//!
//! Every token is hashed once with the configured 32-bit hash (FNV-1a by
//! default, or xxHash32) under the configured seed. Slot `i` of the signature is the minimum over all tokens of that hash
//! XORed with `i`.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh32::xxh32;

use crate::config::{HashKind, MinHashConfig};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Fixed-length MinHash signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(Vec<u32>);

impl Signature {
    pub fn from_slots(slots: Vec<u32>) -> Self {
        Self(slots)
    }

    pub fn slots(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Estimated Jaccard similarity against another signature.
    pub fn similarity(&self, other: &Signature) -> f64 {
        jaccard_similarity(self, other)
    }
}

/// Lowercased, whitespace-delimited tokens of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Compute the MinHash signature of `text`.
///
/// A text without tokens yields a signature with every slot at `u32::MAX`.
pub fn signature(text: &str, cfg: &MinHashConfig) -> Signature {
    let hashes: Vec<u32> = tokenize(text)
        .iter()
        .map(|token| hash_token(token.as_bytes(), cfg))
        .collect();

    let m = cfg.num_hashes;
    let mut slots = Vec::with_capacity(m);
    if cfg.use_parallel {
        (0..m)
            .into_par_iter()
            .map(|i| compute_slot(&hashes, i))
            .collect_into_vec(&mut slots);
    } else {
        slots.extend((0..m).map(|i| compute_slot(&hashes, i)));
    }
    Signature(slots)
}

/// 32-bit hash of one token under `cfg.hash_kind` and `cfg.seed`.
pub fn hash_token(bytes: &[u8], cfg: &MinHashConfig) -> u32 {
    match cfg.hash_kind {
        HashKind::Fnv1a => fnv1a32(bytes, cfg.seed),
        HashKind::Xxh32 => xxh32(bytes, cfg.seed),
    }
}

fn fnv1a32(bytes: &[u8], seed: u32) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS ^ seed, |h, &b| {
        (h ^ u32::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[inline]
fn compute_slot(token_hashes: &[u32], i: usize) -> u32 {
    // Slot index is folded into 32 bits before XOR.
    let key = i as u32;
    token_hashes
        .iter()
        .map(|&h| h ^ key)
        .min()
        .unwrap_or(u32::MAX)
}

/// Fraction of slots holding equal values.
///
/// Signatures of different lengths are compared over the longer length, so
/// missing slots count as mismatches. Two empty signatures are identical.
pub fn jaccard_similarity(a: &Signature, b: &Signature) -> f64 {
    let len = a.len().max(b.len());
    if len == 0 {
        return 1.0;
    }
    let matches = a
        .slots()
        .iter()
        .zip(b.slots())
        .filter(|(x, y)| x == y)
        .count();
    matches as f64 / len as f64
}
