//! Append-only signature store shared by every deduplication call.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::signature::{jaccard_similarity, Signature};

/// Ordered, append-only collection of accepted signatures.
///
/// The store never expires entries; it lives as long as its owner.
#[derive(Debug, Default)]
pub struct SignatureStore {
    signatures: RwLock<Vec<Signature>>,
}

impl SignatureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan under a read lock for the first stored signature whose similarity
    /// to `sig` is at least `threshold`. Returns that similarity.
    pub fn find_similar(&self, sig: &Signature, threshold: f64) -> Option<f64> {
        first_match(&self.read(), sig, threshold)
    }

    /// Append under a write lock.
    pub fn append(&self, sig: Signature) {
        self.write().push(sig);
    }

    /// Scan and append while holding a single write lock.
    ///
    /// Returns `Err(similarity)` when a stored signature matches, leaving the
    /// store untouched; otherwise appends and returns `Ok(())`.
    pub fn insert_if_unique(&self, sig: Signature, threshold: f64) -> Result<(), f64> {
        let mut guard = self.write();
        if let Some(sim) = first_match(&guard, &sig, threshold) {
            return Err(sim);
        }
        guard.push(sig);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the stored signatures in insertion order.
    pub fn snapshot(&self) -> Vec<Signature> {
        self.read().clone()
    }

    /// Drop every stored signature.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Signature>> {
        self.signatures
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Signature>> {
        self.signatures
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn first_match(stored: &[Signature], sig: &Signature, threshold: f64) -> Option<f64> {
    stored
        .iter()
        .map(|candidate| jaccard_similarity(sig, candidate))
        .find(|&sim| sim >= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(slots: &[u32]) -> Signature {
        Signature::from_slots(slots.to_vec())
    }

    #[test]
    fn empty_store_finds_nothing() {
        let store = SignatureStore::new();
        assert!(store.is_empty());
        assert_eq!(store.find_similar(&sig(&[1, 2, 3, 4]), 0.0), None);
    }

    #[test]
    fn find_similar_reports_first_match() {
        let store = SignatureStore::new();
        store.append(sig(&[1, 2, 3, 4]));
        store.append(sig(&[1, 2, 3, 9]));

        assert_eq!(store.find_similar(&sig(&[1, 2, 3, 4]), 0.75), Some(1.0));
        assert_eq!(store.find_similar(&sig(&[1, 2, 7, 9]), 0.75), Some(0.75));
        assert_eq!(store.find_similar(&sig(&[5, 6, 7, 8]), 0.25), None);
    }

    #[test]
    fn insert_if_unique_rejects_without_mutation() {
        let store = SignatureStore::new();
        assert_eq!(store.insert_if_unique(sig(&[1, 2]), 0.5), Ok(()));
        assert_eq!(store.insert_if_unique(sig(&[1, 3]), 0.5), Err(0.5));
        assert_eq!(store.len(), 1);
        assert_eq!(store.insert_if_unique(sig(&[4, 3]), 0.5), Ok(()));
        assert_eq!(store.snapshot(), vec![sig(&[1, 2]), sig(&[4, 3])]);
    }

    #[test]
    fn clear_empties_the_store() {
        let store = SignatureStore::new();
        store.append(sig(&[1]));
        store.clear();
        assert_eq!(store.len(), 0);
    }
}
