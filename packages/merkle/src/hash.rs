//! Leaf and inner hashing over the injected digest.
//!
//! Leaves and inner nodes share one digest with no domain separation, so an
//! inner hash is exactly `digest(left || right)` over the child hashes.

use digest::Digest;

/// digest(item)
pub(crate) fn leaf_hash<D: Digest>(item: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(item);
    hasher.finalize().to_vec()
}

/// digest(left || right)
pub(crate) fn inner_hash<D: Digest>(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut hasher = D::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().to_vec()
}
