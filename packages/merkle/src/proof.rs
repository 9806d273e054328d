use digest::Digest;
use serde::{Deserialize, Serialize};

use crate::hash::{inner_hash, leaf_hash};

/// Which side of the parent a sibling hash occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// One proof level: a sibling hash and the side it occupies under its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofStep {
    pub hash: Vec<u8>,
    pub side: Side,
}

/// Inclusion proof for a single item, ordered leaf to root.
///
/// A proof is a standalone value: once generated it can be serialized,
/// shipped, and checked against a root commitment with no reference to the
/// tree that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    pub steps: Vec<ProofStep>,
}

impl Proof {
    /// Folds the steps over `item`'s digest, reconstructing the root
    /// commitment this proof leads to. A left sibling is prepended to the
    /// running hash, a right sibling appended.
    pub fn compute_root<D: Digest>(&self, item: &[u8]) -> Vec<u8> {
        let mut running = leaf_hash::<D>(item);
        for step in &self.steps {
            running = match step.side {
                Side::Left => inner_hash::<D>(&step.hash, &running),
                Side::Right => inner_hash::<D>(&running, &step.hash),
            };
        }
        running
    }

    /// Checks the proof against a claimed root commitment.
    ///
    /// Never fails: a corrupted, truncated, or otherwise malformed proof
    /// reconstructs a different root and returns `false`.
    pub fn verify<D: Digest>(&self, item: &[u8], root_hash: &[u8]) -> bool {
        self.compute_root::<D>(item) == root_hash
    }
}
