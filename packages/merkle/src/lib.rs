mod error;
mod hash;
mod proof;
mod tree;

pub use self::error::MerkleError;
pub use self::proof::{Proof, ProofStep, Side};
pub use self::tree::{MerkleTree, Node, NodeId, Sha256Tree};

pub type Result<T> = std::result::Result<T, MerkleError>;
