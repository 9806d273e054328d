use std::marker::PhantomData;

use digest::Digest;
use log::{debug, trace};

use crate::error::MerkleError;
use crate::hash::{inner_hash, leaf_hash};
use crate::proof::{Proof, ProofStep, Side};
use crate::Result;

/// Index of a node in the tree's backing arena.
pub type NodeId = usize;

/// A single tree node: an item digest at the leaves, `digest(left || right)`
/// everywhere above. Carries either both children or none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    hash: Vec<u8>,
    children: Option<(NodeId, NodeId)>,
    parent: Option<NodeId>,
}

impl Node {
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Binary hash tree over an ordered collection of items, generic over the
/// digest doing the hashing.
///
/// Nodes live in a flat arena and reference each other by [`NodeId`]; the
/// leaves occupy ids `0..leaf_count` in item order, and the whole structure
/// is immutable once built.
#[derive(Debug)]
pub struct MerkleTree<D> {
    nodes: Vec<Node>,
    root: NodeId,
    leaf_count: usize,
    height: usize,
    _digest: PhantomData<D>,
}

/// [`MerkleTree`] over sha256, the usual instantiation.
pub type Sha256Tree = MerkleTree<sha2::Sha256>;

impl<D: Digest> MerkleTree<D> {
    /// Builds a tree over `items`, in order. Duplicate items become distinct
    /// leaves. Fails on an empty collection.
    pub fn build<I: AsRef<[u8]>>(items: &[I]) -> Result<Self> {
        if items.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut nodes: Vec<Node> = items
            .iter()
            .map(|item| Node {
                hash: leaf_hash::<D>(item.as_ref()),
                children: None,
                parent: None,
            })
            .collect();
        let leaf_count = nodes.len();

        let mut level: Vec<NodeId> = (0..nodes.len()).collect();
        let mut height = 1;
        // An odd leaf level is padded up front, which also gives a lone
        // leaf a parent to hang from.
        if level.len() % 2 != 0 {
            duplicate_last(&mut nodes, &mut level);
        }
        while level.len() > 1 {
            if level.len() % 2 != 0 {
                duplicate_last(&mut nodes, &mut level);
            }
            let mut parents = Vec::with_capacity(level.len() / 2);
            for pair in level.chunks_exact(2) {
                let (left, right) = (pair[0], pair[1]);
                let hash = inner_hash::<D>(&nodes[left].hash, &nodes[right].hash);
                let parent = nodes.len();
                nodes.push(Node {
                    hash,
                    children: Some((left, right)),
                    parent: None,
                });
                nodes[left].parent = Some(parent);
                nodes[right].parent = Some(parent);
                parents.push(parent);
            }
            level = parents;
            height += 1;
        }

        let root = level[0];
        debug!(
            "merkle tree built: {leaf_count} leaves, {} nodes, height {height}",
            nodes.len()
        );
        Ok(Self {
            nodes,
            root,
            leaf_count,
            height,
            _digest: PhantomData,
        })
    }

    /// Generates an inclusion proof for `item`.
    ///
    /// The item's digest is located by a depth-first search from the root,
    /// preferring left subtrees; the walk back up records each sibling hash
    /// and the side it occupies, leaf to root. Fails with
    /// [`MerkleError::NodeNotFound`] when no node carries the digest.
    pub fn prove(&self, item: &[u8]) -> Result<Proof> {
        let target = leaf_hash::<D>(item);
        let found = self.find_node(&target).ok_or(MerkleError::NodeNotFound)?;

        let mut steps = Vec::new();
        let mut current = found;
        while let Some(parent) = self.nodes[current].parent {
            steps.push(self.sibling_step(parent, current));
            current = parent;
        }
        trace!(
            "inclusion proof for {}: {} steps",
            hex::encode(&target),
            steps.len()
        );
        Ok(Proof { steps })
    }

    /// The root node.
    pub fn root(&self) -> &Node {
        &self.nodes[self.root]
    }

    /// The root commitment.
    pub fn root_hash(&self) -> &[u8] {
        &self.nodes[self.root].hash
    }

    /// The root commitment as lowercase hex, the usual display form.
    pub fn root_hex(&self) -> String {
        hex::encode(self.root_hash())
    }

    /// Looks up a node by id, for following `left`/`right`/`parent` links.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of items the tree was built over.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Number of levels, counting both the leaf level and the root.
    pub fn height(&self) -> usize {
        self.height
    }

    /// First node carrying `hash` in pre-order, if any.
    fn find_node(&self, hash: &[u8]) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id];
            if node.hash == hash {
                return Some(id);
            }
            if let Some((left, right)) = node.children {
                // right below left, so the left subtree is searched first
                stack.push(right);
                stack.push(left);
            }
        }
        None
    }

    fn sibling_step(&self, parent: NodeId, child: NodeId) -> ProofStep {
        match self.nodes[parent].children {
            Some((left, right)) if left == child => ProofStep {
                hash: self.nodes[right].hash.clone(),
                side: Side::Right,
            },
            Some((left, _)) => ProofStep {
                hash: self.nodes[left].hash.clone(),
                side: Side::Left,
            },
            None => unreachable!("node {child} points at parent {parent} which has no children"),
        }
    }
}

// Pads an odd level with a childless copy of its last node. The copy shares
// the hash only; the original keeps the lower id and the left slot of the
// pair, so searches resolve to the original first.
fn duplicate_last(nodes: &mut Vec<Node>, level: &mut Vec<NodeId>) {
    let last = level[level.len() - 1];
    let hash = nodes[last].hash.clone();
    let dup = nodes.len();
    nodes.push(Node {
        hash,
        children: None,
        parent: None,
    });
    level.push(dup);
}
