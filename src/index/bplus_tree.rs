//! B+Tree multi-map over an external value store
//!
//! Leaves hold sorted unique keys, each with a posting list of positions into
//! a [`ValueStore`]; inserting an existing key appends to its posting list.
//! Internal nodes hold separator keys: `children[i]` covers keys below
//! `keys[i]`, `children[i + 1]` covers keys at or above it.
//!
//! Overflowing nodes split on the way back up the insert recursion. A leaf
//! keeps `keys[..len / 2]` and promotes a copy of the right half's first key.
//! An internal node moves its pivot key `keys[(len - 1) / 2]` up without
//! keeping a copy. A root split grows the tree by one level, so every leaf
//! stays at the same depth.

use std::marker::PhantomData;

use crate::error::{GeoSearchError, Result};
use crate::index::value_store::{Position, ValueStore};

/// Index of the child to descend into: the first key strictly above `key`
fn find_branch<K: Ord>(keys: &[K], key: &K) -> usize {
    keys.partition_point(|k| k <= key)
}

#[derive(Clone, Debug)]
enum Node<K> {
    Internal(InternalNode<K>),
    Leaf(LeafNode<K>),
}

#[derive(Clone, Debug)]
struct InternalNode<K> {
    keys: Vec<K>,
    /// Always `keys.len() + 1` entries
    children: Vec<Node<K>>,
}

#[derive(Clone, Debug)]
struct LeafNode<K> {
    keys: Vec<K>,
    /// Parallel to `keys`
    postings: Vec<Vec<Position>>,
}

impl<K> Default for LeafNode<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            postings: Vec::new(),
        }
    }
}

/// A split travelling up to the parent
struct Split<K> {
    separator: K,
    right: Node<K>,
}

impl<K: Ord + Clone> Node<K> {
    fn insert(&mut self, key: K, position: Position, max_key_size: usize) -> Option<Split<K>> {
        match self {
            Node::Leaf(leaf) => leaf.insert(key, position, max_key_size),
            Node::Internal(internal) => {
                let branch = find_branch(&internal.keys, &key);
                let split = internal.children[branch].insert(key, position, max_key_size)?;
                internal.insert_child(split, max_key_size)
            }
        }
    }

    fn collect_range(&self, lower: &K, upper: &K, out: &mut Vec<Position>) {
        match self {
            Node::Leaf(leaf) => {
                let from = leaf.keys.partition_point(|k| k < lower);
                for (key, postings) in leaf.keys[from..].iter().zip(&leaf.postings[from..]) {
                    if key > upper {
                        break;
                    }
                    out.extend_from_slice(postings);
                }
            }
            Node::Internal(internal) => {
                // Children left of `from` only hold keys below `lower`. A separator
                // equal to `lower` routes right, so `find_branch` already skips it.
                let from = find_branch(&internal.keys, lower);
                for idx in from..internal.children.len() {
                    internal.children[idx].collect_range(lower, upper, out);
                    if internal.keys.get(idx).is_some_and(|k| k > upper) {
                        break;
                    }
                }
            }
        }
    }
}

impl<K: Ord + Clone> LeafNode<K> {
    fn insert(&mut self, key: K, position: Position, max_key_size: usize) -> Option<Split<K>> {
        match self.keys.binary_search(&key) {
            Ok(idx) => {
                self.postings[idx].push(position);
                return None;
            }
            Err(idx) => {
                self.keys.insert(idx, key);
                self.postings.insert(idx, vec![position]);
            }
        }

        if self.keys.len() <= max_key_size {
            return None;
        }

        let mid = self.keys.len() / 2;
        let right = LeafNode {
            keys: self.keys.split_off(mid),
            postings: self.postings.split_off(mid),
        };
        Some(Split {
            separator: right.keys[0].clone(),
            right: Node::Leaf(right),
        })
    }
}

impl<K: Ord> InternalNode<K> {
    fn insert_child(&mut self, split: Split<K>, max_key_size: usize) -> Option<Split<K>> {
        let branch = find_branch(&self.keys, &split.separator);
        self.keys.insert(branch, split.separator);
        self.children.insert(branch + 1, split.right);

        if self.keys.len() <= max_key_size {
            return None;
        }

        let pivot = (self.keys.len() - 1) / 2;
        let right_keys = self.keys.split_off(pivot + 1);
        let right_children = self.children.split_off(pivot + 1);
        let separator = self.keys.pop()?;
        Some(Split {
            separator,
            right: Node::Internal(InternalNode {
                keys: right_keys,
                children: right_children,
            }),
        })
    }
}

/// Ordered multi-map from `K` to values of type `V` kept in a [`ValueStore`]
///
/// The tree only records store positions; every operation that writes or
/// reads values takes the store explicitly.
#[derive(Clone, Debug)]
pub struct BPlusTree<K, V> {
    root: Node<K>,
    max_key_size: usize,
    len: usize,
    _values: PhantomData<fn() -> V>,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    /// Create an empty tree whose nodes split above `max_key_size` keys
    pub fn new(max_key_size: usize) -> Result<Self> {
        if max_key_size < 1 {
            return Err(GeoSearchError::InvalidMaxKeySize(max_key_size));
        }
        Ok(Self {
            root: Node::Leaf(LeafNode::default()),
            max_key_size,
            len: 0,
            _values: PhantomData,
        })
    }

    /// Write `value` to the store and index its position under `key`
    pub fn insert<S: ValueStore<V>>(&mut self, key: K, value: V, store: &mut S) {
        let position = store.write(value);
        self.len += 1;

        if let Some(split) = self.root.insert(key, position, self.max_key_size) {
            let left = std::mem::replace(&mut self.root, Node::Leaf(LeafNode::default()));
            self.root = Node::Internal(InternalNode {
                keys: vec![split.separator],
                children: vec![left, split.right],
            });
        }
    }

    /// All values inserted under exactly `key`, in insertion order
    pub fn find<S: ValueStore<V>>(&self, key: &K, store: &S) -> Result<Vec<V>>
    where
        V: Clone,
    {
        let mut node = &self.root;
        loop {
            match node {
                Node::Internal(internal) => {
                    node = &internal.children[find_branch(&internal.keys, key)];
                }
                Node::Leaf(leaf) => {
                    return match leaf.keys.binary_search(key) {
                        Ok(idx) => read_values(&leaf.postings[idx], store),
                        Err(_) => Ok(Vec::new()),
                    };
                }
            }
        }
    }

    /// All values whose key lies in `[lower, upper]`, in ascending key order
    pub fn find_range<S: ValueStore<V>>(&self, lower: &K, upper: &K, store: &S) -> Result<Vec<V>>
    where
        V: Clone,
    {
        if lower > upper {
            return Ok(Vec::new());
        }
        let mut positions = Vec::new();
        self.root.collect_range(lower, upper, &mut positions);
        read_values(&positions, store)
    }
}

impl<K, V> BPlusTree<K, V> {
    /// Number of values inserted
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn max_key_size(&self) -> usize {
        self.max_key_size
    }

    /// Depth of every leaf, left to right (root is depth 0)
    pub fn leaf_depths(&self) -> Vec<usize> {
        fn walk<K>(node: &Node<K>, depth: usize, out: &mut Vec<usize>) {
            match node {
                Node::Leaf(_) => out.push(depth),
                Node::Internal(internal) => {
                    for child in &internal.children {
                        walk(child, depth + 1, out);
                    }
                }
            }
        }
        let mut depths = Vec::new();
        walk(&self.root, 0, &mut depths);
        depths
    }
}

impl<K: Ord, V> BPlusTree<K, V> {
    /// Check node sizes, key ordering and separator bounds throughout the tree
    pub fn is_well_formed(&self) -> bool {
        fn check<K: Ord>(
            node: &Node<K>,
            lower: Option<&K>,
            upper: Option<&K>,
            max_key_size: usize,
        ) -> bool {
            let keys = match node {
                Node::Leaf(leaf) => &leaf.keys,
                Node::Internal(internal) => &internal.keys,
            };
            let sorted = keys.windows(2).all(|w| w[0] < w[1]);
            let bounded = keys.iter().all(|k| {
                lower.map_or(true, |lo| k >= lo) && upper.map_or(true, |hi| k < hi)
            });
            if !sorted || !bounded || keys.len() > max_key_size {
                return false;
            }
            match node {
                Node::Leaf(leaf) => leaf.postings.len() == leaf.keys.len(),
                Node::Internal(internal) => {
                    internal.children.len() == internal.keys.len() + 1
                        && internal.children.iter().enumerate().all(|(i, child)| {
                            let lo = if i == 0 { lower } else { internal.keys.get(i - 1) };
                            let hi = internal.keys.get(i).or(upper);
                            check(child, lo, hi, max_key_size)
                        })
                }
            }
        }

        let depths = self.leaf_depths();
        let uniform = depths.windows(2).all(|w| w[0] == w[1]);
        uniform && check(&self.root, None, None, self.max_key_size)
    }
}

fn read_values<V: Clone, S: ValueStore<V>>(positions: &[Position], store: &S) -> Result<Vec<V>> {
    positions
        .iter()
        .map(|&pos| store.read(pos).cloned())
        .collect()
}
